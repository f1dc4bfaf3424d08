/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use serde_derive::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::oid;
use crate::types::{is_printable_string, AttributeTypeAndValue, DirectoryString, Name, ObjectIdentifier};

/// Subject fields of an enrollment identity. Any field may be missing when the
/// request was deserialized from host input; missing fields are reported when
/// the subject is built.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnrollmentRequest {
    #[serde(rename = "enrollmentID")]
    pub enrollment_id: Option<String>,
    #[serde(rename = "organizationUnit")]
    pub organization_unit: Option<String>,
    pub organization: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl EnrollmentRequest {
    pub fn new<S: Into<String>>(enrollment_id: S, organization_unit: S, organization: S, state: S, country: S) -> Self {
        EnrollmentRequest {
            enrollment_id: Some(enrollment_id.into()),
            organization_unit: Some(organization_unit.into()),
            organization: Some(organization.into()),
            state: Some(state.into()),
            country: Some(country.into()),
        }
    }
}

/// How subject values are checked before encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubjectPolicy {
    /// Values are encoded as given, including empty strings.
    Permissive,
    /// Empty values are rejected and `country` must be a two character
    /// PrintableString.
    Strict,
}

impl Default for SubjectPolicy {
    fn default() -> Self {
        SubjectPolicy::Permissive
    }
}

#[derive(Clone, Copy)]
enum StringKind {
    Printable,
    Utf8,
}

struct Field {
    name: &'static str,
    oid: &'static ObjectIdentifier,
    kind: StringKind,
}

/// Builds the ordered subject distinguished name:
/// C, ST, O, OU, CN.
pub fn build_subject(request: &EnrollmentRequest, policy: SubjectPolicy) -> Result<Name> {
    let fields = [
        (Field { name: "country", oid: &oid::countryName, kind: StringKind::Printable }, &request.country),
        (Field { name: "state", oid: &oid::stateOrProvinceName, kind: StringKind::Utf8 }, &request.state),
        (Field { name: "organization", oid: &oid::organizationName, kind: StringKind::Utf8 }, &request.organization),
        (Field { name: "organizationUnit", oid: &oid::organizationalUnitName, kind: StringKind::Utf8 }, &request.organization_unit),
        (Field { name: "enrollmentID", oid: &oid::commonName, kind: StringKind::Utf8 }, &request.enrollment_id),
    ];

    let mut value = Vec::with_capacity(fields.len());
    for (field, input) in fields.iter() {
        let input: &String = match input {
            Some(input) => input,
            None => return Err(Error::invalid_subject_field(field.name, "missing")),
        };
        if policy == SubjectPolicy::Strict {
            check_strict(field, input)?;
        }
        let string = match field.kind {
            StringKind::Printable => DirectoryString::PrintableString(input.clone()),
            StringKind::Utf8 => DirectoryString::Utf8String(input.clone()),
        };
        value.push(AttributeTypeAndValue { oid: field.oid.clone(), value: string });
    }

    Ok(Name { value })
}

fn check_strict(field: &Field, input: &str) -> Result<()> {
    if input.is_empty() {
        return Err(Error::invalid_subject_field(field.name, "empty"));
    }
    if let StringKind::Printable = field.kind {
        if !is_printable_string(input) {
            return Err(Error::invalid_subject_field(field.name, "not a PrintableString"));
        }
    }
    if *field.oid == *oid::countryName && input.chars().count() != 2 {
        return Err(Error::invalid_subject_field(field.name, "must be a two letter country code"));
    }
    Ok(())
}
