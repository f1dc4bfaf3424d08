/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::borrow::Cow;
use std::fmt;

use yasna::tags::{TAG_PRINTABLESTRING, TAG_UTF8STRING};
use yasna::DERWriter;
pub use yasna::models::{ObjectIdentifier, TaggedDerValue};

use crate::oid;
use crate::serialize::DerWrite;

/// String types a distinguished name value may take.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum DirectoryString {
    PrintableString(String),
    Utf8String(String),
}

impl DirectoryString {
    pub fn as_str(&self) -> &str {
        match self {
            DirectoryString::PrintableString(s) | DirectoryString::Utf8String(s) => s,
        }
    }

    fn to_tagged(&self) -> TaggedDerValue {
        match self {
            DirectoryString::PrintableString(s) => {
                TaggedDerValue::from_tag_and_bytes(TAG_PRINTABLESTRING, s.as_bytes().to_vec())
            }
            DirectoryString::Utf8String(s) => {
                TaggedDerValue::from_tag_and_bytes(TAG_UTF8STRING, s.as_bytes().to_vec())
            }
        }
    }
}

/// Characters allowed in an ASN.1 PrintableString (X.680, 41.4).
pub fn is_printable_string(s: &str) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(c, ' ' | '\'' | '(' | ')' | '+' | ',' | '-' | '.' | '/' | ':' | '=' | '?')
    })
}

impl DerWrite for DirectoryString {
    fn write(&self, writer: DERWriter) {
        self.to_tagged().write(writer)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct AttributeTypeAndValue {
    pub oid: ObjectIdentifier,
    pub value: DirectoryString,
}

impl DerWrite for AttributeTypeAndValue {
    fn write(&self, writer: DERWriter) {
        writer.write_sequence(|writer| {
            self.oid.write(writer.next());
            self.value.write(writer.next());
        });
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Name {
    // Every `AttributeTypeAndValue` is serialized in its own single-element
    // RDN set, in the order given here.
    pub value: Vec<AttributeTypeAndValue>,
}

impl Name {
    pub fn get(&self, oid: &ObjectIdentifier) -> Option<&DirectoryString> {
        self.value.iter().find(|v| v.oid == *oid).map(|v| &v.value)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

fn format_oid(oid: &ObjectIdentifier) -> String {
    match oid::OID_TO_NAME.get(oid) {
        Some(name) => name.to_string(),
        None => oid.components().iter().map(|c| c.to_string()).collect::<Vec<_>>().join("."),
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rdns = self.value.iter()
            .map(|atv| format!("{}={}", format_oid(&atv.oid), atv.value.as_str()))
            .collect::<Vec<_>>();
        write!(f, "{}", rdns.join(", "))
    }
}

impl From<Vec<AttributeTypeAndValue>> for Name {
    fn from(value: Vec<AttributeTypeAndValue>) -> Name {
        Name { value }
    }
}

impl DerWrite for Name {
    fn write(&self, writer: DERWriter) {
        writer.write_sequence(|writer| {
            for atv in &self.value {
                writer.next().write_set(|writer| {
                    atv.write(writer.next());
                });
            }
        });
    }
}

/// Already DER-encoded element, written out verbatim.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DerSequence<'a> {
    pub value: Cow<'a, [u8]>,
}

impl<'a> DerWrite for DerSequence<'a> {
    fn write(&self, writer: DERWriter) {
        writer.write_der(&self.value)
    }
}

impl<'a> From<&'a [u8]> for DerSequence<'a> {
    fn from(b: &'a [u8]) -> DerSequence<'a> {
        DerSequence { value: Cow::Borrowed(b) }
    }
}

impl From<Vec<u8>> for DerSequence<'static> {
    fn from(b: Vec<u8>) -> DerSequence<'static> {
        DerSequence { value: Cow::Owned(b) }
    }
}

impl<'a> AsRef<[u8]> for DerSequence<'a> {
    fn as_ref(&self) -> &[u8] {
        self.value.as_ref()
    }
}
