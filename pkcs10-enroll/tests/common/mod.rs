/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

#![allow(dead_code)]

use pkcs10_enroll::types::{ObjectIdentifier, TaggedDerValue};
use pkcs10_enroll::yasna::{self, ASN1Result, BERDecodable, BERReader};
use rustc_serialize::base64::FromBase64;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A decoded `CertificationRequest`, with the raw DER of the parts the tests
/// compare byte for byte.
#[derive(Debug)]
pub struct DecodedCsr {
    pub tbs: Vec<u8>,
    pub version: u8,
    pub subject_der: Vec<u8>,
    pub subject: Vec<Vec<(ObjectIdentifier, TaggedDerValue)>>,
    pub spki: Vec<u8>,
    pub attributes: Vec<u8>,
    pub sig_alg: ObjectIdentifier,
    pub sig_alg_params: Option<Vec<u8>>,
    pub signature: Vec<u8>,
}

/// Strips the guard lines and decodes the body of a PEM document.
pub fn pem_body(pem: &str, label: &str) -> Vec<u8> {
    let begin = format!("-----BEGIN {}-----", label);
    let end = format!("-----END {}-----", label);
    let lines = pem.split('\n').collect::<Vec<_>>();
    assert_eq!(lines.first(), Some(&&begin[..]));
    assert_eq!(lines.last(), Some(&&end[..]));
    lines[1..lines.len() - 1].concat().from_base64().unwrap()
}

fn read_rdns(reader: BERReader) -> ASN1Result<Vec<Vec<(ObjectIdentifier, TaggedDerValue)>>> {
    reader.read_sequence(|r| {
        let mut rdns = Vec::new();
        loop {
            let mut rdn = Vec::new();
            let res = r.read_optional(|r| {
                r.read_set_of(|r| {
                    let atv = r.read_sequence(|r| {
                        let oid = ObjectIdentifier::decode_ber(r.next())?;
                        let value = TaggedDerValue::decode_ber(r.next())?;
                        Ok((oid, value))
                    })?;
                    rdn.push(atv);
                    Ok(())
                })
            })?;
            match res {
                Some(()) => rdns.push(rdn),
                None => break,
            }
        }
        Ok(rdns)
    })
}

pub fn decode_csr(der: &[u8]) -> DecodedCsr {
    let (tbs, sig_alg, sig_alg_params, signature) = yasna::parse_der(der, |r| {
        r.read_sequence(|r| {
            let tbs = r.next().read_der()?;
            let (oid, params) = r.next().read_sequence(|r| {
                let oid = r.next().read_oid()?;
                let params = r.read_optional(|r| r.read_der())?;
                Ok((oid, params))
            })?;
            let signature = r.next().read_bitvec()?.to_bytes();
            Ok((tbs, oid, params, signature))
        })
    }).unwrap();

    let (version, subject_der, spki, attributes) = yasna::parse_der(&tbs, |r| {
        r.read_sequence(|r| {
            let version = r.next().read_u8()?;
            let subject_der = r.next().read_der()?;
            let spki = r.next().read_der()?;
            let attributes = r.next().read_der()?;
            Ok((version, subject_der, spki, attributes))
        })
    }).unwrap();

    let subject = yasna::parse_der(&subject_der, read_rdns).unwrap();

    DecodedCsr { tbs, version, subject_der, subject, spki, attributes, sig_alg, sig_alg_params, signature }
}
