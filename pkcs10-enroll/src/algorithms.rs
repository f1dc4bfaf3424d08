/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

/* An algorithm identifier is a sequence containing an OID followed by
 * optional parameters. RSA identifiers carry an explicit NULL, ECDSA
 * identifiers omit the parameters entirely (RFC5758, 3.2).
 */

use std::fmt;

use serde_derive::{Deserialize, Serialize};
use yasna::DERWriter;

use crate::oid;
use crate::serialize::DerWrite;
use crate::types::ObjectIdentifier;

/// Supported key and signature algorithm pairings. The same value selects the
/// key type, the digest and the `signatureAlgorithm` written into the request.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureAlgorithm {
    EcdsaP256Sha256,
    EcdsaP384Sha384,
    RsaPkcs15Sha256,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EcCurve {
    NistP256,
    NistP384,
}

impl EcCurve {
    pub fn oid(&self) -> &'static ObjectIdentifier {
        match self {
            EcCurve::NistP256 => &oid::NistP256,
            EcCurve::NistP384 => &oid::NistP384,
        }
    }
}

/// Key type generated for a signature algorithm.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum KeyType {
    Ec(EcCurve),
    Rsa,
}

impl Default for SignatureAlgorithm {
    fn default() -> Self {
        SignatureAlgorithm::EcdsaP256Sha256
    }
}

impl SignatureAlgorithm {
    pub fn oid(&self) -> &'static ObjectIdentifier {
        match self {
            SignatureAlgorithm::EcdsaP256Sha256 => &oid::ecdsaWithSHA256,
            SignatureAlgorithm::EcdsaP384Sha384 => &oid::ecdsaWithSHA384,
            SignatureAlgorithm::RsaPkcs15Sha256 => &oid::sha256WithRSAEncryption,
        }
    }

    pub fn hash(&self) -> HashAlgorithm {
        match self {
            SignatureAlgorithm::EcdsaP256Sha256 | SignatureAlgorithm::RsaPkcs15Sha256 => HashAlgorithm::Sha256,
            SignatureAlgorithm::EcdsaP384Sha384 => HashAlgorithm::Sha384,
        }
    }

    pub fn key_type(&self) -> KeyType {
        match self {
            SignatureAlgorithm::EcdsaP256Sha256 => KeyType::Ec(EcCurve::NistP256),
            SignatureAlgorithm::EcdsaP384Sha384 => KeyType::Ec(EcCurve::NistP384),
            SignatureAlgorithm::RsaPkcs15Sha256 => KeyType::Rsa,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            SignatureAlgorithm::EcdsaP256Sha256 => "ecdsa-with-SHA256 (P-256)",
            SignatureAlgorithm::EcdsaP384Sha384 => "ecdsa-with-SHA384 (P-384)",
            SignatureAlgorithm::RsaPkcs15Sha256 => "sha256WithRSAEncryption",
        };
        f.write_str(name)
    }
}

impl DerWrite for SignatureAlgorithm {
    fn write(&self, writer: DERWriter) {
        writer.write_sequence(|writer| {
            writer.next().write_oid(self.oid());
            if let KeyType::Rsa = self.key_type() {
                writer.next().write_null();
            }
        })
    }
}

/// `privateKeyAlgorithm` of a PKCS#8 `PrivateKeyInfo`.
impl DerWrite for KeyType {
    fn write(&self, writer: DERWriter) {
        writer.write_sequence(|writer| match self {
            KeyType::Ec(curve) => {
                writer.next().write_oid(&oid::ecPublicKey);
                writer.next().write_oid(curve.oid());
            }
            KeyType::Rsa => {
                writer.next().write_oid(&oid::rsaEncryption);
                writer.next().write_null();
            }
        })
    }
}
