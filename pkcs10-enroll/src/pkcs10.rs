/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// RFC2986, 4.1

use bit_vec::BitVec;
use yasna::{DERWriter, Tag};

use crate::algorithms::SignatureAlgorithm;
use crate::error::{Error, Result};
use crate::serialize::{DerWrite, ToDer};
use crate::signer::Signature;
use crate::types::{DerSequence, Name};

const CERTIFICATION_REQUEST_INFO_V1: u8 = 0;

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CertificationRequestInfo<'a> {
    // version: v1
    pub subject: Name,
    pub spki: DerSequence<'a>,
    // attributes: always the empty set, no extension requests are made
}

impl<'a> CertificationRequestInfo<'a> {
    /// Checks the fields that must be present before the structure is encoded
    /// and signed.
    pub fn new(subject: Name, spki: DerSequence<'a>) -> Result<Self> {
        if subject.is_empty() {
            return Err(Error::malformed("subject has no attributes"));
        }
        check_spki(spki.as_ref())?;
        Ok(CertificationRequestInfo { subject, spki })
    }

    /// DER encoding of the structure: the exact bytes the signature covers.
    pub fn to_tbs(&self) -> DerSequence<'static> {
        DerSequence::from(self.to_der())
    }
}

impl<'a> DerWrite for CertificationRequestInfo<'a> {
    fn write(&self, writer: DERWriter) {
        writer.write_sequence(|writer| {
            CERTIFICATION_REQUEST_INFO_V1.write(writer.next());
            self.subject.write(writer.next());
            self.spki.write(writer.next());
            // Empty attributes encode as A0 00
            writer.next().write_tagged_implicit(Tag::context(0), |w| {
                w.write_set(|_| {})
            });
        });
    }
}

/// `SubjectPublicKeyInfo ::= SEQUENCE { algorithm AlgorithmIdentifier, subjectPublicKey BIT STRING }`
fn check_spki(spki: &[u8]) -> Result<()> {
    if spki.is_empty() {
        return Err(Error::malformed("subject public key info is missing"));
    }
    yasna::parse_der(spki, |r| {
        r.read_sequence(|r| {
            r.next().read_sequence(|r| {
                r.next().read_oid()?;
                r.read_optional(|r| r.read_der())?;
                Ok(())
            })?;
            r.next().read_bitvec()?;
            Ok(())
        })
    }).map_err(|e| Error::malformed(format!("subject public key info is not valid DER: {}", e)))
}

/// The signed request. `reqinfo` holds the already encoded TBS bytes and is
/// embedded verbatim, never re-encoded.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CertificationRequest<'a> {
    pub reqinfo: DerSequence<'a>,
    pub sigalg: SignatureAlgorithm,
    pub sig: BitVec,
}

impl<'a> CertificationRequest<'a> {
    /// Assembles the request from the TBS bytes and the signature computed
    /// over them. The algorithm identifier comes from the signature itself.
    pub fn new(reqinfo: DerSequence<'a>, signature: Signature) -> Result<Self> {
        if reqinfo.as_ref().is_empty() {
            return Err(Error::malformed("certification request info is missing"));
        }
        if signature.bytes.is_empty() {
            return Err(Error::malformed("signature is missing"));
        }
        Ok(CertificationRequest {
            reqinfo,
            sigalg: signature.algorithm,
            sig: BitVec::from_bytes(&signature.bytes),
        })
    }
}

impl<'a> DerWrite for CertificationRequest<'a> {
    fn write(&self, writer: DERWriter) {
        writer.write_sequence(|writer| {
            self.reqinfo.write(writer.next());
            self.sigalg.write(writer.next());
            self.sig.write(writer.next());
        });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::oid;
    use crate::types::{AttributeTypeAndValue, DirectoryString};

    // SubjectPublicKeyInfo of a P-256 key (RFC5480 layout).
    pub(crate) fn test_spki() -> Vec<u8> {
        let mut spki = vec![0x30, 0x59,
                            0x30, 0x13,
                            0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01,
                            0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07,
                            0x03, 0x42, 0x00, 0x04];
        spki.extend((0..64).map(|i| i as u8));
        spki
    }

    fn test_name() -> Name {
        vec![AttributeTypeAndValue {
            oid: oid::commonName.clone(),
            value: DirectoryString::Utf8String("user1".to_owned()),
        }].into()
    }

    #[test]
    fn reqinfo_layout() {
        let spki = test_spki();
        let info = CertificationRequestInfo::new(test_name(), DerSequence::from(&spki[..])).unwrap();
        let der = info.to_der();

        let name_der = test_name().to_der();
        let content_len = 3 + name_der.len() + spki.len() + 2;
        assert!(content_len < 128);
        assert_eq!(&der[..2], &[0x30, content_len as u8]);
        // version 0
        assert_eq!(&der[2..5], &[0x02, 0x01, 0x00]);
        assert_eq!(&der[5..5 + name_der.len()], &name_der[..]);
        assert_eq!(&der[5 + name_der.len()..der.len() - 2], &spki[..]);
        assert_eq!(&der[der.len() - 2..], &[0xa0, 0x00]);
    }

    #[test]
    fn tbs_is_stable() {
        let spki = test_spki();
        let info = CertificationRequestInfo::new(test_name(), DerSequence::from(&spki[..])).unwrap();
        assert_eq!(info.to_tbs().as_ref(), &info.to_der()[..]);
    }

    #[test]
    fn empty_subject_rejected() {
        let spki = test_spki();
        match CertificationRequestInfo::new(Name::default(), DerSequence::from(&spki[..])) {
            Err(Error::MalformedStructure(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn bad_spki_rejected() {
        let cases: Vec<Vec<u8>> = vec![vec![], vec![0x04, 0x01, 0x00], vec![0x30, 0x03, 0x02, 0x01, 0x05]];
        for spki in cases {
            match CertificationRequestInfo::new(test_name(), DerSequence::from(spki)) {
                Err(Error::MalformedStructure(_)) => {}
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn request_layout() {
        let tbs = DerSequence::from(vec![0x30, 0x00]);
        let signature = Signature {
            algorithm: SignatureAlgorithm::EcdsaP256Sha256,
            bytes: vec![0x01, 0x02, 0x03],
        };
        let csr = CertificationRequest::new(tbs, signature).unwrap().to_der();
        assert_eq!(csr, vec![0x30, 0x14,
                             0x30, 0x00,
                             0x30, 0x0a, 0x06, 0x08, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x02,
                             0x03, 0x04, 0x00, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn empty_signature_rejected() {
        let signature = Signature { algorithm: SignatureAlgorithm::RsaPkcs15Sha256, bytes: vec![] };
        match CertificationRequest::new(DerSequence::from(vec![0x30, 0x00]), signature) {
            Err(Error::MalformedStructure(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
