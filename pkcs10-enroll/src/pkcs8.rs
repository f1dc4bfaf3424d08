/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

// RFC5208, 5

use std::borrow::Cow;

use yasna::DERWriter;

use crate::algorithms::KeyType;
use crate::error::{Error, Result};
use crate::serialize::{DerWrite, ToDer};

const PRIVATE_KEY_INFO_V1: u8 = 0;

/// Wraps a key in its traditional encoding (SEC1 `ECPrivateKey` or PKCS#1
/// `RSAPrivateKey`) into a PKCS#8 `PrivateKeyInfo`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PrivateKeyInfo<'a> {
    pub key_type: KeyType,
    pub private_key: Cow<'a, [u8]>,
}

impl<'a> PrivateKeyInfo<'a> {
    pub fn new<K: Into<Cow<'a, [u8]>>>(key_type: KeyType, private_key: K) -> Result<Self> {
        let private_key = private_key.into();
        if private_key.is_empty() {
            return Err(Error::malformed("private key is missing"));
        }
        Ok(PrivateKeyInfo { key_type, private_key })
    }

    pub fn into_der(self) -> Vec<u8> {
        self.to_der()
    }
}

impl<'a> DerWrite for PrivateKeyInfo<'a> {
    fn write(&self, writer: DERWriter) {
        writer.write_sequence(|writer| {
            PRIVATE_KEY_INFO_V1.write(writer.next());
            self.key_type.write(writer.next());
            self.private_key.as_ref().write(writer.next());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::EcCurve;

    #[test]
    fn layout() {
        let info = PrivateKeyInfo::new(KeyType::Rsa, &[0x30, 0x00][..]).unwrap();
        assert_eq!(info.into_der(), vec![0x30, 0x16,
                                         0x02, 0x01, 0x00,
                                         0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01,
                                         0x05, 0x00,
                                         0x04, 0x02, 0x30, 0x00]);
    }

    #[test]
    fn empty_key_rejected() {
        assert!(PrivateKeyInfo::new(KeyType::Ec(EcCurve::NistP256), Vec::<u8>::new()).is_err());
    }

    #[cfg(feature = "crypto-openssl")]
    #[test]
    fn wrapped_sec1_key_imports() {
        use openssl::ec::{EcGroup, EcKey};
        use openssl::hash::MessageDigest;
        use openssl::nid::Nid;
        use openssl::pkey::PKey;
        use openssl::sign::{Signer, Verifier};

        let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1).unwrap();
        let key = EcKey::generate(&group).unwrap();
        let sec1 = key.private_key_to_der().unwrap();
        let public = PKey::from_ec_key(EcKey::from_public_key(&group, key.public_key()).unwrap()).unwrap();

        let pkcs8 = PrivateKeyInfo::new(KeyType::Ec(EcCurve::NistP256), sec1).unwrap().into_der();
        let imported = PKey::private_key_from_pkcs8(&pkcs8).unwrap();

        let mut signer = Signer::new(MessageDigest::sha256(), &imported).unwrap();
        signer.update(b"enrollment").unwrap();
        let sig = signer.sign_to_vec().unwrap();

        let mut verifier = Verifier::new(MessageDigest::sha256(), &public).unwrap();
        verifier.update(b"enrollment").unwrap();
        assert!(verifier.verify(&sig).unwrap());
    }
}
