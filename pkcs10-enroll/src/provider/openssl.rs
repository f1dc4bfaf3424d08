/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use openssl::bn::BigNum;
use openssl::ec::{EcGroup, EcKey};
use openssl::error::ErrorStack;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, PKeyRef, Private};
use openssl::rsa::{Padding, Rsa};
use openssl::sign::Signer;

use super::{CryptoProvider, KeySpec};
use crate::algorithms::{EcCurve, HashAlgorithm, KeyType, SignatureAlgorithm};
use crate::error::{Error, Result};

const RSA_KEY_EXP: u32 = 0x10001;

/// Provider backed by the system OpenSSL. OpenSSL key objects and signing
/// contexts are independent per call, so the provider is reentrant.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenSslProvider;

impl OpenSslProvider {
    pub fn new() -> Self {
        openssl::init();
        OpenSslProvider
    }
}

fn curve_nid(curve: EcCurve) -> Nid {
    match curve {
        EcCurve::NistP256 => Nid::X9_62_PRIME256V1,
        EcCurve::NistP384 => Nid::SECP384R1,
    }
}

fn digest(hash: HashAlgorithm) -> MessageDigest {
    match hash {
        HashAlgorithm::Sha256 => MessageDigest::sha256(),
        HashAlgorithm::Sha384 => MessageDigest::sha384(),
    }
}

fn sign_data(key: &PKeyRef<Private>, algorithm: SignatureAlgorithm, data: &[u8]) -> std::result::Result<Vec<u8>, ErrorStack> {
    let mut signer = Signer::new(digest(algorithm.hash()), key)?;
    if let KeyType::Rsa = algorithm.key_type() {
        signer.set_rsa_padding(Padding::PKCS1)?;
    }
    signer.update(data)?;
    signer.sign_to_vec()
}

impl CryptoProvider for OpenSslProvider {
    type PrivateKey = PKey<Private>;

    fn name(&self) -> &'static str {
        "openssl"
    }

    fn check_available(&self) -> Result<()> {
        openssl::init();
        for curve in &[EcCurve::NistP256, EcCurve::NistP384] {
            EcGroup::from_curve_name(curve_nid(*curve))
                .map_err(|e| Error::provider_unavailable(self.name(), format!("{:?} not supported: {}", curve, e)))?;
        }
        Ok(())
    }

    fn generate_key(&self, spec: &KeySpec) -> Result<PKey<Private>> {
        let key = match spec.algorithm.key_type() {
            KeyType::Ec(curve) => {
                EcGroup::from_curve_name(curve_nid(curve))
                    .and_then(|group| EcKey::generate(&group))
                    .and_then(PKey::from_ec_key)
            }
            KeyType::Rsa => {
                BigNum::from_u32(RSA_KEY_EXP)
                    .and_then(|e| Rsa::generate_with_e(spec.rsa_bits, &e))
                    .and_then(PKey::from_rsa)
            }
        };
        key.map_err(|e| Error::KeyGenerationFailed(Box::new(e)))
    }

    fn public_key_der(&self, key: &mut PKey<Private>) -> Result<Vec<u8>> {
        key.public_key_to_der().map_err(|e| Error::KeyExportFailed(Box::new(e)))
    }

    fn sign(&self, key: &mut PKey<Private>, algorithm: SignatureAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
        sign_data(key, algorithm, data).map_err(|e| Error::SigningFailed(Box::new(e)))
    }

    fn private_key_pkcs8_der(&self, key: &mut PKey<Private>) -> Result<Vec<u8>> {
        key.private_key_to_pkcs8().map_err(|e| Error::KeyExportFailed(Box::new(e)))
    }
}
