/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use mbedtls::hash::{self, Md};
use mbedtls::pk::{EcGroupId, Pk, ECDSA_MAX_LEN};

use super::{CryptoProvider, KeySpec};
use crate::algorithms::{EcCurve, HashAlgorithm, KeyType, SignatureAlgorithm};
use crate::error::{Error, Result};
use crate::pkcs8::PrivateKeyInfo;

pub use mbedtls::rng::Rdrand as FtxRng;

const RSA_KEY_EXP: u32 = 0x10001;

/// mbedtls key together with the key type it was generated for, which the
/// PKCS#8 wrapper needs.
pub struct MbedtlsKey {
    pk: Pk,
    key_type: KeyType,
}

/// Provider backed by mbedtls, drawing randomness from RDRAND.
#[derive(Clone, Copy, Debug, Default)]
pub struct MbedtlsProvider;

impl MbedtlsProvider {
    pub fn new() -> Self {
        MbedtlsProvider
    }
}

fn group_id(curve: EcCurve) -> EcGroupId {
    match curve {
        EcCurve::NistP256 => EcGroupId::SecP256R1,
        EcCurve::NistP384 => EcGroupId::SecP384R1,
    }
}

fn md_type(hash: HashAlgorithm) -> (hash::Type, usize) {
    match hash {
        HashAlgorithm::Sha256 => (hash::Type::Sha256, 32),
        HashAlgorithm::Sha384 => (hash::Type::Sha384, 48),
    }
}

impl CryptoProvider for MbedtlsProvider {
    type PrivateKey = MbedtlsKey;

    fn name(&self) -> &'static str {
        "mbedtls"
    }

    fn check_available(&self) -> Result<()> {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            if is_x86_feature_detected!("rdrand") {
                return Ok(());
            }
        }
        Err(Error::provider_unavailable(self.name(), "RDRAND is not supported on this CPU"))
    }

    fn generate_key(&self, spec: &KeySpec) -> Result<MbedtlsKey> {
        let key_type = spec.algorithm.key_type();
        let pk = match key_type {
            KeyType::Ec(curve) => Pk::generate_ec(&mut FtxRng, group_id(curve)),
            KeyType::Rsa => Pk::generate_rsa(&mut FtxRng, spec.rsa_bits, RSA_KEY_EXP),
        }.map_err(|e| Error::KeyGenerationFailed(Box::new(e)))?;
        Ok(MbedtlsKey { pk, key_type })
    }

    fn public_key_der(&self, key: &mut MbedtlsKey) -> Result<Vec<u8>> {
        key.pk.write_public_der_vec().map_err(|e| Error::KeyExportFailed(Box::new(e)))
    }

    fn sign(&self, key: &mut MbedtlsKey, algorithm: SignatureAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
        if algorithm.key_type() != key.key_type {
            return Err(Error::SigningFailed(
                format!("{:?} key cannot produce {} signatures", key.key_type, algorithm).into()
            ));
        }

        let (md, len) = md_type(algorithm.hash());
        let mut digest = vec![0u8; len];
        Md::hash(md, data, &mut digest).map_err(|e| Error::SigningFailed(Box::new(e)))?;

        let sig_len = match key.key_type {
            KeyType::Rsa => (key.pk.len() + 7) / 8,
            KeyType::Ec(_) => ECDSA_MAX_LEN,
        };
        let mut sig = vec![0u8; sig_len];
        let written = key.pk.sign(md, &digest, &mut sig, &mut FtxRng)
            .map_err(|e| Error::SigningFailed(Box::new(e)))?;
        sig.truncate(written);

        Ok(sig)
    }

    fn private_key_pkcs8_der(&self, key: &mut MbedtlsKey) -> Result<Vec<u8>> {
        let traditional = key.pk.write_private_der_vec().map_err(|e| Error::KeyExportFailed(Box::new(e)))?;
        Ok(PrivateKeyInfo::new(key.key_type, traditional)?.into_der())
    }
}
