/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Cryptographic providers.
//!
//! A provider owns key generation and the signature primitives. The request
//! encoder only ever sees the DER it hands out: the SubjectPublicKeyInfo of a
//! generated key, signatures over TBS bytes, and the PKCS#8 private key.

use std::fmt;

use crate::algorithms::SignatureAlgorithm;
use crate::error::Result;

#[cfg(feature = "crypto-mbedtls")]
mod mbedtls;
#[cfg(feature = "crypto-openssl")]
mod openssl;

#[cfg(feature = "crypto-mbedtls")]
pub use self::mbedtls::{FtxRng, MbedtlsProvider};
#[cfg(feature = "crypto-openssl")]
pub use self::openssl::OpenSslProvider;

/// Parameters for a new key pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeySpec {
    pub algorithm: SignatureAlgorithm,
    /// Modulus size, only used for RSA keys.
    pub rsa_bits: u32,
}

/// Operations needed from a crypto backend. Implementations must be usable
/// from several threads at once; backends that cannot run two operations
/// concurrently report so through `is_reentrant` and the generator
/// serializes their calls.
pub trait CryptoProvider: Send + Sync + 'static {
    type PrivateKey: Send + 'static;

    fn name(&self) -> &'static str;

    fn is_reentrant(&self) -> bool {
        true
    }

    /// Fails with `ProviderUnavailable` if the backend cannot be used.
    fn check_available(&self) -> Result<()> {
        Ok(())
    }

    /// Fails with `KeyGenerationFailed`.
    fn generate_key(&self, spec: &KeySpec) -> Result<Self::PrivateKey>;

    /// DER SubjectPublicKeyInfo. Fails with `KeyExportFailed`.
    fn public_key_der(&self, key: &mut Self::PrivateKey) -> Result<Vec<u8>>;

    /// Hashes `data` with the digest of `algorithm` and signs it. ECDSA
    /// signatures are returned as DER `Ecdsa-Sig-Value`. Fails with
    /// `SigningFailed`.
    fn sign(&self, key: &mut Self::PrivateKey, algorithm: SignatureAlgorithm, data: &[u8]) -> Result<Vec<u8>>;

    /// DER PKCS#8 PrivateKeyInfo. Fails with `KeyExportFailed`.
    fn private_key_pkcs8_der(&self, key: &mut Self::PrivateKey) -> Result<Vec<u8>>;
}

/// A generated key pair: the provider's private key handle and the DER
/// SubjectPublicKeyInfo of its public half.
pub struct KeyPair<K> {
    pub public_key_der: Vec<u8>,
    pub private_key: K,
}

impl<K> fmt::Debug for KeyPair<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key_der", &format_args!("{} bytes", self.public_key_der.len()))
            .field("private_key", &format_args!("<redacted>"))
            .finish()
    }
}

/// Generates a key and fetches its public key DER.
pub fn generate_key_pair<P: CryptoProvider + ?Sized>(provider: &P, spec: &KeySpec) -> Result<KeyPair<P::PrivateKey>> {
    let mut private_key = provider.generate_key(spec)?;
    let public_key_der = provider.public_key_der(&mut private_key)?;
    Ok(KeyPair { public_key_der, private_key })
}
