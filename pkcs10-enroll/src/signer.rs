/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use crate::algorithms::SignatureAlgorithm;
use crate::error::{Error, Result};
use crate::provider::CryptoProvider;

/// A signature together with the algorithm that produced it. The request
/// encoder takes its `signatureAlgorithm` from here so the identifier always
/// matches the signature bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    pub algorithm: SignatureAlgorithm,
    pub bytes: Vec<u8>,
}

/// Signs the DER encoded `CertificationRequestInfo` with `key`.
pub fn sign<P: CryptoProvider + ?Sized>(provider: &P, key: &mut P::PrivateKey, algorithm: SignatureAlgorithm, tbs: &[u8]) -> Result<Signature> {
    let bytes = match provider.sign(key, algorithm, tbs) {
        Ok(bytes) => bytes,
        Err(e @ Error::SigningFailed(_)) => return Err(e),
        Err(e) => return Err(Error::SigningFailed(Box::new(e))),
    };
    if bytes.is_empty() {
        return Err(Error::SigningFailed(format!("{} returned an empty signature", provider.name()).into()));
    }
    debug!("{} signature over {} bytes: {} bytes", algorithm, tbs.len(), bytes.len());
    Ok(Signature { algorithm, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::KeySpec;

    struct FixedSigner(Result<Vec<u8>>);

    impl CryptoProvider for FixedSigner {
        type PrivateKey = ();

        fn name(&self) -> &'static str {
            "fixed"
        }

        fn generate_key(&self, _spec: &KeySpec) -> Result<()> {
            Ok(())
        }

        fn public_key_der(&self, _key: &mut ()) -> Result<Vec<u8>> {
            Ok(vec![])
        }

        fn sign(&self, _key: &mut (), _algorithm: SignatureAlgorithm, _data: &[u8]) -> Result<Vec<u8>> {
            match &self.0 {
                Ok(sig) => Ok(sig.clone()),
                Err(_) => Err(Error::malformed("signer refused")),
            }
        }

        fn private_key_pkcs8_der(&self, _key: &mut ()) -> Result<Vec<u8>> {
            Ok(vec![])
        }
    }

    #[test]
    fn carries_algorithm() {
        let provider = FixedSigner(Ok(vec![0x30, 0x00]));
        let sig = sign(&provider, &mut (), SignatureAlgorithm::EcdsaP384Sha384, b"tbs").unwrap();
        assert_eq!(sig, Signature { algorithm: SignatureAlgorithm::EcdsaP384Sha384, bytes: vec![0x30, 0x00] });
    }

    #[test]
    fn empty_signature() {
        let provider = FixedSigner(Ok(vec![]));
        match sign(&provider, &mut (), SignatureAlgorithm::EcdsaP256Sha256, b"tbs") {
            Err(Error::SigningFailed(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn provider_error_is_signing_failure() {
        let provider = FixedSigner(Err(Error::malformed("unused")));
        match sign(&provider, &mut (), SignatureAlgorithm::EcdsaP256Sha256, b"tbs") {
            Err(Error::SigningFailed(source)) => assert!(source.to_string().contains("signer refused")),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
