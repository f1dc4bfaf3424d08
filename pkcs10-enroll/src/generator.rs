/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! End to end CSR generation.
//!
//! `CsrGenerator::generate` runs every provider call on tokio's blocking pool
//! so that key generation and signing never stall the async executor. Calls
//! into a provider that is not reentrant are serialized with a mutex that is
//! held for the duration of a single provider call.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde_derive::{Deserialize, Serialize};
use tokio::{task, time};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::pem::{der_to_pem, PEM_CERTIFICATE_REQUEST, PEM_PRIVATE_KEY};
use crate::pkcs10::{CertificationRequest, CertificationRequestInfo};
use crate::provider::{generate_key_pair, CryptoProvider, KeyPair};
use crate::serialize::ToDer;
use crate::signer::{self, Signature};
use crate::subject::{build_subject, EnrollmentRequest};
use crate::types::{DerSequence, Name};

/// PEM encoded CSR and matching PKCS#8 private key.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCsr {
    pub csr: String,
    pub private_key: String,
}

impl fmt::Debug for GeneratedCsr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GeneratedCsr")
            .field("csr", &self.csr)
            .field("private_key", &format_args!("<redacted>"))
            .finish()
    }
}

pub struct CsrGenerator<P: CryptoProvider> {
    provider: Arc<P>,
    config: GeneratorConfig,
    provider_lock: Option<Arc<Mutex<()>>>,
}

impl<P: CryptoProvider> Clone for CsrGenerator<P> {
    fn clone(&self) -> Self {
        CsrGenerator {
            provider: self.provider.clone(),
            config: self.config.clone(),
            provider_lock: self.provider_lock.clone(),
        }
    }
}

impl<P: CryptoProvider> CsrGenerator<P> {
    pub fn new(provider: Arc<P>, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let provider_lock = if provider.is_reentrant() {
            None
        } else {
            Some(Arc::new(Mutex::new(())))
        };
        Ok(CsrGenerator { provider, config, provider_lock })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs one provider call on the blocking pool, bounded by the configured
    /// timeout. On timeout the call keeps running in the background and its
    /// result is dropped.
    async fn provider_call<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&P) -> Result<T> + Send + 'static,
    {
        let provider = self.provider.clone();
        let lock = self.provider_lock.clone();
        let call = task::spawn_blocking(move || {
            let _guard = lock.as_ref().map(|l| l.lock().unwrap_or_else(PoisonError::into_inner));
            f(&*provider)
        });

        let res = match self.config.provider_timeout() {
            Some(timeout) => match time::timeout(timeout, call).await {
                Ok(res) => res,
                Err(_) => {
                    warn!("{} {} did not complete within {:?}", self.provider.name(), operation, timeout);
                    return Err(Error::ProviderTimeout { operation, timeout });
                }
            },
            None => call.await,
        };
        res?
    }

    fn provider_call_blocking<T, F: FnOnce(&P) -> Result<T>>(&self, f: F) -> Result<T> {
        let _guard = self.provider_lock.as_ref().map(|l| l.lock().unwrap_or_else(PoisonError::into_inner));
        f(&*self.provider)
    }

    /// Generates a key pair for the configured algorithm, and a CSR for
    /// `request` signed with it.
    pub async fn generate(&self, request: &EnrollmentRequest) -> Result<GeneratedCsr> {
        self.provider_call("availability check", |p| p.check_available()).await?;
        let subject = build_subject(request, self.config.subject_policy)?;
        let dn = subject.to_string();
        debug!("generating {} CSR for {}", self.config.algorithm, dn);

        let spec = self.config.key_spec();
        let KeyPair { public_key_der, private_key } =
            self.provider_call("key generation", move |p| generate_key_pair(p, &spec)).await?;
        let tbs = request_info(subject, public_key_der)?;

        let algorithm = self.config.algorithm;
        let tbs_bytes = tbs.as_ref().to_vec();
        let (private_key, signature) = self.provider_call("sign", move |p| {
            let mut key = private_key;
            let signature = signer::sign(p, &mut key, algorithm, &tbs_bytes)?;
            Ok((key, signature))
        }).await?;
        let csr = assemble(tbs, signature)?;

        let pkcs8 = self.provider_call("private key export", move |p| {
            let mut key = private_key;
            p.private_key_pkcs8_der(&mut key)
        }).await?;

        info!("generated {} CSR for {}", self.config.algorithm, dn);
        Ok(GeneratedCsr { csr, private_key: der_to_pem(&pkcs8, PEM_PRIVATE_KEY) })
    }

    /// `generate` on the calling thread, without a timeout.
    pub fn generate_blocking(&self, request: &EnrollmentRequest) -> Result<GeneratedCsr> {
        self.provider_call_blocking(|p| p.check_available())?;
        let subject = build_subject(request, self.config.subject_policy)?;
        let dn = subject.to_string();
        debug!("generating {} CSR for {}", self.config.algorithm, dn);

        let spec = self.config.key_spec();
        let KeyPair { public_key_der, mut private_key } =
            self.provider_call_blocking(|p| generate_key_pair(p, &spec))?;
        let tbs = request_info(subject, public_key_der)?;

        let algorithm = self.config.algorithm;
        let signature = self.provider_call_blocking(|p| signer::sign(p, &mut private_key, algorithm, tbs.as_ref()))?;
        let csr = assemble(tbs, signature)?;

        let pkcs8 = self.provider_call_blocking(|p| p.private_key_pkcs8_der(&mut private_key))?;

        info!("generated {} CSR for {}", self.config.algorithm, dn);
        Ok(GeneratedCsr { csr, private_key: der_to_pem(&pkcs8, PEM_PRIVATE_KEY) })
    }
}

fn request_info(subject: Name, public_key_der: Vec<u8>) -> Result<DerSequence<'static>> {
    let tbs = CertificationRequestInfo::new(subject, DerSequence::from(public_key_der))?.to_tbs();
    debug!("encoded certification request info: {} bytes", tbs.as_ref().len());
    Ok(tbs)
}

fn assemble(tbs: DerSequence<'static>, signature: Signature) -> Result<String> {
    let der = CertificationRequest::new(tbs, signature)?.to_der();
    debug!("encoded certification request: {} bytes", der.len());
    Ok(der_to_pem(&der, PEM_CERTIFICATE_REQUEST))
}
