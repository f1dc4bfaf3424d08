/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! PKCS#10 certificate signing requests for enrollment identities.
//!
//! Given the five subject fields of an enrollment request, `CsrGenerator`
//! generates a key pair with a `CryptoProvider`, signs a
//! `CertificationRequest` with it and returns the request and the PKCS#8
//! private key as PEM.
//!
//! ```no_run
//! # #[cfg(feature = "crypto-openssl")]
//! # async fn run() -> pkcs10_enroll::Result<()> {
//! use std::sync::Arc;
//! use pkcs10_enroll::{CsrGenerator, EnrollmentRequest, GeneratorConfig, OpenSslProvider};
//!
//! let generator = CsrGenerator::new(Arc::new(OpenSslProvider::new()), GeneratorConfig::default())?;
//! let request = EnrollmentRequest::new("user1", "Marketing", "Farmer Market", "M", "V");
//! let out = generator.generate(&request).await?;
//! println!("{}", out.csr);
//! # Ok(())
//! # }
//! ```

pub extern crate bit_vec;
pub extern crate yasna;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod algorithms;
pub mod config;
pub mod error;
pub mod generator;
pub mod oid;
pub mod pem;
pub mod pkcs10;
pub mod pkcs8;
pub mod provider;
pub mod signer;
pub mod subject;
pub mod types;
mod serialize;

pub use crate::algorithms::SignatureAlgorithm;
pub use crate::config::GeneratorConfig;
pub use crate::error::{Error, Result};
pub use crate::generator::{CsrGenerator, GeneratedCsr};
pub use crate::provider::{CryptoProvider, KeySpec};
#[cfg(feature = "crypto-mbedtls")]
pub use crate::provider::MbedtlsProvider;
#[cfg(feature = "crypto-openssl")]
pub use crate::provider::OpenSslProvider;
pub use crate::serialize::{DerWrite, ToDer};
pub use crate::subject::{EnrollmentRequest, SubjectPolicy};
