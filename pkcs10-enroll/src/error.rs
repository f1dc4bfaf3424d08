/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::borrow::Cow;
use std::time::Duration;

use tokio::task::JoinError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by a crypto provider backend.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("crypto provider {provider} unavailable: {reason}")]
    ProviderUnavailable {
        provider: &'static str,
        reason: Cow<'static, str>,
    },
    #[error("invalid subject field {field}: {reason}")]
    InvalidSubjectField {
        field: &'static str,
        reason: Cow<'static, str>,
    },
    #[error("key generation failed")]
    KeyGenerationFailed(#[source] ProviderError),
    #[error("signing failed")]
    SigningFailed(#[source] ProviderError),
    #[error("key export failed")]
    KeyExportFailed(#[source] ProviderError),
    #[error("invalid generator config: {0}")]
    InvalidConfig(Cow<'static, str>),
    #[error("malformed structure: {0}")]
    MalformedStructure(Cow<'static, str>),
    #[error("crypto provider timed out after {timeout:?} during {operation}")]
    ProviderTimeout {
        operation: &'static str,
        timeout: Duration,
    },
    #[error("crypto provider worker failed: {0}")]
    Worker(#[from] JoinError),
}

impl Error {
    pub fn invalid_subject_field<R: Into<Cow<'static, str>>>(field: &'static str, reason: R) -> Error {
        Error::InvalidSubjectField { field, reason: reason.into() }
    }

    pub fn invalid_config<R: Into<Cow<'static, str>>>(reason: R) -> Error {
        Error::InvalidConfig(reason.into())
    }

    pub fn malformed<R: Into<Cow<'static, str>>>(reason: R) -> Error {
        Error::MalformedStructure(reason.into())
    }

    pub fn provider_unavailable<R: Into<Cow<'static, str>>>(provider: &'static str, reason: R) -> Error {
        Error::ProviderUnavailable { provider, reason: reason.into() }
    }
}
