/* Copyright (c) Fortanix, Inc.
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

use std::time::Duration;

use serde_derive::{Deserialize, Serialize};

use crate::algorithms::{KeyType, SignatureAlgorithm};
use crate::error::{Error, Result};
use crate::provider::KeySpec;
use crate::subject::SubjectPolicy;

pub const DEFAULT_RSA_KEY_BITS: u32 = 2048;
pub const MIN_RSA_KEY_BITS: u32 = 2048;

fn default_rsa_key_bits() -> u32 {
    DEFAULT_RSA_KEY_BITS
}

/// Settings for `CsrGenerator`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub algorithm: SignatureAlgorithm,
    #[serde(default = "default_rsa_key_bits")]
    pub rsa_key_bits: u32,
    /// Upper bound on each blocking provider call. No bound when unset.
    #[serde(default)]
    pub provider_timeout_ms: Option<u64>,
    #[serde(default)]
    pub subject_policy: SubjectPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            algorithm: SignatureAlgorithm::default(),
            rsa_key_bits: DEFAULT_RSA_KEY_BITS,
            provider_timeout_ms: None,
            subject_policy: SubjectPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GeneratorConfig = serde_json::from_str(json)
            .map_err(|e| Error::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.algorithm.key_type() == KeyType::Rsa && self.rsa_key_bits < MIN_RSA_KEY_BITS {
            return Err(Error::invalid_config(format!(
                "RSA keys must be at least {} bits, {} configured", MIN_RSA_KEY_BITS, self.rsa_key_bits
            )));
        }
        if self.provider_timeout_ms == Some(0) {
            return Err(Error::invalid_config("provider_timeout_ms must be positive"));
        }
        Ok(())
    }

    pub fn provider_timeout(&self) -> Option<Duration> {
        self.provider_timeout_ms.map(Duration::from_millis)
    }

    pub fn key_spec(&self) -> KeySpec {
        KeySpec { algorithm: self.algorithm, rsa_bits: self.rsa_key_bits }
    }
}
