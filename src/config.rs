// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Validator configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ValidationError};

/// How an array index past the end of the array is treated during navigation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPolicy {
    /// Out-of-range index is a navigation fault
    #[default]
    Strict,
    /// Out-of-range index resolves to a missing node
    Lenient,
}

/// How an explicit `null` is treated by existence checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// A key holding `null` exists
    #[default]
    Present,
    /// A key holding `null` counts as missing
    Missing,
}

/// Configuration for [`ResponseValidator`](crate::ResponseValidator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Out-of-range array index handling
    pub index_policy: IndexPolicy,
    /// Explicit `null` handling in existence checks
    pub null_policy: NullPolicy,
    /// Log full response bodies; when off only their length is logged
    pub log_bodies: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            index_policy: IndexPolicy::Strict,
            null_policy: NullPolicy::Present,
            log_bodies: true,
        }
    }
}

impl ValidatorConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the out-of-range index policy
    pub fn with_index_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = policy;
        self
    }

    /// Set the explicit-null policy
    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.null_policy = policy;
        self
    }

    /// Toggle full body logging
    pub fn with_log_bodies(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }

    /// Load a configuration from a JSON file; absent fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ValidationError::Config {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        serde_json::from_str(&text).map_err(|e| ValidationError::Config {
            message: format!("invalid configuration in {}: {e}", path.display()),
        })
    }
}
