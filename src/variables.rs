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

//! Key/value store for sharing extracted values between test steps

use dashmap::DashMap;

/// Storage for values captured by one step and consumed by a later one
pub trait VariableStore: Send + Sync {
    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: String);

    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Option<String>;

    /// Remove and return the value stored under `key`
    fn remove(&self, key: &str) -> Option<String>;
}

/// Concurrent in-memory variable store
#[derive(Debug, Default)]
pub struct InMemoryVariables {
    values: DashMap<String, String>,
}

impl InMemoryVariables {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl VariableStore for InMemoryVariables {
    fn set(&self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|entry| entry.value().clone())
    }

    fn remove(&self, key: &str) -> Option<String> {
        self.values.remove(key).map(|(_, value)| value)
    }
}
