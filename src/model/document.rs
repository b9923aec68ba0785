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

//! Parsed JSON documents

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::node::Node;

/// An immutable JSON tree parsed once from a response body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Parse a document from raw text
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text).map(|root| Self { root })
    }

    /// Root of the tree
    pub fn root(&self) -> Node<'_> {
        Node::from(&self.root)
    }

    /// Raw access to the underlying JSON value
    pub fn value(&self) -> &Value {
        &self.root
    }

    /// Take ownership of the underlying JSON value
    pub fn into_value(self) -> Value {
        self.root
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self { root }
    }
}

impl FromStr for Document {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
