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

//! JSON Schema validation
//!
//! Validation itself is delegated to the `jsonschema` crate. The validator only
//! needs a pass/fail verdict and human-readable diagnostics back.

use serde_json::Value;
use std::path::PathBuf;

use crate::error::{Result, ValidationError};

/// Where a schema document comes from
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSource {
    /// Schema file on disk
    Path(PathBuf),
    /// Raw schema text
    Text(String),
    /// Already parsed schema
    Value(Value),
}

impl SchemaSource {
    /// Schema read from a file
    pub fn path(path: impl Into<PathBuf>) -> Self {
        SchemaSource::Path(path.into())
    }

    /// Schema given as raw text
    pub fn text(text: impl Into<String>) -> Self {
        SchemaSource::Text(text.into())
    }

    /// Read and parse the schema document
    pub fn load(&self) -> Result<Value> {
        match self {
            SchemaSource::Path(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| ValidationError::SchemaLoad {
                    message: format!("cannot read schema {}: {e}", path.display()),
                })?;
                parse_schema(&text)
            }
            SchemaSource::Text(text) => parse_schema(text),
            SchemaSource::Value(value) => Ok(value.clone()),
        }
    }
}

fn parse_schema(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| ValidationError::SchemaLoad {
        message: format!("schema is not valid JSON: {e}"),
    })
}

/// Outcome of validating one document against one schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    /// Whether the document conforms
    pub success: bool,
    /// One line per violation; empty on success
    pub diagnostics: String,
}

impl SchemaReport {
    /// A passing report
    pub fn passed() -> Self {
        Self {
            success: true,
            diagnostics: String::new(),
        }
    }
}

/// Validates documents against schemas
pub trait SchemaValidator: Send + Sync {
    /// Validate `document` against `schema`
    ///
    /// Returns an error only when the schema itself is unusable; violations
    /// are reported through [`SchemaReport`].
    fn validate(&self, document: &Value, schema: &Value) -> Result<SchemaReport>;
}

/// [`SchemaValidator`] backed by the `jsonschema` crate; the draft is detected
/// from the schema's `$schema` keyword
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, document: &Value, schema: &Value) -> Result<SchemaReport> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| ValidationError::SchemaLoad {
                message: format!("schema does not compile: {e}"),
            })?;

        let violations: Vec<String> = validator
            .iter_errors(document)
            .map(|error| {
                let location = error.instance_path.to_string();
                let location = if location.is_empty() { "/" } else { &location };
                format!("- {error} (at {location})")
            })
            .collect();

        if violations.is_empty() {
            return Ok(SchemaReport::passed());
        }
        Ok(SchemaReport {
            success: false,
            diagnostics: violations.join("\n"),
        })
    }
}
