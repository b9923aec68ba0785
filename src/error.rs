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

//! Error types for response validation

use thiserror::Error;

use crate::assertion::AssertionError;
use crate::evaluator::NavigationError;
use crate::parser::PathParseError;

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors surfaced to the calling test step
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The response or document handed in is absent
    #[error("Response is null, unable to {context}")]
    NullInput {
        /// The operation that needed the input
        context: String,
    },

    /// The response body could not be read
    #[error("Error while reading the response body: {message}")]
    Body {
        /// Underlying read failure
        message: String,
    },

    /// The body text is not valid JSON
    #[error("Error while processing the json response: {message}")]
    Parse {
        /// Parser diagnostic
        message: String,
    },

    /// The path expression is malformed
    #[error("Invalid json path: {0}")]
    InvalidPath(#[from] PathParseError),

    /// The path could not be walked through the document
    #[error("Invalid json path '{path}': {source}")]
    Navigation {
        /// Path expression being evaluated
        path: String,
        /// Where and why navigation stopped
        #[source]
        source: NavigationError,
    },

    /// Navigation succeeded but the check did not hold
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// The document does not conform to the schema
    #[error("JSON Schema validation failed: {diagnostics}")]
    Schema {
        /// Validator diagnostics
        diagnostics: String,
    },

    /// The schema could not be read, parsed or compiled
    #[error("Exception occurred during schema validation: {message}")]
    SchemaLoad {
        /// Underlying failure
        message: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config {
        /// Underlying failure
        message: String,
    },
}

impl ValidationError {
    /// Create a null-input error for the named operation
    pub fn null_input(context: impl Into<String>) -> Self {
        ValidationError::NullInput {
            context: context.into(),
        }
    }

    /// Create a parse error from a JSON parser diagnostic
    pub fn parse(err: &serde_json::Error) -> Self {
        ValidationError::Parse {
            message: err.to_string(),
        }
    }

    /// Check whether the failure came from a malformed or unwalkable path
    pub fn is_invalid_path(&self) -> bool {
        matches!(
            self,
            ValidationError::InvalidPath(_) | ValidationError::Navigation { .. }
        )
    }

    /// Check whether the failure is a failed comparison or existence check
    pub fn is_assertion(&self) -> bool {
        matches!(self, ValidationError::Assertion(_))
    }
}
