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

//! JSON response assertions for API test suites
//!
//! Extracts values from HTTP response bodies with dotted/bracketed paths such as
//! `data.items[2].name`, asserts on them, and checks bodies against JSON Schemas.
//!
//! ```
//! use api_assert::ResponseValidator;
//!
//! let validator = ResponseValidator::new();
//! let body = r#"{"data":{"items":[{"name":"x"},{"name":"y"}]}}"#;
//!
//! validator.validate_value(Some(body), "data.items[1].name", "y").unwrap();
//! validator.validate_contains(Some(body), "data.items", "items missing").unwrap();
//! assert!(validator.validate_value(Some(body), "data.items[5].name", "y").is_err());
//! ```

pub mod assertion;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;
pub mod reporter;
pub mod response;
pub mod schema;
pub mod variables;

// Re-export main types
pub use assertion::{AssertionError, assert_path_exists, assert_value_equals};
pub use config::{IndexPolicy, NullPolicy, ValidatorConfig};
pub use engine::ResponseValidator;
pub use error::{Result, ValidationError};
pub use evaluator::{NavigationError, NavigationFault, Navigator, QueryResult, navigate};
pub use model::{Document, Node, Scalar};
pub use parser::{JsonPath, PathParseError, PathSegment, parse};
pub use reporter::{LogReporter, RecordingReporter, Reporter};
pub use response::{ApiResponse, ResponseSnapshot};
pub use schema::{JsonSchemaValidator, SchemaReport, SchemaSource, SchemaValidator};
pub use variables::{InMemoryVariables, VariableStore};
