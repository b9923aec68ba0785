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

//! Response validator - the main entry point for test steps
//!
//! Wires the path pipeline (parse, navigate, assert) to its collaborators: the
//! response being checked, a [`Reporter`] for diagnostics, a [`VariableStore`]
//! shared between steps and a [`SchemaValidator`].

use log::Level;
use std::fmt;
use std::sync::Arc;

use crate::assertion::{assert_path_exists, assert_value_equals};
use crate::config::ValidatorConfig;
use crate::error::{Result, ValidationError};
use crate::evaluator::{Navigator, QueryResult};
use crate::model::{Document, Node};
use crate::parser::parse;
use crate::reporter::{LogReporter, Reporter};
use crate::response::ApiResponse;
use crate::schema::{JsonSchemaValidator, SchemaSource, SchemaValidator};
use crate::variables::{InMemoryVariables, VariableStore};

/// Extracts values from response bodies and asserts on them
#[derive(Clone)]
pub struct ResponseValidator {
    config: ValidatorConfig,
    reporter: Arc<dyn Reporter>,
    variables: Arc<dyn VariableStore>,
    schema_validator: Arc<dyn SchemaValidator>,
}

impl Default for ResponseValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResponseValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseValidator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ResponseValidator {
    /// Create a validator that logs through `log` and keeps variables in memory
    pub fn new() -> Self {
        Self {
            config: ValidatorConfig::default(),
            reporter: Arc::new(LogReporter),
            variables: Arc::new(InMemoryVariables::new()),
            schema_validator: Arc::new(JsonSchemaValidator),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the diagnostics sink
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replace the variable store
    pub fn with_variables(mut self, variables: Arc<dyn VariableStore>) -> Self {
        self.variables = variables;
        self
    }

    /// Replace the schema validator
    pub fn with_schema_validator(mut self, schema_validator: Arc<dyn SchemaValidator>) -> Self {
        self.schema_validator = schema_validator;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Read the body of `response` as text; an absent body reads as empty
    pub fn response_body<R: ApiResponse + ?Sized>(&self, response: Option<&R>) -> Result<String> {
        let response =
            response.ok_or_else(|| self.fail(ValidationError::null_input("get response body")))?;
        let body = response
            .body()
            .map_err(|e| self.fail(e))?
            .unwrap_or_default();

        if let Some(content_type) = response.content_type() {
            self.reporter.log(Level::Debug, &format!("Content Type : {content_type}"));
        }
        if self.config.log_bodies {
            self.reporter.info(&format!("Response Body : {body}"));
        } else {
            self.reporter.info(&format!("Response Body : <{} bytes>", body.len()));
        }
        Ok(body)
    }

    /// Read the status code of `response`
    pub fn status_code<R: ApiResponse + ?Sized>(&self, response: Option<&R>) -> Result<u16> {
        let response =
            response.ok_or_else(|| self.fail(ValidationError::null_input("get status code")))?;
        let code = response.status_code();
        self.reporter.info(&format!("Status Code : {code}"));
        Ok(code)
    }

    /// Parse the body of `response`; `None` when the body is empty
    pub fn json_from_response<R: ApiResponse + ?Sized>(
        &self,
        response: Option<&R>,
    ) -> Result<Option<Document>> {
        if response.is_none() {
            return Err(self.fail(ValidationError::null_input("get json node")));
        }
        let body = self.response_body(response)?;
        self.json_from_str(Some(body.as_str()))
    }

    /// Parse raw body text; `None` when the text is absent or blank
    pub fn json_from_str(&self, body: Option<&str>) -> Result<Option<Document>> {
        let Some(body) = body.filter(|text| !text.trim().is_empty()) else {
            self.reporter.warn("Response body is empty or null");
            return Ok(None);
        };

        Document::parse(body)
            .map(Some)
            .map_err(|e| self.fail(ValidationError::parse(&e)))
    }

    /// Store the body of `response` under `key` for later steps
    pub fn set_response_variable<R: ApiResponse + ?Sized>(
        &self,
        response: Option<&R>,
        key: &str,
    ) -> Result<()> {
        if response.is_none() {
            return Err(self.fail(ValidationError::null_input("set response variable")));
        }
        let body = self.response_body(response)?;
        self.variables.set(key, body);
        Ok(())
    }

    /// Read a variable stored by an earlier step
    pub fn variable(&self, key: &str) -> Option<String> {
        self.variables.get(key)
    }

    /// Check the body of `response` against a JSON Schema
    ///
    /// An empty body skips the check.
    pub fn validate_schema<R: ApiResponse + ?Sized>(
        &self,
        response: Option<&R>,
        schema: &SchemaSource,
    ) -> Result<()> {
        let Some(document) = self.json_from_response(response)? else {
            self.reporter
                .warn("Response is null, so skipping the schema validation");
            return Ok(());
        };

        let schema = schema.load().map_err(|e| self.fail(e))?;
        let report = self
            .schema_validator
            .validate(document.value(), &schema)
            .map_err(|e| self.fail(e))?;

        if !report.success {
            return Err(self.fail(ValidationError::Schema {
                diagnostics: report.diagnostics,
            }));
        }
        self.reporter.info("JSON Schema validation passed");
        Ok(())
    }

    /// Check that the value at `path` renders to the same text as `expected`
    ///
    /// An empty body skips the check.
    pub fn validate_value(
        &self,
        body: Option<&str>,
        path: &str,
        expected: impl fmt::Display,
    ) -> Result<()> {
        let Some(document) = self.document_or_skip(body, path)? else {
            return Ok(());
        };

        let expected = expected.to_string();
        let result = self.resolve(&document, path)?;
        assert_value_equals(path, result, &expected).map_err(|e| self.fail(e))?;

        self.reporter
            .info(&format!("Validated JSON value at path: {path} equals '{expected}'"));
        Ok(())
    }

    /// Check that something is present at `path`, failing with `message` otherwise
    ///
    /// An empty body skips the check.
    pub fn validate_contains(&self, body: Option<&str>, path: &str, message: &str) -> Result<()> {
        let Some(document) = self.document_or_skip(body, path)? else {
            return Ok(());
        };

        let result = self.resolve(&document, path)?;
        assert_path_exists(path, result, message, self.config.null_policy)
            .map_err(|e| self.fail(e))?;

        self.reporter.info(&format!("Validated JSON path exists: {path}"));
        Ok(())
    }

    /// Text of the value at `path`; `None` for empty bodies and for null or
    /// missing values
    ///
    /// Scalars yield their canonical text. Objects and arrays yield their
    /// compact JSON serialization so they can be reused as request payloads.
    pub fn extract(&self, body: Option<&str>, path: &str) -> Result<Option<String>> {
        let Some(document) = self.document_or_skip(body, path)? else {
            return Ok(None);
        };

        let node = self.query(&document, path)?;
        let text = match node {
            Node::Object(_) | Node::Array(_) => node.to_value().map(|value| value.to_string()),
            _ => node.canonical_text().map(|text| text.into_owned()),
        };
        Ok(text)
    }

    /// Extract the value at `path` and store it under `key`
    ///
    /// Nothing is stored when the value is absent.
    pub fn extract_to_variable(
        &self,
        body: Option<&str>,
        path: &str,
        key: &str,
    ) -> Result<Option<String>> {
        let value = self.extract(body, path)?;
        match &value {
            Some(text) => {
                self.variables.set(key, text.clone());
                self.reporter
                    .info(&format!("Stored value of {path} as variable {key}"));
            }
            None => self
                .reporter
                .warn(&format!("No value at {path}, variable {key} not set")),
        }
        Ok(value)
    }

    /// Resolve `path` in an already parsed document
    pub fn query<'d>(&self, document: &'d Document, path: &str) -> Result<Node<'d>> {
        self.resolve(document, path)?
            .map_err(|source| {
                self.fail(ValidationError::Navigation {
                    path: path.to_string(),
                    source,
                })
            })
    }

    /// Log and return a request body unchanged
    pub fn create_request_body(&self, body: &str, content_type: &str) -> String {
        self.reporter.info(&format!(
            "The request body is {body} and the content type is {content_type}"
        ));
        body.to_string()
    }

    fn document_or_skip(&self, body: Option<&str>, path: &str) -> Result<Option<Document>> {
        let document = self.json_from_str(body)?;
        if document.is_none() {
            self.reporter
                .warn(&format!("Response body is null, skipping the validation of {path}"));
        }
        Ok(document)
    }

    /// Parse `path` and walk it; only a malformed path is an error here
    fn resolve<'d>(&self, document: &'d Document, path: &str) -> Result<QueryResult<'d>> {
        let json_path = parse(path).map_err(|e| self.fail(e.into()))?;
        let navigator = Navigator::with_index_policy(self.config.index_policy);
        Ok(navigator.navigate(document.root(), &json_path))
    }

    fn fail(&self, error: ValidationError) -> ValidationError {
        self.reporter.error(&error.to_string());
        error
    }
}
