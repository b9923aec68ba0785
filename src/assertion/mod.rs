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

//! Value comparison and existence checks over navigation results
//!
//! Comparison is textual, not typed: a node is rendered to its canonical text
//! form and compared against the expected value's `Display` output, so the
//! number `42` equals the string `"42"`. Case and whitespace are significant.

use std::fmt;
use thiserror::Error;

use crate::config::NullPolicy;
use crate::error::{Result, ValidationError};
use crate::evaluator::QueryResult;
use crate::model::Node;

/// A check that navigated successfully but did not hold
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssertionError {
    /// The value at the path differs from the expected one
    #[error("Validating JSON value at path: {path}: expected '{expected}', actual {}", render_actual(.actual))]
    ValueMismatch {
        /// Path expression
        path: String,
        /// Expected text
        expected: String,
        /// Actual canonical text; `None` for null or missing
        actual: Option<String>,
    },

    /// Nothing present at the path
    #[error("{message} (path: {path})")]
    Missing {
        /// Path expression
        path: String,
        /// Caller supplied failure message
        message: String,
    },
}

fn render_actual(actual: &Option<String>) -> String {
    match actual {
        Some(text) => format!("'{text}'"),
        None => "<absent>".to_string(),
    }
}

/// Compare the node at `path` against `expected` by canonical text
pub fn assert_value_equals(
    path: &str,
    result: QueryResult<'_>,
    expected: impl fmt::Display,
) -> Result<()> {
    let node = found(path, result)?;
    let expected = expected.to_string();
    let actual = node.canonical_text();

    if actual.as_deref() == Some(expected.as_str()) {
        return Ok(());
    }

    Err(AssertionError::ValueMismatch {
        path: path.to_string(),
        expected,
        actual: actual.map(|text| text.into_owned()),
    }
    .into())
}

/// Check that something is present at `path`
///
/// `Missing` always fails with `message`; an explicit `null` fails only under
/// [`NullPolicy::Missing`].
pub fn assert_path_exists(
    path: &str,
    result: QueryResult<'_>,
    message: &str,
    null_policy: NullPolicy,
) -> Result<()> {
    let absent = match found(path, result)? {
        Node::Missing => true,
        Node::Null => null_policy == NullPolicy::Missing,
        _ => false,
    };

    if absent {
        return Err(AssertionError::Missing {
            path: path.to_string(),
            message: message.to_string(),
        }
        .into());
    }
    Ok(())
}

fn found<'a>(path: &str, result: QueryResult<'a>) -> Result<Node<'a>> {
    result.map_err(|source| ValidationError::Navigation {
        path: path.to_string(),
        source,
    })
}
