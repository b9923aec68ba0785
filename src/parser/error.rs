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

//! Error types for path expression parsing

use thiserror::Error;

/// Result type for path parsing operations
pub type ParseResult<T> = Result<T, PathParseError>;

/// Errors that can occur while splitting a path expression into segments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// The path expression has no content
    #[error("Path expression is empty")]
    EmptyPath,

    /// A dot-delimited component has no content (`a..b`, leading or trailing `.`)
    #[error("Empty path component at position {position} in '{path}'")]
    EmptyComponent {
        /// Full path expression
        path: String,
        /// Byte offset of the empty component
        position: usize,
    },

    /// The brackets of a component hold no digits
    #[error("Missing array index in component '{component}' at position {position}")]
    MissingIndex {
        /// Offending component
        component: String,
        /// Byte offset of the component
        position: usize,
    },

    /// The digits inside the brackets do not fit an index
    #[error("Array index in component '{component}' at position {position} is too large")]
    IndexOverflow {
        /// Offending component
        component: String,
        /// Byte offset of the component
        position: usize,
    },
}

impl PathParseError {
    /// Byte offset of the offending component, if any
    pub fn position(&self) -> Option<usize> {
        match self {
            PathParseError::EmptyPath => None,
            PathParseError::EmptyComponent { position, .. }
            | PathParseError::MissingIndex { position, .. }
            | PathParseError::IndexOverflow { position, .. } => Some(*position),
        }
    }
}
