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

//! Error types for path navigation

use thiserror::Error;

use crate::model::Node;

/// Result of walking a path: the terminal node or the reason navigation stopped
pub type QueryResult<'a> = Result<Node<'a>, NavigationError>;

/// Why a segment could not be resolved against the current node
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationFault {
    /// Field access on something other than an object
    #[error("expected an object, found {found}")]
    NotAnObject {
        /// Shape of the node actually found
        found: &'static str,
    },

    /// Index access on something other than an array
    #[error("expected an array, found {found}")]
    NotAnArray {
        /// Shape of the node actually found
        found: &'static str,
    },

    /// Index past the end of the array
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Array length
        len: usize,
    },
}

/// Navigation failure at a specific segment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} at segment '{segment}' (position {position})")]
pub struct NavigationError {
    /// What went wrong
    pub reason: NavigationFault,
    /// The failing segment as written in the path
    pub segment: String,
    /// Byte offset of the failing segment in the path
    pub position: usize,
}
