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

//! Path segment types produced by the parser

use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

use super::span::Spanned;

/// One navigational step of a path expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PathSegment {
    /// Object member access (`name`)
    Field(String),
    /// Object member access followed by array indexing (`name[2]`)
    IndexedField(String, usize),
}

impl PathSegment {
    /// Field name the segment resolves against the current object
    pub fn name(&self) -> &str {
        match self {
            PathSegment::Field(name) | PathSegment::IndexedField(name, _) => name,
        }
    }

    /// Array index, if the segment carries one
    pub fn index(&self) -> Option<usize> {
        match self {
            PathSegment::Field(_) => None,
            PathSegment::IndexedField(_, index) => Some(*index),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{name}"),
            PathSegment::IndexedField(name, index) => write!(f, "{name}[{index}]"),
        }
    }
}

/// A parsed path expression: the source text and its ordered segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonPath {
    source: String,
    segments: SmallVec<[Spanned<PathSegment>; 4]>,
}

impl JsonPath {
    pub(crate) fn new(source: &str, segments: SmallVec<[Spanned<PathSegment>; 4]>) -> Self {
        Self {
            source: source.to_string(),
            segments,
        }
    }

    /// The expression this path was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Segments with their byte spans in the source
    pub fn segments(&self) -> &[Spanned<PathSegment>] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a successfully parsed path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over the bare segments
    pub fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter().map(|spanned| &spanned.value)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
