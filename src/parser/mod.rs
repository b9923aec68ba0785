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

//! Path expression parser
//!
//! Splits a dotted/bracketed path such as `data.items[2].name` into an
//! ordered sequence of [`PathSegment`]s. The grammar is intentionally small:
//!
//! ```text
//! path    := segment ('.' segment)*
//! segment := fieldName ('[' digits ']')?
//! ```
//!
//! There is no escaping: a field name can never contain `.` or `[`.

pub mod error;
pub mod segment;
pub mod span;

pub use error::{ParseResult, PathParseError};
pub use segment::{JsonPath, PathSegment};
pub use span::Spanned;

use smallvec::SmallVec;

/// Parse a path expression into its segments
///
/// # Examples
///
/// ```
/// use api_assert::parser::{parse, PathSegment};
///
/// let path = parse("data.items[1].name").unwrap();
/// let segments: Vec<_> = path.iter().cloned().collect();
/// assert_eq!(
///     segments,
///     vec![
///         PathSegment::Field("data".into()),
///         PathSegment::IndexedField("items".into(), 1),
///         PathSegment::Field("name".into()),
///     ]
/// );
/// ```
pub fn parse(path: &str) -> ParseResult<JsonPath> {
    if path.is_empty() {
        return Err(PathParseError::EmptyPath);
    }

    let mut segments = SmallVec::new();
    let mut start = 0;
    for component in path.split('.') {
        let end = start + component.len();
        if component.is_empty() {
            return Err(PathParseError::EmptyComponent {
                path: path.to_string(),
                position: start,
            });
        }
        segments.push(Spanned::new(parse_component(component, start)?, start, end));
        // skip the '.' separator
        start = end + 1;
    }

    Ok(JsonPath::new(path, segments))
}

fn parse_component(component: &str, position: usize) -> ParseResult<PathSegment> {
    let Some((name, rest)) = component.split_once('[') else {
        return Ok(PathSegment::Field(component.to_string()));
    };

    // Only the text up to the closing bracket counts; stray characters in it are dropped.
    let bracketed = rest.split(']').next().unwrap_or_default();
    let digits: String = bracketed.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(PathParseError::MissingIndex {
            component: component.to_string(),
            position,
        });
    }

    let index = digits
        .parse::<usize>()
        .map_err(|_| PathParseError::IndexOverflow {
            component: component.to_string(),
            position,
        })?;

    Ok(PathSegment::IndexedField(name.to_string(), index))
}
