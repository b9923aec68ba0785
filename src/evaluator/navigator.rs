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

//! Tree navigation for parsed path expressions
//!
//! Walks a document from its root through each segment in order. Navigation
//! stops at the first segment that cannot be resolved against the shape of
//! the current node; there is no partial result.

use crate::config::IndexPolicy;
use crate::model::Node;
use crate::parser::{JsonPath, PathSegment, Spanned};

use super::error::{NavigationError, NavigationFault, QueryResult};

/// Resolves [`JsonPath`]s against document trees
#[derive(Debug, Clone, Copy, Default)]
pub struct Navigator {
    index_policy: IndexPolicy,
}

impl Navigator {
    /// Create a navigator with the default (strict) index policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a navigator with an explicit index policy
    pub fn with_index_policy(index_policy: IndexPolicy) -> Self {
        Self { index_policy }
    }

    /// Walk `path` starting at `root`
    pub fn navigate<'a>(&self, root: Node<'a>, path: &JsonPath) -> QueryResult<'a> {
        let mut current = root;
        for segment in path.segments() {
            current = self.step(current, segment)?;
        }
        Ok(current)
    }

    fn step<'a>(&self, current: Node<'a>, segment: &Spanned<PathSegment>) -> QueryResult<'a> {
        match &segment.value {
            PathSegment::Field(name) => Self::field(current, name, segment),
            PathSegment::IndexedField(name, index) => {
                match Self::field(current, name, segment)? {
                    Node::Array(items) => match items.get(*index) {
                        Some(item) => Ok(Node::from(item)),
                        None => match self.index_policy {
                            IndexPolicy::Strict => Err(fault(
                                NavigationFault::IndexOutOfBounds {
                                    index: *index,
                                    len: items.len(),
                                },
                                segment,
                            )),
                            IndexPolicy::Lenient => Ok(Node::Missing),
                        },
                    },
                    other => Err(fault(
                        NavigationFault::NotAnArray {
                            found: other.type_name(),
                        },
                        segment,
                    )),
                }
            }
        }
    }

    fn field<'a>(
        current: Node<'a>,
        name: &str,
        segment: &Spanned<PathSegment>,
    ) -> QueryResult<'a> {
        current.member(name).ok_or_else(|| {
            fault(
                NavigationFault::NotAnObject {
                    found: current.type_name(),
                },
                segment,
            )
        })
    }
}

fn fault(reason: NavigationFault, segment: &Spanned<PathSegment>) -> NavigationError {
    NavigationError {
        reason,
        segment: segment.value.to_string(),
        position: segment.start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use serde_json::{Value, json};

    fn sample() -> Value {
        json!({"data": {"items": [{"name": "x"}, {"name": "y"}], "count": 2, "empty": null}})
    }

    fn text(navigator: &Navigator, doc: &Value, path: &str) -> Option<String> {
        let path = parse(path).unwrap();
        navigator
            .navigate(Node::from(doc), &path)
            .unwrap()
            .canonical_text()
            .map(|t| t.into_owned())
    }

    #[test]
    fn test_field_and_index_navigation() {
        let doc = sample();
        let navigator = Navigator::new();
        assert_eq!(text(&navigator, &doc, "data.items[1].name").as_deref(), Some("y"));
        assert_eq!(text(&navigator, &doc, "data.count").as_deref(), Some("2"));
    }

    #[test]
    fn test_absent_key_is_missing() {
        let doc = sample();
        let path = parse("data.nope").unwrap();
        assert_eq!(Navigator::new().navigate(Node::from(&doc), &path), Ok(Node::Missing));
    }

    #[test]
    fn test_explicit_null_is_null() {
        let doc = sample();
        let path = parse("data.empty").unwrap();
        assert_eq!(Navigator::new().navigate(Node::from(&doc), &path), Ok(Node::Null));
    }

    #[test]
    fn test_field_on_scalar_fails() {
        let doc = sample();
        let path = parse("data.count.value").unwrap();
        let err = Navigator::new().navigate(Node::from(&doc), &path).unwrap_err();
        assert_eq!(
            err,
            NavigationError {
                reason: NavigationFault::NotAnObject { found: "number" },
                segment: "value".into(),
                position: 11,
            }
        );
    }

    #[test]
    fn test_field_through_missing_fails() {
        let doc = sample();
        let path = parse("data.nope.deeper").unwrap();
        let err = Navigator::new().navigate(Node::from(&doc), &path).unwrap_err();
        assert_eq!(err.reason, NavigationFault::NotAnObject { found: "missing" });
    }

    #[test]
    fn test_index_into_non_array_fails() {
        let doc = sample();
        let path = parse("data.count[0]").unwrap();
        let err = Navigator::new().navigate(Node::from(&doc), &path).unwrap_err();
        assert_eq!(err.reason, NavigationFault::NotAnArray { found: "number" });
        assert_eq!(err.segment, "count[0]");
    }

    #[test]
    fn test_index_out_of_bounds_strict() {
        let doc = sample();
        let path = parse("data.items[5].name").unwrap();
        let err = Navigator::new().navigate(Node::from(&doc), &path).unwrap_err();
        assert_eq!(err.reason, NavigationFault::IndexOutOfBounds { index: 5, len: 2 });
    }

    #[test]
    fn test_index_out_of_bounds_lenient() {
        let doc = sample();
        let navigator = Navigator::with_index_policy(IndexPolicy::Lenient);

        let path = parse("data.items[5]").unwrap();
        assert_eq!(navigator.navigate(Node::from(&doc), &path), Ok(Node::Missing));

        // a missing element still has the wrong shape for further field access
        let path = parse("data.items[5].name").unwrap();
        assert!(navigator.navigate(Node::from(&doc), &path).is_err());
    }

    #[test]
    fn test_root_must_be_object() {
        let doc = json!([1, 2, 3]);
        let path = parse("first").unwrap();
        let err = Navigator::new().navigate(Node::from(&doc), &path).unwrap_err();
        assert_eq!(err.reason, NavigationFault::NotAnObject { found: "array" });
        assert_eq!(
            err.to_string(),
            "expected an object, found array at segment 'first' (position 0)"
        );
    }
}
