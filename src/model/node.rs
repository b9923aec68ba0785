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

//! Borrowed view over a parsed JSON tree
//!
//! [`Node`] makes the shape of every element explicit, including the
//! [`Node::Missing`] sentinel which stands for "this key did not exist" and is
//! never confused with an explicit JSON `null`.

use serde_json::{Map, Number, Value};
use std::borrow::Cow;
use std::fmt;

/// Scalar JSON value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// String value
    String(&'a str),
    /// Number value, kept with the digits it was parsed from
    Number(&'a Number),
    /// Boolean value
    Bool(bool),
}

/// One element of a parsed JSON tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    /// Object with members in document order
    Object(&'a Map<String, Value>),
    /// Array of elements
    Array(&'a [Value]),
    /// String, number or boolean
    Scalar(Scalar<'a>),
    /// Explicit JSON `null`
    Null,
    /// Key absent from its parent object
    Missing,
}

impl<'a> From<&'a Value> for Node<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Object(members) => Node::Object(members),
            Value::Array(items) => Node::Array(items),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Number(n) => Node::Scalar(Scalar::Number(n)),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(*b)),
            Value::Null => Node::Null,
        }
    }
}

impl<'a> Node<'a> {
    /// Lift an optional lookup result, mapping absence to [`Node::Missing`]
    pub fn from_lookup(value: Option<&'a Value>) -> Self {
        value.map_or(Node::Missing, Node::from)
    }

    /// Look up a member of an object node
    ///
    /// Returns `None` when this node is not an object, and `Some(Node::Missing)`
    /// when the object has no such key.
    pub fn member(&self, name: &str) -> Option<Node<'a>> {
        match self {
            Node::Object(members) => Some(Node::from_lookup(members.get(name))),
            _ => None,
        }
    }

    /// Short name of the node's shape, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Object(_) => "object",
            Node::Array(_) => "array",
            Node::Scalar(Scalar::String(_)) => "string",
            Node::Scalar(Scalar::Number(_)) => "number",
            Node::Scalar(Scalar::Bool(_)) => "boolean",
            Node::Null => "null",
            Node::Missing => "missing",
        }
    }

    /// Check if the node is the "key absent" sentinel
    pub fn is_missing(&self) -> bool {
        matches!(self, Node::Missing)
    }

    /// Check if the node is an explicit `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Canonical text form used for type-lenient comparison
    ///
    /// Strings render without quotes and booleans as `true`/`false`. Integer
    /// literals keep every digit, however large. Other numbers render as their
    /// shortest `f64` form, so `1.50` becomes `1.5` and `1e2` becomes `100.0`.
    /// Containers render as an empty string. `Null` and `Missing` have no text
    /// at all.
    pub fn canonical_text(&self) -> Option<Cow<'a, str>> {
        match *self {
            Node::Scalar(Scalar::String(s)) => Some(Cow::Borrowed(s)),
            Node::Scalar(Scalar::Number(n)) => Some(Cow::Owned(number_text(n))),
            Node::Scalar(Scalar::Bool(true)) => Some(Cow::Borrowed("true")),
            Node::Scalar(Scalar::Bool(false)) => Some(Cow::Borrowed("false")),
            Node::Object(_) | Node::Array(_) => Some(Cow::Borrowed("")),
            Node::Null | Node::Missing => None,
        }
    }

    /// Clone the node back into an owned JSON value; `Missing` has none
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Node::Object(members) => Some(Value::Object((*members).clone())),
            Node::Array(items) => Some(Value::Array(items.to_vec())),
            Node::Scalar(Scalar::String(s)) => Some(Value::String((*s).to_string())),
            Node::Scalar(Scalar::Number(n)) => Some(Value::Number((*n).clone())),
            Node::Scalar(Scalar::Bool(b)) => Some(Value::Bool(*b)),
            Node::Null => Some(Value::Null),
            Node::Missing => None,
        }
    }
}

fn number_text(number: &Number) -> String {
    let literal = number.to_string();
    let digits = literal.strip_prefix('-').unwrap_or(&literal);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return literal;
    }
    number
        .as_f64()
        .and_then(Number::from_f64)
        .map_or(literal, |normalized| normalized.to_string())
}

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_value() {
            Some(value) => write!(f, "{value}"),
            None => f.write_str("<missing>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_member_distinguishes_missing_from_null() {
        let doc = json!({"a": null});
        let root = Node::from(&doc);
        assert_eq!(root.member("a"), Some(Node::Null));
        assert_eq!(root.member("b"), Some(Node::Missing));
    }

    #[test]
    fn test_member_on_non_object() {
        let doc = json!([1, 2]);
        assert_eq!(Node::from(&doc).member("a"), None);
        assert_eq!(Node::Missing.member("a"), None);
        assert_eq!(Node::Null.member("a"), None);
    }

    #[test]
    fn test_canonical_text() {
        let doc = json!({"s": "abc", "i": 42, "f": 1.5, "t": true, "o": {}, "n": null});
        let root = Node::from(&doc);
        let text =
            |key: &str| root.member(key).unwrap().canonical_text().map(|c| c.into_owned());

        assert_eq!(text("s").as_deref(), Some("abc"));
        assert_eq!(text("i").as_deref(), Some("42"));
        assert_eq!(text("f").as_deref(), Some("1.5"));
        assert_eq!(text("t").as_deref(), Some("true"));
        assert_eq!(text("o").as_deref(), Some(""));
        assert_eq!(text("n"), None);
        assert_eq!(text("absent"), None);
    }

    #[test]
    fn test_number_text() {
        let doc: Value = serde_json::from_str(
            r#"{"big": 123456789012345678901234, "neg": -98765432109876543210,
                "trailing": 1.50, "exp": 1e2, "small": -0.25}"#,
        )
        .unwrap();
        let root = Node::from(&doc);
        let text =
            |key: &str| root.member(key).unwrap().canonical_text().map(|c| c.into_owned());

        assert_eq!(text("big").as_deref(), Some("123456789012345678901234"));
        assert_eq!(text("neg").as_deref(), Some("-98765432109876543210"));
        assert_eq!(text("trailing").as_deref(), Some("1.5"));
        assert_eq!(text("exp").as_deref(), Some("100.0"));
        assert_eq!(text("small").as_deref(), Some("-0.25"));
    }

    #[test]
    fn test_type_names() {
        let doc = json!({"s": "x", "a": [], "b": false});
        let root = Node::from(&doc);
        assert_eq!(root.type_name(), "object");
        assert_eq!(root.member("s").unwrap().type_name(), "string");
        assert_eq!(root.member("a").unwrap().type_name(), "array");
        assert_eq!(root.member("b").unwrap().type_name(), "boolean");
        assert_eq!(Node::Missing.type_name(), "missing");
    }

    #[test]
    fn test_display() {
        let doc = json!({"k": [1, "two"]});
        assert_eq!(Node::from(&doc).to_string(), r#"{"k":[1,"two"]}"#);
        assert_eq!(Node::Missing.to_string(), "<missing>");
        assert_eq!(Node::Null.to_string(), "null");
    }
}
