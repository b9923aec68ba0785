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

//! Integration tests for path parsing, navigation and value assertions

use api_assert::{
    IndexPolicy, NavigationFault, Navigator, Node, NullPolicy, ResponseValidator,
    ValidationError, ValidatorConfig, assert_path_exists, assert_value_equals, parse,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

const ITEMS: &str = r#"{"data":{"items":[{"name":"x"},{"name":"y"}]}}"#;

fn lenient() -> ResponseValidator {
    ResponseValidator::new()
        .with_config(ValidatorConfig::new().with_index_policy(IndexPolicy::Lenient))
}

#[test]
fn test_indexed_value_matches() {
    let validator = ResponseValidator::new();
    validator
        .validate_value(Some(ITEMS), "data.items[1].name", "y")
        .unwrap();
}

#[test]
fn test_index_past_end_is_invalid_path() {
    let validator = ResponseValidator::new();
    let err = validator
        .validate_value(Some(ITEMS), "data.items[5].name", "y")
        .unwrap_err();

    assert!(err.is_invalid_path());
    let message = err.to_string();
    assert!(message.contains("data.items[5].name"), "{message}");
    assert!(message.contains("out of bounds"), "{message}");
}

#[test]
fn test_index_past_end_under_lenient_policy() {
    let validator = lenient();
    assert_eq!(validator.extract(Some(ITEMS), "data.items[5]").unwrap(), None);
    let err = validator
        .validate_value(Some(ITEMS), "data.items[5]", "y")
        .unwrap_err();
    assert!(err.is_assertion());
}

#[rstest]
#[case("")]
#[case("   ")]
fn test_empty_body_is_skipped(#[case] body: &str) {
    let validator = ResponseValidator::new();
    assert_eq!(validator.json_from_str(Some(body)).unwrap(), None);
    validator.validate_value(Some(body), "data.items[1].name", "y").unwrap();
    validator.validate_contains(Some(body), "data", "data missing").unwrap();
}

#[test]
fn test_absent_body_is_skipped() {
    let validator = ResponseValidator::new();
    assert_eq!(validator.json_from_str(None).unwrap(), None);
    validator.validate_value(None, "status", "ok").unwrap();
    validator.validate_contains(None, "status", "status missing").unwrap();
}

#[rstest]
#[case("ok", true)]
#[case("OK", false)]
#[case("ok ", false)]
fn test_comparison_is_case_and_whitespace_sensitive(#[case] expected: &str, #[case] passes: bool) {
    let validator = ResponseValidator::new();
    let outcome = validator.validate_value(Some(r#"{"status":"ok"}"#), "status", expected);
    assert_eq!(outcome.is_ok(), passes);
}

#[rstest]
#[case(r#"{"n":42}"#, "42")]
#[case(r#"{"n":"42"}"#, "42")]
#[case(r#"{"n":-3.25}"#, "-3.25")]
#[case(r#"{"n":true}"#, "true")]
#[case(r#"{"n":false}"#, "false")]
#[case(r#"{"n":123456789012345678901234}"#, "123456789012345678901234")]
#[case(r#"{"n":1.50}"#, "1.5")]
#[case(r#"{"n":1e2}"#, "100.0")]
fn test_comparison_is_type_lenient(#[case] body: &str, #[case] expected: &str) {
    ResponseValidator::new()
        .validate_value(Some(body), "n", expected)
        .unwrap();
}

#[test]
fn test_typed_expected_values() {
    let validator = ResponseValidator::new();
    let body = r#"{"count":42,"active":true}"#;
    validator.validate_value(Some(body), "count", 42).unwrap();
    validator.validate_value(Some(body), "active", true).unwrap();
    assert!(validator.validate_value(Some(body), "count", "42.0").is_err());
}

#[test]
fn test_mismatch_reports_both_values() {
    let validator = ResponseValidator::new();
    let err = validator
        .validate_value(Some(r#"{"status":"ok"}"#), "status", "OK")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validating JSON value at path: status: expected 'OK', actual 'ok'"
    );
}

#[test]
fn test_missing_key_fails_existence_with_message() {
    let validator = ResponseValidator::new();
    let err = validator
        .validate_contains(Some(r#"{"a":{}}"#), "a.b", "b missing")
        .unwrap_err();
    assert!(err.is_assertion());
    assert!(err.to_string().starts_with("b missing"));
}

#[test]
fn test_explicit_null_is_present_by_default() {
    let validator = ResponseValidator::new();
    validator
        .validate_contains(Some(r#"{"a":{"b":null}}"#), "a.b", "b missing")
        .unwrap();
}

#[test]
fn test_explicit_null_as_missing() {
    let validator = ResponseValidator::new()
        .with_config(ValidatorConfig::new().with_null_policy(NullPolicy::Missing));
    let err = validator
        .validate_contains(Some(r#"{"a":{"b":null}}"#), "a.b", "b missing")
        .unwrap_err();
    assert!(err.to_string().starts_with("b missing"));
}

#[test]
fn test_null_and_missing_differ_at_navigation() {
    let doc = json!({"a": {"b": null}});
    let null = api_assert::navigate(Node::from(&doc), &parse("a.b").unwrap());
    let missing = api_assert::navigate(Node::from(&doc), &parse("a.c").unwrap());
    assert_eq!(null, Ok(Node::Null));
    assert_eq!(missing, Ok(Node::Missing));

    assert!(assert_path_exists("a.b", null, "m", NullPolicy::Present).is_ok());
    assert!(assert_path_exists("a.c", missing, "m", NullPolicy::Present).is_err());
}

#[rstest]
#[case("status.code", NavigationFault::NotAnObject { found: "string" })]
#[case("status[0]", NavigationFault::NotAnArray { found: "string" })]
#[case("list.first", NavigationFault::NotAnObject { found: "array" })]
#[case("nothing[0]", NavigationFault::NotAnArray { found: "missing" })]
#[case("list[3]", NavigationFault::IndexOutOfBounds { index: 3, len: 2 })]
fn test_wrong_shape_faults(#[case] path: &str, #[case] expected: NavigationFault) {
    let doc = json!({"status": "ok", "list": [1, 2]});
    let err = Navigator::new()
        .navigate(Node::from(&doc), &parse(path).unwrap())
        .unwrap_err();
    assert_eq!(err.reason, expected);
}

#[test]
fn test_navigation_stops_at_first_fault() {
    let doc = json!({"a": "leaf"});
    let err = Navigator::new()
        .navigate(Node::from(&doc), &parse("a.b.c.d").unwrap())
        .unwrap_err();
    assert_eq!(err.segment, "b");
    assert_eq!(err.position, 2);
}

#[rstest]
#[case("data.items[x].name")]
#[case("data..items")]
#[case("")]
fn test_malformed_paths(#[case] path: &str) {
    let err = ResponseValidator::new()
        .validate_value(Some(ITEMS), path, "x")
        .unwrap_err();
    assert!(matches!(err, ValidationError::InvalidPath(_)), "{err:?}");
}

#[test]
fn test_every_present_scalar_matches_its_own_text() {
    let doc: Value = json!({
        "s": "text",
        "i": 7,
        "neg": -12,
        "f": 0.5,
        "b": true,
        "nested": {"deep": {"leaf": "z"}},
        "arr": [{"v": 1}, {"v": "two"}]
    });
    let paths = [
        ("s", "text"),
        ("i", "7"),
        ("neg", "-12"),
        ("f", "0.5"),
        ("b", "true"),
        ("nested.deep.leaf", "z"),
        ("arr[0].v", "1"),
        ("arr[1].v", "two"),
    ];

    for (path, text) in paths {
        let json_path = parse(path).unwrap();
        let result = Navigator::new().navigate(Node::from(&doc), &json_path);
        assert_value_equals(path, result, text).unwrap();
    }
}

#[test]
fn test_body_that_is_not_json() {
    let err = ResponseValidator::new()
        .validate_value(Some("<html></html>"), "a", "b")
        .unwrap_err();
    assert!(matches!(err, ValidationError::Parse { .. }));
}

#[test]
fn test_checks_share_one_document_across_threads() {
    let validator = ResponseValidator::new();
    let document = validator.json_from_str(Some(ITEMS)).unwrap().unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..2)
            .map(|i| {
                let document = &document;
                let validator = &validator;
                scope.spawn(move || {
                    let path = format!("data.items[{i}].name");
                    validator
                        .query(document, &path)
                        .unwrap()
                        .canonical_text()
                        .map(|t| t.into_owned())
                })
            })
            .collect();

        let names: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(names, vec![Some("x".to_string()), Some("y".to_string())]);
    });
}
