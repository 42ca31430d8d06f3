//! End-to-end lookup tests against serde-reflected host structs and JSON
//! documents, covering direct access, indexed access, fan-out and errors.

use std::collections::BTreeMap;

use lookup_core::{
    lookup, lookup_str, to_value, IndexSyntax, LookupError, LookupOptions, Resolved, Resolver,
    Value,
};
use serde::Serialize;
use serde_json::json;

// ============================================================================
// Fixtures
// ============================================================================

/// Host struct reflected into a `Value::Record`. `Option<Box<_>>` plays the
/// part of a nullable pointer.
#[derive(Serialize, Clone, Default)]
#[serde(rename_all = "PascalCase")]
struct MyStruct {
    string: String,
    map: BTreeMap<String, i32>,
    nested: Option<Box<MyStruct>>,
    struct_slice: Vec<Option<Box<MyStruct>>>,
}

fn leaf(s: &str) -> Option<Box<MyStruct>> {
    Some(Box::new(MyStruct {
        string: s.to_string(),
        ..MyStruct::default()
    }))
}

fn my_struct() -> MyStruct {
    let map = BTreeMap::from([("foo".to_string(), 42)]);
    MyStruct {
        string: "foo".into(),
        map: map.clone(),
        nested: None,
        struct_slice: vec![
            Some(Box::new(MyStruct {
                string: "foo".into(),
                map: map.clone(),
                nested: None,
                struct_slice: vec![leaf("bar"), leaf("foo")],
            })),
            Some(Box::new(MyStruct {
                string: "qux".into(),
                map,
                nested: None,
                struct_slice: vec![leaf("qux"), leaf("baz")],
            })),
        ],
    }
}

fn fixture() -> Value {
    to_value(&my_struct()).unwrap()
}

fn strings(items: &[&str]) -> Value {
    Value::from(items.to_vec())
}

fn not_found(key: &str) -> LookupError {
    LookupError::KeyNotFound { key: key.into() }
}

// ============================================================================
// 1. Direct access
// ============================================================================

#[test]
fn lookup_map_key() {
    let map = Value::mapping([("foo", Value::from(42))]);
    assert_eq!(lookup(&map, &["foo"]).unwrap(), Value::from(42));
}

#[test]
fn lookup_map_key_returns_the_entry_itself() {
    let map = Value::mapping([("foo", Value::from(42))]);
    let found = lookup(&map, &["foo"]).unwrap().as_single().unwrap();
    let entry = map.get_key("foo").unwrap();
    assert!(std::ptr::eq(found, entry));
}

#[test]
fn lookup_struct_field() {
    let root = fixture();
    assert_eq!(lookup(&root, &["String"]).unwrap(), Value::from("foo"));
}

#[test]
fn lookup_through_pointer_root() {
    let root = Value::some(fixture());
    assert_eq!(lookup(&root, &["String"]).unwrap(), Value::from("foo"));
}

#[test]
fn lookup_struct_then_map() {
    let root = fixture();
    assert_eq!(lookup(&root, &["Map", "foo"]).unwrap(), Value::from(42));
}

#[test]
fn empty_path_returns_root() {
    let root = fixture();
    let empty: [&str; 0] = [];
    let found = lookup(&root, &empty).unwrap();
    assert!(std::ptr::eq(found.as_single().unwrap(), &root));
}

#[test]
fn empty_path_on_absent_root_is_not_found() {
    let empty: [&str; 0] = [];
    let err = lookup(&Value::none(), &empty).unwrap_err();
    assert_eq!(err, LookupError::KeyNotFound { key: String::new() });
}

#[test]
fn empty_path_unwraps_wrapped_root() {
    let root = Value::some(Value::some(1));
    let empty: [&str; 0] = [];
    assert_eq!(lookup(&root, &empty).unwrap(), Value::from(1));
}

#[test]
fn owned_segments_are_accepted() {
    let root = fixture();
    let path = vec!["Map".to_string(), "foo".to_string()];
    assert_eq!(lookup(&root, &path).unwrap(), Value::from(42));
}

// ============================================================================
// 2. Indexed access
// ============================================================================

#[test]
fn indexed_segment_selects_one_element() {
    let root = fixture();
    let found = lookup(&root, &["StructSlice[0]", "String"]).unwrap();
    assert_eq!(found, Value::from("foo"));
    assert!(found.as_single().is_some(), "indexed access must not aggregate");
}

#[test]
fn indexed_segment_in_dotted_path() {
    let root = fixture();
    assert_eq!(lookup_str(&root, "StructSlice[0].Map.foo").unwrap(), Value::from(42));
    assert_eq!(lookup_str(&root, "StructSlice[1].String").unwrap(), Value::from("qux"));
}

/// The index on the inner `StructSlice` still applies when each element sits
/// behind an `Option<Box<_>>` wrapper.
#[test]
fn index_is_kept_through_pointer_elements() {
    let root = fixture();
    let found = lookup_str(&root, "StructSlice.StructSlice[0].String").unwrap();
    assert_eq!(found, strings(&["bar", "qux"]));
}

// ============================================================================
// 3. Fan-out
// ============================================================================

#[test]
fn fan_out_collects_scalars() {
    let root = fixture();
    let found = lookup(&root, &["StructSlice", "Map", "foo"]).unwrap();
    assert_eq!(found, Value::from(vec![42, 42]));
    assert!(matches!(found, Resolved::Merged(_)));
}

#[test]
fn nested_fan_out_flattens() {
    let root = fixture();
    let found = lookup(&root, &["StructSlice", "StructSlice", "String"]).unwrap();
    assert_eq!(found, strings(&["bar", "foo", "qux", "baz"]));
}

#[test]
fn fan_out_from_root_sequence() {
    let root = Value::from(json!([{"a": 1}, {"a": 2}, {"a": 3}]));
    assert_eq!(lookup_str(&root, "a").unwrap(), Value::from(vec![1, 2, 3]));
}

#[test]
fn fan_out_flattens_sequence_results() {
    let root = Value::from(json!({
        "servers": [
            {"ports": [80, 443]},
            {"ports": [8080]}
        ]
    }));
    assert_eq!(
        lookup_str(&root, "servers.ports").unwrap(),
        Value::from(vec![80, 443, 8080])
    );
}

#[test]
fn fan_out_spreads_mapping_values() {
    let root = Value::from(json!({
        "groups": [
            {"m": {"a": 1, "b": 2}},
            {"m": {"c": 3}}
        ]
    }));
    assert_eq!(lookup_str(&root, "groups.m").unwrap(), Value::from(vec![1, 2, 3]));
}

#[test]
fn nested_fan_out_over_json_arrays() {
    let root = Value::from(json!({"rows": [{"inner": [{"id": 1}]}, {"inner": [{"id": 2}]}]}));
    let found = lookup_str(&root, "rows.inner.id").unwrap();
    assert_eq!(found, Value::from(vec![1, 2]));
}

#[test]
fn fan_out_drops_absent_results() {
    let root = Value::from(json!({
        "items": [
            {"note": null},
            {"note": "keep"},
            {"note": null}
        ]
    }));
    assert_eq!(lookup_str(&root, "items.note").unwrap(), strings(&["keep"]));
}

#[test]
fn fan_out_with_only_absent_results_is_not_found() {
    let root = fixture();
    assert_eq!(
        lookup(&root, &["StructSlice", "Nested"]).unwrap_err(),
        not_found("Nested")
    );
}

#[test]
fn fan_out_over_empty_sequence_is_not_found() {
    let root = Value::from(json!({"items": []}));
    assert_eq!(lookup_str(&root, "items.name").unwrap_err(), not_found("name"));
}

#[test]
fn fan_out_fails_fast_on_first_element_error() {
    let root = Value::from(json!({
        "items": [
            {"name": "a"},
            {"other": "b"},
            {"name": "c"}
        ]
    }));
    assert_eq!(lookup_str(&root, "items.name").unwrap_err(), not_found("name"));
}

#[test]
fn fan_out_mixed_results_append_after_scalar() {
    let root = Value::from(json!({"rows": [{"v": 1}, {"v": [2, 3]}]}));
    let expected = Value::Sequence(vec![Value::from(1), Value::from(vec![2, 3])]);
    assert_eq!(lookup_str(&root, "rows.v").unwrap(), expected);
}

#[test]
fn fan_out_mixed_results_spread_after_sequence() {
    let root = Value::from(json!({"rows": [{"v": [1, 2]}, {"v": 3}]}));
    assert_eq!(lookup_str(&root, "rows.v").unwrap(), Value::from(vec![1, 2, 3]));
}

#[test]
fn mapping_parent_does_not_fan_out() {
    let root = fixture();
    assert_eq!(lookup(&root, &["Map", "bar"]).unwrap_err(), not_found("bar"));
}

#[test]
fn record_parent_does_not_fan_out() {
    let root = fixture();
    assert_eq!(lookup(&root, &["Nope", "foo"]).unwrap_err(), not_found("Nope"));
}

// ============================================================================
// 4. Errors
// ============================================================================

#[test]
fn missing_key_is_not_found() {
    let root = fixture();
    assert_eq!(lookup_str(&root, "Missing").unwrap_err(), not_found("Missing"));
}

#[test]
fn empty_segment_is_not_found() {
    let root = fixture();
    assert_eq!(lookup_str(&root, "Map..foo").unwrap_err(), not_found(""));
    assert_eq!(lookup_str(&root, "").unwrap_err(), not_found(""));
}

#[test]
fn absent_terminal_value_is_not_found() {
    let root = fixture();
    assert_eq!(lookup_str(&root, "Nested").unwrap_err(), not_found("Nested"));
}

#[test]
fn walking_past_absent_value_is_not_found() {
    let root = fixture();
    assert_eq!(lookup_str(&root, "Nested.String").unwrap_err(), not_found("String"));
}

#[test]
fn json_null_is_absent() {
    let root = Value::from(json!({"a": null}));
    assert_eq!(lookup_str(&root, "a").unwrap_err(), not_found("a"));
}

#[test]
fn index_on_non_sequence_is_invalid_usage() {
    let root = fixture();
    assert_eq!(
        lookup_str(&root, "String[0]").unwrap_err(),
        LookupError::InvalidIndexUsage { key: "String[0]".into() }
    );
}

#[test]
fn index_out_of_bounds_is_not_found() {
    let root = fixture();
    assert_eq!(
        lookup_str(&root, "StructSlice[9].String").unwrap_err(),
        not_found("StructSlice[9]")
    );
}

#[test]
fn malformed_index_is_reported() {
    let root = fixture();
    assert_eq!(
        lookup_str(&root, "StructSlice[x].String").unwrap_err(),
        LookupError::MalformedIndex { segment: "StructSlice[x]".into() }
    );
}

#[test]
fn malformed_index_does_not_fan_out() {
    let root = Value::from(json!({"items": []}));
    assert_eq!(
        lookup_str(&root, "items.name[").unwrap_err(),
        LookupError::MalformedIndex { segment: "name[".into() }
    );
}

#[test]
fn error_messages_name_the_segment() {
    let root = fixture();
    let err = lookup_str(&root, "Missing").unwrap_err();
    assert_eq!(err.to_string(), "unable to find the key 'Missing'");
}

// ============================================================================
// 5. Options
// ============================================================================

#[test]
fn lenient_index_syntax_ignores_trailing_text() {
    let root = fixture();
    let resolver = Resolver::new(LookupOptions {
        index_syntax: IndexSyntax::Lenient,
        ..LookupOptions::default()
    });
    assert_eq!(
        resolver.lookup_str(&root, "StructSlice[1]junk.String").unwrap(),
        Value::from("qux")
    );
    assert!(matches!(
        lookup_str(&root, "StructSlice[1]junk.String").unwrap_err(),
        LookupError::MalformedIndex { .. }
    ));
}

#[test]
fn custom_separator() {
    let root = fixture();
    let resolver = Resolver::new(LookupOptions {
        separator: '/',
        ..LookupOptions::default()
    });
    assert_eq!(
        resolver.lookup_str(&root, "StructSlice/Map/foo").unwrap(),
        Value::from(vec![42, 42])
    );
}

// ============================================================================
// 6. Results
// ============================================================================

#[test]
fn merged_result_serializes_as_json_array() {
    let root = fixture();
    let found = lookup(&root, &["StructSlice", "StructSlice", "String"]).unwrap();
    assert_eq!(
        serde_json::to_value(&found).unwrap(),
        json!(["bar", "foo", "qux", "baz"])
    );
}

#[test]
fn record_result_serializes_as_json_object() {
    let root = fixture();
    let found = lookup_str(&root, "StructSlice[0].StructSlice[1]").unwrap();
    assert_eq!(
        serde_json::to_value(&found).unwrap(),
        json!({"String": "foo", "Map": {}, "Nested": null, "StructSlice": []})
    );
}

#[test]
fn to_value_copies_merged_result() {
    let root = fixture();
    let found = lookup(&root, &["StructSlice", "Map", "foo"]).unwrap();
    assert_eq!(found.to_value(), Value::from(vec![42, 42]));
    assert_eq!(found.as_merged().map(<[_]>::len), Some(2));
}

#[test]
fn single_result_counts_as_one_element() {
    let root = fixture();
    let found = lookup_str(&root, "String").unwrap();
    assert_eq!(found.len(), 1);
    assert!(!found.is_empty());
    assert_eq!(found.iter().collect::<Vec<_>>(), vec![&found]);
}

#[test]
fn merged_result_iterates_in_element_order() {
    let root = fixture();
    let found = lookup(&root, &["StructSlice", "String"]).unwrap();
    assert_eq!(found.len(), 2);
    let items: Vec<Value> = found.iter().map(Resolved::to_value).collect();
    assert_eq!(items, vec![Value::from("foo"), Value::from("qux")]);
}

#[test]
fn empty_merge_is_empty() {
    let merged = Resolved::Merged(Vec::new());
    assert_eq!(merged.len(), 0);
    assert!(merged.is_empty());
    assert_eq!(merged.iter().count(), 0);
}
