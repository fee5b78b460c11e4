//! Tests for JSON Pointer parsing and lookup.

use dynval::JsonPointer;
use serde_json::json;

#[test]
fn empty_and_slash_address_root() {
    let data = json!({"a": 1});
    assert!(JsonPointer::parse("").is_root());
    assert!(JsonPointer::parse("/").is_root());
    assert_eq!(JsonPointer::parse("").lookup(&data), Some(&data));
    assert_eq!(JsonPointer::parse("/").lookup(&data), Some(&data));
}

#[test]
fn object_segments_index_by_key() {
    let data = json!({"user": {"profile": {"name": "Ada"}}});
    assert_eq!(
        JsonPointer::parse("/user/profile/name").lookup(&data),
        Some(&json!("Ada"))
    );
}

#[test]
fn leading_slash_is_optional() {
    assert_eq!(JsonPointer::parse("user/name"), JsonPointer::parse("/user/name"));
}

#[test]
fn array_segments_index_by_position() {
    let data = json!({"items": ["a", "b", "c"]});
    assert_eq!(JsonPointer::parse("/items/2").lookup(&data), Some(&json!("c")));
}

#[test]
fn bad_array_index_is_absent() {
    let data = json!({"items": ["a"]});
    assert_eq!(JsonPointer::parse("/items/5").lookup(&data), None);
    assert_eq!(JsonPointer::parse("/items/first").lookup(&data), None);
    assert_eq!(JsonPointer::parse("/items/-1").lookup(&data), None);
}

#[test]
fn missing_key_is_absent() {
    let data = json!({"a": {"b": 1}});
    assert_eq!(JsonPointer::parse("/a/c").lookup(&data), None);
    assert_eq!(JsonPointer::parse("/x/y/z").lookup(&data), None);
}

#[test]
fn scalars_cannot_be_descended() {
    let data = json!({"a": "text"});
    assert_eq!(JsonPointer::parse("/a/0").lookup(&data), None);
}

#[test]
fn escapes_are_decoded() {
    let data = json!({"a/b": 1, "m~n": 2, "~1": 3});
    assert_eq!(JsonPointer::parse("/a~1b").lookup(&data), Some(&json!(1)));
    assert_eq!(JsonPointer::parse("/m~0n").lookup(&data), Some(&json!(2)));
    // `~01` is `~1`, not `/`
    assert_eq!(JsonPointer::parse("/~01").lookup(&data), Some(&json!(3)));
}

#[test]
fn display_re_escapes_segments() {
    let pointer = JsonPointer::from_segments(["a/b", "m~n", "0"]);
    assert_eq!(pointer.to_string(), "/a~1b/m~0n/0");
    assert_eq!(JsonPointer::parse(&pointer.to_string()), pointer);
    assert_eq!(JsonPointer::root().to_string(), "/");
}

#[test]
fn explicit_null_is_found() {
    let data = json!({"a": null});
    assert_eq!(JsonPointer::parse("/a").lookup(&data), Some(&json!(null)));
}
