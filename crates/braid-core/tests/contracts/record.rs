//! 记录与字段编解码器的契约测试。
//!
//! 重点是三种可选字段在“缺失”与“存在但畸形”两种输入下的差异。

use braid_core::prelude::*;
use braid_core::{INT, LONG, PathSegment, STRING, fixed_length, propagating_optional_field_of};
use tracing_test::traced_test;

#[derive(Clone, Debug, PartialEq)]
struct Bounds {
    min: Vec<i32>,
    max: Vec<i32>,
}

fn bounds_codec() -> impl Codec<Value = Bounds> {
    let corner = || fixed_length(INT.list_of(), 3);
    corner()
        .field_of("min")
        .and(corner().field_of("max"))
        .xmap(
            |(min, max)| Bounds { min, max },
            |bounds: &Bounds| (bounds.min.clone(), bounds.max.clone()),
        )
        .codec()
}

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::int))
}

fn field(name: &str, value: Value) -> (Value, Value) {
    (Value::from(name), value)
}

#[test]
fn record_round_trips_and_emits_fields_in_declaration_order() {
    let bounds = Bounds {
        min: vec![0, 0, 0],
        max: vec![4, 5, 6],
    };
    let codec = bounds_codec();
    let encoded = codec.encode(&bounds, &ValueOps).into_result().unwrap();
    assert_eq!(
        encoded,
        Value::map(vec![
            field("min", ints(&[0, 0, 0])),
            field("max", ints(&[4, 5, 6])),
        ])
    );
    assert_eq!(
        codec.decode(&ValueOps, &encoded).into_result().unwrap(),
        bounds
    );
}

#[test]
fn record_ignores_unknown_fields() {
    let input = Value::map(vec![
        field("comment", Value::from("ignored")),
        field("min", ints(&[1, 2, 3])),
        field("max", ints(&[4, 5, 6])),
    ]);
    assert!(bounds_codec().decode(&ValueOps, &input).is_success());
}

#[test]
fn record_requires_a_map() {
    let error = bounds_codec()
        .decode(&ValueOps, &ints(&[1, 2, 3]))
        .into_result()
        .unwrap_err();
    assert_eq!(error.to_string(), "Expected map, found list");
}

#[test]
fn missing_required_field_names_the_field() {
    let input = Value::map(vec![field("min", ints(&[1, 2, 3]))]);
    let error = bounds_codec()
        .decode(&ValueOps, &input)
        .into_result()
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MissingField);
    assert_eq!(error.to_string(), "No key max in map");
}

#[test]
fn failures_in_both_fields_are_merged_in_order() {
    let input = Value::map(vec![
        field("min", ints(&[1, 2])),
        field("max", Value::from("far")),
    ]);
    let error = bounds_codec()
        .decode(&ValueOps, &input)
        .into_result()
        .unwrap_err();
    assert_eq!(
        error.to_string(),
        "min: Input is not a list of 3 elements; max: Not a list: String(\"far\")"
    );
}

#[test]
fn fixed_length_violation_is_located_by_field() {
    let input = Value::map(vec![
        field("min", ints(&[1, 2, 3])),
        field("max", ints(&[4, 5, 6, 7])),
    ]);
    let error = bounds_codec()
        .decode(&ValueOps, &input)
        .into_result()
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ValidationFailure);
    assert_eq!(error.path(), &[PathSegment::Field("max".into())]);
}

fn retries() -> impl Codec<Value = i64> {
    propagating_optional_field_of(LONG, "retries", || 3).codec()
}

#[test]
fn propagating_optional_field_uses_default_only_when_absent() {
    let decoded = retries().decode(&ValueOps, &Value::map(vec![]));
    assert_eq!(decoded.value(), Some(&3));
    assert!(decoded.warnings().is_empty());

    let present = Value::map(vec![field("retries", Value::int(9))]);
    assert_eq!(retries().decode(&ValueOps, &present).value(), Some(&9));
}

#[test]
fn propagating_optional_field_never_falls_back_on_malformed_input() {
    let malformed = Value::map(vec![field("retries", Value::from("many"))]);
    let result = retries().decode(&ValueOps, &malformed);
    let error = result.error_ref().expect("malformed field must fail");
    assert_eq!(error.kind(), ErrorKind::ShapeMismatch);
    assert_eq!(
        error.to_string(),
        "retries: Not a number: String(\"many\")"
    );
}

#[test]
fn propagating_optional_field_always_encodes_the_field() {
    let encoded = retries().encode(&3, &ValueOps).into_result().unwrap();
    assert_eq!(encoded, Value::map(vec![field("retries", Value::int(3))]));
}

#[test]
fn strict_optional_field_distinguishes_absent_from_malformed() {
    let codec = STRING.strict_optional_field_of("label").codec();
    assert_eq!(
        codec.decode(&ValueOps, &Value::map(vec![])).value(),
        Some(&None)
    );
    let malformed = Value::map(vec![field("label", Value::int(1))]);
    assert!(codec.decode(&ValueOps, &malformed).is_error());

    let encoded = codec.encode(&None, &ValueOps).into_result().unwrap();
    assert_eq!(encoded, Value::map(vec![]));
}

#[test]
#[traced_test]
fn lenient_optional_field_turns_malformed_values_into_warnings() {
    let codec = STRING.optional_field_of("label").codec();
    let malformed = Value::map(vec![field("label", Value::int(1))]);

    let decoded = codec.decode(&ValueOps, &malformed);
    assert_eq!(decoded.value(), Some(&None));
    assert_eq!(
        decoded.warnings(),
        ["Ignored malformed optional field: label: Not a string: Number(Int(1))"]
    );
    assert!(logs_contain("ignoring malformed optional field"));
}

#[test]
fn first_matching_key_wins_for_duplicate_fields() {
    let codec = STRING.field_of("label").codec();
    let input = Value::map(vec![
        field("label", Value::from("first")),
        field("label", Value::from("second")),
    ]);
    assert_eq!(
        codec.decode(&ValueOps, &input).value(),
        Some(&"first".to_owned())
    );
}
