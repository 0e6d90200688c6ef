//! 组合子契约测试：二选一、列表规范化、变体表、校验与结构化值桥接。

use std::sync::Arc;

use braid_core::prelude::*;
use braid_core::{
    Either, INT, INT_STREAM, PASSTHROUGH, STRING, Shape, array_or_unit, either, keyed_variants,
    list_or_unit, list_to_array, string_variants, with_map, with_value,
};

#[test]
fn either_prefers_the_first_alternative_and_reports_the_relevant_failure() {
    // 列表写法或 "x,y" 字符串写法的二维坐标，统一映射为列表形态。
    let pair = either(
        INT.list_of(),
        STRING.comap_flat_map(
            |text| {
                let parsed: Result<Vec<i32>, _> =
                    text.split(',').map(|part| part.trim().parse::<i32>()).collect();
                match parsed {
                    Ok(values) => DataResult::success(values),
                    Err(error) => DataResult::error(CodecError::validation(format!(
                        "Malformed pair '{text}': {error}"
                    ))),
                }
            },
            |values: &Vec<i32>| {
                values
                    .iter()
                    .map(i32::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            },
        ),
    )
    .xmap(
        |decoded| decoded.fold(|list| list, |list| list),
        |values: &Vec<i32>| Either::Left(values.clone()),
    );

    let from_list = pair.decode(&ValueOps, &Value::list(vec![Value::int(1), Value::int(2)]));
    assert_eq!(from_list.value(), Some(&vec![1, 2]));
    let from_text = pair.decode(&ValueOps, &Value::from("3, 4"));
    assert_eq!(from_text.value(), Some(&vec![3, 4]));

    // 只有字符串分支的形态匹配，因此只返回它的错误。
    let error = pair
        .decode(&ValueOps, &Value::from("3;4"))
        .into_result()
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ValidationFailure);
    assert!(error.message().starts_with("Malformed pair '3;4'"));

    // 编码总是走调用方选定的分支。
    assert_eq!(
        pair.encode(&vec![5, 6], &ValueOps).into_result().unwrap(),
        Value::list(vec![Value::int(5), Value::int(6)])
    );
}

#[test]
fn either_merges_errors_when_neither_shape_matches_uniquely() {
    let codec = either(INT, STRING);
    let error = codec
        .decode(&ValueOps, &Value::Bool(true))
        .into_result()
        .unwrap_err();
    assert_eq!(
        error.message(),
        "Not a number: Bool(true); Not a string: Bool(true)"
    );
}

#[test]
fn list_or_unit_accepts_both_spellings_and_normalizes_on_encode() {
    let codec = list_or_unit(STRING);

    let single = codec.decode(&ValueOps, &Value::from("a")).into_result().unwrap();
    assert_eq!(single, vec!["a".to_owned()]);

    let one_element_list = Value::list(vec![Value::from("a")]);
    let decoded = codec.decode(&ValueOps, &one_element_list).into_result().unwrap();
    assert_eq!(decoded, vec!["a".to_owned()]);
    assert_eq!(
        codec.encode(&decoded, &ValueOps).into_result().unwrap(),
        Value::from("a")
    );

    assert_eq!(
        codec.encode(&vec![], &ValueOps).into_result().unwrap(),
        Value::list(vec![])
    );
    let many = vec!["a".to_owned(), "b".to_owned()];
    assert_eq!(
        codec.encode(&many, &ValueOps).into_result().unwrap(),
        Value::list(vec![Value::from("a"), Value::from("b")])
    );
}

#[test]
fn array_or_unit_uses_a_boxed_slice() {
    let codec = array_or_unit(INT);
    let decoded = codec.decode(&ValueOps, &Value::int(7)).into_result().unwrap();
    assert_eq!(&*decoded, &[7]);
    assert_eq!(
        codec.encode(&decoded, &ValueOps).into_result().unwrap(),
        Value::int(7)
    );

    let arrays = list_to_array(INT_STREAM);
    let boxed = arrays
        .decode(&ValueOps, &Value::list(vec![Value::int(1), Value::int(2)]))
        .into_result()
        .unwrap();
    assert_eq!(&*boxed, &[1, 2]);
}

#[test]
fn list_failures_are_located_by_index_and_carry_no_partial() {
    let input = Value::list(vec![Value::int(1), Value::from("two"), Value::int(3)]);
    let result = INT_STREAM.decode(&ValueOps, &input);
    assert!(result.partial().is_none());
    assert_eq!(
        result.error_ref().unwrap().to_string(),
        "[1]: Not a number: String(\"two\")"
    );
}

#[test]
fn int_rejects_values_outside_i32() {
    let error = INT
        .decode(&ValueOps, &Value::int(i64::from(i32::MAX) + 1))
        .into_result()
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ValidationFailure);
    assert_eq!(error.message(), "Not a 32-bit integer: 2147483648");
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Survival,
    Creative,
    Spectator,
}

impl Mode {
    fn name(&self) -> String {
        match self {
            Mode::Survival => "survival",
            Mode::Creative => "creative",
            Mode::Spectator => "spectator",
        }
        .to_owned()
    }

    fn id(&self) -> i32 {
        *self as i32
    }
}

const MODES: [Mode; 3] = [Mode::Survival, Mode::Creative, Mode::Spectator];

#[test]
fn string_variants_look_up_by_name() {
    let codec = string_variants(MODES, Mode::name).expect("mode names are unique");
    assert_eq!(codec.table().len(), 3);
    assert_eq!(
        codec.decode(&ValueOps, &Value::from("creative")).value(),
        Some(&Mode::Creative)
    );
    assert_eq!(
        codec.encode(&Mode::Spectator, &ValueOps).into_result().unwrap(),
        Value::from("spectator")
    );

    let error = codec
        .decode(&ValueOps, &Value::from("adventure"))
        .into_result()
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::UnknownVariant);
    assert_eq!(error.message(), "No variant with key 'adventure'");
}

#[test]
fn keyed_variants_accept_non_string_keys() {
    let codec = keyed_variants(MODES, Mode::id, INT).expect("mode ids are unique");
    assert_eq!(
        codec.decode(&ValueOps, &Value::int(2)).value(),
        Some(&Mode::Spectator)
    );
    assert_eq!(
        codec.table().keys().copied().collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    let error = codec
        .decode(&ValueOps, &Value::int(9))
        .into_result()
        .unwrap_err();
    assert_eq!(error.message(), "No variant with key '9'");
}

#[test]
fn variant_tables_reject_duplicate_keys() {
    let error = match string_variants(MODES, |_: &Mode| "same".to_owned()) {
        Ok(_) => panic!("duplicate keys must be rejected"),
        Err(error) => error,
    };
    assert_eq!(error.kind(), ErrorKind::DuplicateKey);
    assert_eq!(error.message(), "Duplicate variant key 'same'");
}

#[test]
fn validate_rejects_out_of_range_values_with_a_validation_failure() {
    let port = INT.validate(
        |port| (1..=65_535).contains(port),
        || "Port must be between 1 and 65535".to_owned(),
    );
    assert_eq!(port.decode(&ValueOps, &Value::int(8080)).value(), Some(&8080));

    let error = port
        .decode(&ValueOps, &Value::int(0))
        .into_result()
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ValidationFailure);
    assert_eq!(error.code(), braid_core::codes::VALIDATION_FAILURE);

    let even = INT.validate_with(|value| {
        if value % 2 == 0 {
            DataResult::success(value)
        } else {
            DataResult::error(CodecError::validation(format!("{value} is odd")))
        }
    });
    assert_eq!(
        even.decode(&ValueOps, &Value::int(3))
            .into_result()
            .unwrap_err()
            .message(),
        "3 is odd"
    );
}

#[derive(Debug, Default, PartialEq)]
struct Tag {
    entries: Vec<(String, i64)>,
}

#[test]
fn with_value_and_with_map_bridge_the_in_memory_tree() {
    let raw = with_value(
        |tag: &Tag| {
            Value::map(
                tag.entries
                    .iter()
                    .map(|(k, v)| (Value::from(k.as_str()), Value::int(*v))),
            )
        },
        |value: Value| match value {
            Value::Map(entries) => DataResult::success(Tag {
                entries: entries
                    .into_iter()
                    .filter_map(|(k, v)| match (k, v) {
                        (Value::String(k), Value::Number(n)) => n.as_i64().map(|n| (k, n)),
                        _ => None,
                    })
                    .collect(),
            }),
            other => braid_core::not_a(Shape::Map, &other),
        },
    );
    let tag = Tag {
        entries: vec![("a".to_owned(), 1)],
    };
    let encoded = raw.encode(&tag, &ValueOps).into_result().unwrap();
    assert_eq!(raw.decode(&ValueOps, &encoded).into_result().unwrap(), tag);
    assert!(raw.decode(&ValueOps, &Value::int(1)).is_error());

    let visitor = with_map(
        |tag: &Tag, out: &mut Vec<(Value, Value)>| {
            for (k, v) in &tag.entries {
                out.push((Value::from(k.as_str()), Value::int(*v)));
            }
        },
        |tag: &mut Tag, entries: &[(Value, Value)]| {
            for (k, v) in entries {
                if let (Value::String(k), Value::Number(n)) = (k, v) {
                    tag.entries.push((k.clone(), n.as_i64().unwrap_or_default()));
                }
            }
        },
        Tag::default,
    );
    let encoded = visitor.encode(&tag, &ValueOps).into_result().unwrap();
    assert_eq!(visitor.decode(&ValueOps, &encoded).into_result().unwrap(), tag);
    assert_eq!(
        visitor
            .decode(&ValueOps, &Value::list(vec![]))
            .into_result()
            .unwrap_err()
            .message(),
        "Expected map, found list"
    );
}

#[test]
fn passthrough_snapshots_any_value() {
    let input = Value::map(vec![(Value::from("k"), Value::list(vec![Value::Empty]))]);
    let snapshot = PASSTHROUGH.decode(&ValueOps, &input).into_result().unwrap();
    assert_eq!(snapshot, input);
    assert!(PASSTHROUGH.is_stable());
}

#[test]
fn shared_handles_are_codecs_too() {
    let shared = Arc::new(STRING.list_of());
    let erased = Arc::clone(&shared).erased();
    let input = Value::list(vec![Value::from("x")]);
    assert_eq!(
        shared.decode(&ValueOps, &input).value(),
        erased.decode(&ValueOps, &input).value()
    );
    assert!(erased.is_stable());
}

#[test]
fn normalizing_codecs_are_not_stable_unless_declared() {
    assert!(!list_or_unit(STRING).is_stable());
    assert!(list_or_unit(STRING).stable().is_stable());
    assert!(STRING.xmap(|s| s.len(), |n: &usize| "x".repeat(*n)).is_stable());
}
