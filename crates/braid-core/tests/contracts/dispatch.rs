//! 按键分派映射的契约测试。
//!
//! 覆盖：非映射输入、按键选择子编解码器、重复键拒绝、首个失败即中止、编码保持插入顺序。

use braid_core::prelude::*;
use braid_core::{INT, LONG, STRING, dispatch_by_map_key};
use indexmap::IndexMap;
use tracing_test::traced_test;

/// 值形态随键变化的配置项。
#[derive(Clone, Debug, PartialEq)]
enum Setting {
    Timeout(i64),
    Hosts(Vec<String>),
    Label(String),
}

fn timeout_codec() -> ErasedCodec<Setting> {
    LONG.flat_xmap(
        |ms| DataResult::success(Setting::Timeout(ms)),
        |setting: &Setting| match setting {
            Setting::Timeout(ms) => DataResult::success(*ms),
            other => DataResult::error(CodecError::encode(format!("Not a timeout: {other:?}"))),
        },
    )
    .erased()
}

fn hosts_codec() -> ErasedCodec<Setting> {
    STRING
        .list_of()
        .flat_xmap(
            |hosts| DataResult::success(Setting::Hosts(hosts)),
            |setting: &Setting| match setting {
                Setting::Hosts(hosts) => DataResult::success(hosts.clone()),
                other => DataResult::error(CodecError::encode(format!("Not hosts: {other:?}"))),
            },
        )
        .erased()
}

fn label_codec() -> ErasedCodec<Setting> {
    STRING
        .flat_xmap(
            |label| DataResult::success(Setting::Label(label)),
            |setting: &Setting| match setting {
                Setting::Label(label) => DataResult::success(label.clone()),
                other => DataResult::error(CodecError::encode(format!("Not a label: {other:?}"))),
            },
        )
        .erased()
}

fn resolve(key: &String) -> ErasedCodec<Setting> {
    match key.as_str() {
        "timeout" => timeout_codec(),
        "hosts" => hosts_codec(),
        _ => label_codec(),
    }
}

fn settings_codec() -> impl Codec<Value = IndexMap<String, Setting>> {
    dispatch_by_map_key(STRING, resolve)
}

fn entry(key: &str, value: Value) -> (Value, Value) {
    (Value::from(key), value)
}

#[test]
fn each_entry_is_decoded_with_the_codec_its_key_selects() {
    let input = Value::map(vec![
        entry("timeout", Value::int(250)),
        entry("hosts", Value::list(vec![Value::from("a"), Value::from("b")])),
        entry("name", Value::from("edge")),
    ]);

    let decoded = settings_codec()
        .decode(&ValueOps, &input)
        .into_result()
        .expect("well-formed settings decode");

    assert_eq!(
        decoded.into_iter().collect::<Vec<_>>(),
        vec![
            ("timeout".to_owned(), Setting::Timeout(250)),
            (
                "hosts".to_owned(),
                Setting::Hosts(vec!["a".to_owned(), "b".to_owned()])
            ),
            ("name".to_owned(), Setting::Label("edge".to_owned())),
        ]
    );
}

#[test]
fn non_map_input_is_a_shape_mismatch() {
    let error = settings_codec()
        .decode(&ValueOps, &Value::from("timeout"))
        .into_result()
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ShapeMismatch);
    assert_eq!(error.to_string(), "Expected map, found string");
}

#[test]
fn duplicate_keys_fail_regardless_of_order() {
    for input in [
        Value::map(vec![
            entry("name", Value::from("a")),
            entry("timeout", Value::int(1)),
            entry("name", Value::from("b")),
        ]),
        Value::map(vec![
            entry("name", Value::from("b")),
            entry("name", Value::from("a")),
        ]),
    ] {
        let result = settings_codec().decode(&ValueOps, &input);
        let error = result.error_ref().expect("duplicate key must fail");
        assert_eq!(error.kind(), ErrorKind::DuplicateKey);
        assert_eq!(error.code(), braid_core::codes::DUPLICATE_KEY);
        assert!(result.partial().is_none());
    }
}

#[test]
fn a_failing_value_aborts_the_whole_map_with_key_context() {
    let input = Value::map(vec![
        entry("name", Value::from("edge")),
        entry("timeout", Value::from("soon")),
        entry("hosts", Value::list(vec![])),
    ]);

    let result = settings_codec().decode(&ValueOps, &input);
    assert!(result.is_error());
    assert!(result.partial().is_none());

    let error = result.error_ref().unwrap();
    assert_eq!(error.kind(), ErrorKind::ShapeMismatch);
    assert!(error.is_nested());
    assert_eq!(error.to_string(), "[timeout]: Not a number: String(\"soon\")");
}

#[test]
fn nested_value_failures_keep_the_full_path() {
    let input = Value::map(vec![entry(
        "hosts",
        Value::list(vec![Value::from("a"), Value::int(7)]),
    )]);

    let error = settings_codec()
        .decode(&ValueOps, &input)
        .into_result()
        .unwrap_err();
    assert_eq!(error.to_string(), "[hosts][1]: Not a string: Number(Int(7))");
}

#[test]
fn a_failing_key_aborts_with_the_raw_key_in_context() {
    let input = Value::map(vec![
        entry("name", Value::from("edge")),
        (Value::int(3), Value::from("x")),
        entry("timeout", Value::int(10)),
    ]);

    let result = settings_codec().decode(&ValueOps, &input);
    assert!(result.partial().is_none());

    let error = result.into_result().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::ShapeMismatch);
    assert_eq!(error.path().len(), 1);
    assert!(error.to_string().starts_with("[Number(Int(3))]: "));
}

#[test]
fn encode_preserves_insertion_order_and_round_trips() {
    let mut settings = IndexMap::new();
    settings.insert("name".to_owned(), Setting::Label("edge".to_owned()));
    settings.insert("timeout".to_owned(), Setting::Timeout(30));
    settings.insert("hosts".to_owned(), Setting::Hosts(vec!["h".to_owned()]));

    let codec = settings_codec();
    let encoded = codec.encode(&settings, &ValueOps).into_result().unwrap();
    assert_eq!(
        encoded,
        Value::map(vec![
            entry("name", Value::from("edge")),
            entry("timeout", Value::int(30)),
            entry("hosts", Value::list(vec![Value::from("h")])),
        ])
    );

    let decoded = codec.decode(&ValueOps, &encoded).into_result().unwrap();
    assert_eq!(decoded, settings);
}

#[test]
fn encode_failures_carry_the_entry_key() {
    let mut settings = IndexMap::new();
    settings.insert("timeout".to_owned(), Setting::Label("oops".to_owned()));

    let error = settings_codec()
        .encode(&settings, &ValueOps)
        .into_result()
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Encode);
    assert_eq!(error.to_string(), "[timeout]: Not a timeout: Label(\"oops\")");
}

#[test]
fn narrowing_value_codecs_reject_out_of_range_values_on_encode() {
    let codec = dispatch_by_map_key(STRING, |key: &String| {
        if key.starts_with('i') {
            INT.flat_xmap(
                |v| DataResult::success(i64::from(v)),
                |v: &i64| match i32::try_from(*v) {
                    Ok(v) => DataResult::success(v),
                    Err(_) => {
                        DataResult::error(CodecError::encode(format!("{v} does not fit in an int")))
                    }
                },
            )
            .erased()
        } else {
            LONG.erased()
        }
    });

    let mut values = IndexMap::new();
    values.insert("l0".to_owned(), i64::MAX);
    values.insert("i1".to_owned(), 7);
    let encoded = codec.encode(&values, &ValueOps).into_result().unwrap();
    assert_eq!(codec.decode(&ValueOps, &encoded).into_result().unwrap(), values);

    values.insert("i2".to_owned(), i64::from(i32::MAX) + 1);
    let error = codec.encode(&values, &ValueOps).into_result().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Encode);
    assert_eq!(error.to_string(), "[i2]: 2147483648 does not fit in an int");
}

#[test]
#[traced_test]
fn aborted_decodes_are_logged_with_their_stage() {
    let input = Value::map(vec![entry("timeout", Value::from("soon"))]);
    let _ = settings_codec().decode(&ValueOps, &input);
    assert!(logs_contain("dispatch map decode aborted"));
    assert!(logs_contain("decoding_value"));
}
