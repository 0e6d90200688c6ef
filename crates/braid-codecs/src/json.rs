//! JSON 后端：以 `serde_json::Value` 为结构化值的 [`Ops`] 实现。
//!
//! # 契约说明（What）
//! - `null` 对应 [`Shape::Empty`]；
//! - 整数保存为 `i64`，超出范围的无符号整数与小数以 `f64` 读出；
//! - JSON 不能表示 `NaN`/无穷大，写入时退化为 `null`；
//! - 对象键只能是字符串：字符串键原样使用，其他形态的键写为其 JSON 文本（例如数字键 `3` 写为 `"3"`）。
//!   由于 `create_map` 不可失败，这一转换是固定策略而非错误；
//! - 转换后文本相同的键（例如 `3` 与 `"3"`）会合并为一个条目：保留首次出现的位置，值取最后一次写入；
//! - 因此以非字符串键编解码器（例如 `INT`）构造的分派映射经本后端编码后无法再用同一编解码器解码。
//!
//! 依赖 `serde_json` 的 `preserve_order`，对象条目按插入顺序保存。

use braid_core::combinator::WithOps;
use braid_core::{DataResult, Number, Ops, Shape, not_a, with_ops};
use serde_json::{Map, Value as Json};

/// `serde_json` 后端。
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonOps;

impl Ops for JsonOps {
    type Value = Json;

    fn empty(&self) -> Json {
        Json::Null
    }

    fn create_bool(&self, value: bool) -> Json {
        Json::Bool(value)
    }

    fn create_number(&self, value: Number) -> Json {
        match value {
            Number::Int(value) => Json::from(value),
            Number::Float(value) => serde_json::Number::from_f64(value)
                .map(Json::Number)
                .unwrap_or(Json::Null),
        }
    }

    fn create_string(&self, value: &str) -> Json {
        Json::String(value.to_owned())
    }

    fn create_list(&self, items: Vec<Json>) -> Json {
        Json::Array(items)
    }

    fn create_map(&self, entries: Vec<(Json, Json)>) -> Json {
        let mut object = Map::with_capacity(entries.len());
        for (key, value) in entries {
            let key = match key {
                Json::String(key) => key,
                other => {
                    let rendered = other.to_string();
                    tracing::debug!(
                        target: "braid::json",
                        key = %rendered,
                        "non-string object key stored as its JSON text"
                    );
                    rendered
                }
            };
            object.insert(key, value);
        }
        Json::Object(object)
    }

    fn shape(&self, value: &Json) -> Shape {
        match value {
            Json::Null => Shape::Empty,
            Json::Bool(_) => Shape::Bool,
            Json::Number(_) => Shape::Number,
            Json::String(_) => Shape::String,
            Json::Array(_) => Shape::List,
            Json::Object(_) => Shape::Map,
        }
    }

    fn get_bool(&self, value: &Json) -> DataResult<bool> {
        match value {
            Json::Bool(value) => DataResult::success(*value),
            other => not_a(Shape::Bool, other),
        }
    }

    fn get_number(&self, value: &Json) -> DataResult<Number> {
        match value {
            Json::Number(number) => match number.as_i64() {
                Some(value) => DataResult::success(Number::Int(value)),
                None => match number.as_f64() {
                    Some(value) => DataResult::success(Number::Float(value)),
                    None => not_a(Shape::Number, number),
                },
            },
            other => not_a(Shape::Number, other),
        }
    }

    fn get_string(&self, value: &Json) -> DataResult<String> {
        match value {
            Json::String(value) => DataResult::success(value.clone()),
            other => not_a(Shape::String, other),
        }
    }

    fn get_list(&self, value: &Json) -> DataResult<Vec<Json>> {
        match value {
            Json::Array(items) => DataResult::success(items.clone()),
            other => not_a(Shape::List, other),
        }
    }

    fn get_map_entries(&self, value: &Json) -> DataResult<Vec<(Json, Json)>> {
        match value {
            Json::Object(object) => DataResult::success(
                object
                    .iter()
                    .map(|(key, value)| (Json::String(key.clone()), value.clone()))
                    .collect(),
            ),
            other => not_a(Shape::Map, other),
        }
    }
}

/// 以 JSON 为原生格式的 [`with_ops`]。
pub fn with_json<A, E, D>(encode: E, decode: D) -> WithOps<JsonOps, A, E, D>
where
    A: Send + Sync + 'static,
    E: Fn(&A) -> Json + Send + Sync + 'static,
    D: Fn(Json) -> DataResult<A> + Send + Sync + 'static,
{
    with_ops(JsonOps, encode, decode)
}
