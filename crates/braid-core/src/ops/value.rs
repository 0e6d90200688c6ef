use super::{Number, Ops, Shape, not_a};
use crate::result::DataResult;

/// 内存中的结构化值树，即“基于映射的内存树”后端的节点类型。
///
/// # 设计背景（Why）
/// - 对象层编解码器（[`DynCodec`](crate::DynCodec)）需要一个与具体格式无关的中间表示，才能在类型擦除后仍服务任意后端；
/// - 同时也是测试与 `with_value` 桥接的参考后端。
///
/// # 契约说明（What）
/// - `Map` 以有序条目列表保存，键可以是任意形态；条目顺序即插入顺序，重复的原始键可以被表示（由分派编解码器负责拒绝）。
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Empty,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn int(value: i64) -> Self {
        Value::Number(Number::Int(value))
    }

    pub fn float(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Empty => Shape::Empty,
            Value::Bool(_) => Shape::Bool,
            Value::Number(_) => Shape::Number,
            Value::String(_) => Shape::String,
            Value::List(_) => Shape::List,
            Value::Map(_) => Shape::Map,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::float(value)
    }
}

/// [`Value`] 树的 [`Ops`] 实现。
#[derive(Clone, Copy, Debug, Default)]
pub struct ValueOps;

impl Ops for ValueOps {
    type Value = Value;

    fn empty(&self) -> Value {
        Value::Empty
    }

    fn create_bool(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn create_number(&self, value: Number) -> Value {
        Value::Number(value)
    }

    fn create_string(&self, value: &str) -> Value {
        Value::String(value.to_owned())
    }

    fn create_list(&self, items: Vec<Value>) -> Value {
        Value::List(items)
    }

    fn create_map(&self, entries: Vec<(Value, Value)>) -> Value {
        Value::Map(entries)
    }

    fn shape(&self, value: &Value) -> Shape {
        value.shape()
    }

    fn get_bool(&self, value: &Value) -> DataResult<bool> {
        match value {
            Value::Bool(b) => DataResult::success(*b),
            other => not_a(Shape::Bool, other),
        }
    }

    fn get_number(&self, value: &Value) -> DataResult<Number> {
        match value {
            Value::Number(n) => DataResult::success(*n),
            other => not_a(Shape::Number, other),
        }
    }

    fn get_string(&self, value: &Value) -> DataResult<String> {
        match value {
            Value::String(s) => DataResult::success(s.clone()),
            other => not_a(Shape::String, other),
        }
    }

    fn get_list(&self, value: &Value) -> DataResult<Vec<Value>> {
        match value {
            Value::List(items) => DataResult::success(items.clone()),
            other => not_a(Shape::List, other),
        }
    }

    fn get_map_entries(&self, value: &Value) -> DataResult<Vec<(Value, Value)>> {
        match value {
            Value::Map(entries) => DataResult::success(entries.clone()),
            other => not_a(Shape::Map, other),
        }
    }

    fn convert_to<O: Ops>(&self, out: &O, value: &Value) -> O::Value {
        match value {
            Value::Empty => out.empty(),
            Value::Bool(b) => out.create_bool(*b),
            Value::Number(n) => out.create_number(*n),
            Value::String(s) => out.create_string(s),
            Value::List(items) => {
                out.create_list(items.iter().map(|item| self.convert_to(out, item)).collect())
            }
            Value::Map(entries) => out.create_map(
                entries
                    .iter()
                    .map(|(k, v)| (self.convert_to(out, k), self.convert_to(out, v)))
                    .collect(),
            ),
        }
    }
}
