//! 基础类型编解码器。
//!
//! 所有基础编解码器都是零尺寸常量，往返规范化（`is_stable() == true`），可直接作为进程级单例使用。

use crate::combinator::list::ListCodec;
use crate::error::CodecError;
use crate::ops::{Number, Ops, Value, ValueOps};
use crate::result::DataResult;

use super::traits::Codec;

#[derive(Clone, Copy, Debug, Default)]
pub struct BoolCodec;

pub const BOOL: BoolCodec = BoolCodec;

impl Codec for BoolCodec {
    type Value = bool;

    fn encode<O: Ops>(&self, value: &bool, ops: &O) -> DataResult<O::Value> {
        DataResult::success(ops.create_bool(*value))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<bool> {
        ops.get_bool(input)
    }

    fn is_stable(&self) -> bool {
        true
    }
}

/// 32 位整数；超出 `i32` 范围或带小数部分的数值被拒绝。
#[derive(Clone, Copy, Debug, Default)]
pub struct IntCodec;

pub const INT: IntCodec = IntCodec;

impl Codec for IntCodec {
    type Value = i32;

    fn encode<O: Ops>(&self, value: &i32, ops: &O) -> DataResult<O::Value> {
        DataResult::success(ops.create_number(Number::Int(i64::from(*value))))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<i32> {
        ops.get_number(input).and_then(|number| {
            number
                .as_i64()
                .and_then(|wide| i32::try_from(wide).ok())
                .map(DataResult::success)
                .unwrap_or_else(|| {
                    DataResult::error(CodecError::validation(format!(
                        "Not a 32-bit integer: {number}"
                    )))
                })
        })
    }

    fn is_stable(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LongCodec;

pub const LONG: LongCodec = LongCodec;

impl Codec for LongCodec {
    type Value = i64;

    fn encode<O: Ops>(&self, value: &i64, ops: &O) -> DataResult<O::Value> {
        DataResult::success(ops.create_number(Number::Int(*value)))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<i64> {
        ops.get_number(input).and_then(|number| match number.as_i64() {
            Some(value) => DataResult::success(value),
            None => DataResult::error(CodecError::validation(format!(
                "Not a 64-bit integer: {number}"
            ))),
        })
    }

    fn is_stable(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FloatCodec;

pub const FLOAT: FloatCodec = FloatCodec;

impl Codec for FloatCodec {
    type Value = f32;

    fn encode<O: Ops>(&self, value: &f32, ops: &O) -> DataResult<O::Value> {
        DataResult::success(ops.create_number(Number::Float(f64::from(*value))))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<f32> {
        ops.get_number(input).map(|number| number.as_f64() as f32)
    }

    fn is_stable(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleCodec;

pub const DOUBLE: DoubleCodec = DoubleCodec;

impl Codec for DoubleCodec {
    type Value = f64;

    fn encode<O: Ops>(&self, value: &f64, ops: &O) -> DataResult<O::Value> {
        DataResult::success(ops.create_number(Number::Float(*value)))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<f64> {
        ops.get_number(input).map(Number::as_f64)
    }

    fn is_stable(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StringCodec;

pub const STRING: StringCodec = StringCodec;

impl Codec for StringCodec {
    type Value = String;

    fn encode<O: Ops>(&self, value: &String, ops: &O) -> DataResult<O::Value> {
        DataResult::success(ops.create_string(value))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<String> {
        ops.get_string(input)
    }

    fn is_stable(&self) -> bool {
        true
    }
}

/// 整数列表，对应固定长度坐标等场景的底层表示。
pub const INT_STREAM: ListCodec<IntCodec> = ListCodec::new(INT);

/// 将任意后端的值原样捕获为内存树 [`Value`]，编码时再重建到目标后端。
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughCodec;

pub const PASSTHROUGH: PassthroughCodec = PassthroughCodec;

impl Codec for PassthroughCodec {
    type Value = Value;

    fn encode<O: Ops>(&self, value: &Value, ops: &O) -> DataResult<O::Value> {
        DataResult::success(ValueOps.convert_to(ops, value))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Value> {
        DataResult::success(ops.convert_to(&ValueOps, input))
    }

    fn is_stable(&self) -> bool {
        true
    }
}
