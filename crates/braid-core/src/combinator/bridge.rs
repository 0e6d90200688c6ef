//! 直接桥接结构化值后端的编解码器。
//!
//! 适用于序列化不经过标量/列表中间形态的类型，例如由外部访问者直接读写某种二进制标签树的类型。

use std::marker::PhantomData;

use crate::codec::Codec;
use crate::ops::{Ops, Value, ValueOps, expected_map};
use crate::result::DataResult;

/// `WithOps` 把值类型与指定后端 `N` 的原生结构化值直接互转。
///
/// # 行为逻辑（How）
/// - 解码：先把调用方后端的输入经 [`Ops::convert_to`] 转换为 `N` 的原生值，再交给 `decode`；
/// - 编码：`encode` 产出 `N` 的原生值，再转换回调用方后端。
///
/// # 契约说明（What）
/// - 解码失败的形态完全由 `decode` 自身的 [`DataResult`] 决定；
/// - 调用方后端与 `N` 相同时，转换仍会复制一次结构化值。
pub struct WithOps<N, A, E, D> {
    ops: N,
    encode: E,
    decode: D,
    _marker: PhantomData<fn() -> A>,
}

/// 构造 [`WithOps`]。
pub fn with_ops<N, A, E, D>(ops: N, encode: E, decode: D) -> WithOps<N, A, E, D>
where
    N: Ops,
    A: Send + Sync + 'static,
    E: Fn(&A) -> N::Value + Send + Sync + 'static,
    D: Fn(N::Value) -> DataResult<A> + Send + Sync + 'static,
{
    WithOps {
        ops,
        encode,
        decode,
        _marker: PhantomData,
    }
}

/// 以内存树 [`Value`] 为原生格式的 [`with_ops`]。
pub fn with_value<A, E, D>(encode: E, decode: D) -> WithOps<ValueOps, A, E, D>
where
    A: Send + Sync + 'static,
    E: Fn(&A) -> Value + Send + Sync + 'static,
    D: Fn(Value) -> DataResult<A> + Send + Sync + 'static,
{
    with_ops(ValueOps, encode, decode)
}

impl<N, A, E, D> Codec for WithOps<N, A, E, D>
where
    N: Ops,
    A: Send + Sync + 'static,
    E: Fn(&A) -> N::Value + Send + Sync + 'static,
    D: Fn(N::Value) -> DataResult<A> + Send + Sync + 'static,
{
    type Value = A;

    fn encode<O: Ops>(&self, value: &A, ops: &O) -> DataResult<O::Value> {
        let native = (self.encode)(value);
        DataResult::success(self.ops.convert_to(ops, &native))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<A> {
        let native = ops.convert_to(&self.ops, input);
        (self.decode)(native)
    }
}

/// 访问者风格的映射桥接：编码时向空条目表写入字段，解码时先由 `factory` 创建值再读入字段。
///
/// 解码输入必须是映射，否则返回形态不匹配 `"Expected map, found <shape>"`。
pub struct WithMap<A, E, D, F> {
    encode: E,
    decode: D,
    factory: F,
    _marker: PhantomData<fn() -> A>,
}

pub fn with_map<A, E, D, F>(encode: E, decode: D, factory: F) -> WithMap<A, E, D, F>
where
    A: Send + Sync + 'static,
    E: Fn(&A, &mut Vec<(Value, Value)>) + Send + Sync + 'static,
    D: Fn(&mut A, &[(Value, Value)]) + Send + Sync + 'static,
    F: Fn() -> A + Send + Sync + 'static,
{
    WithMap {
        encode,
        decode,
        factory,
        _marker: PhantomData,
    }
}

impl<A, E, D, F> Codec for WithMap<A, E, D, F>
where
    A: Send + Sync + 'static,
    E: Fn(&A, &mut Vec<(Value, Value)>) + Send + Sync + 'static,
    D: Fn(&mut A, &[(Value, Value)]) + Send + Sync + 'static,
    F: Fn() -> A + Send + Sync + 'static,
{
    type Value = A;

    fn encode<O: Ops>(&self, value: &A, ops: &O) -> DataResult<O::Value> {
        let mut entries = Vec::new();
        (self.encode)(value, &mut entries);
        DataResult::success(ValueOps.convert_to(ops, &Value::Map(entries)))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<A> {
        match ops.convert_to(&ValueOps, input) {
            Value::Map(entries) => {
                let mut value = (self.factory)();
                (self.decode)(&mut value, &entries);
                DataResult::success(value)
            }
            other => DataResult::error(expected_map(other.shape())),
        }
    }
}
