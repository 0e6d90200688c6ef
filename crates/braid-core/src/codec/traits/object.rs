use std::fmt;
use std::sync::Arc;

use crate::codec::traits::generic::Codec;
use crate::ops::{Ops, Value, ValueOps};
use crate::result::DataResult;
use crate::sealed::Sealed;

/// `DynCodec` 为对象层提供编解码能力的对象安全接口。
///
/// # 设计初衷（Why）
/// - 分派类编解码器需要在运行时按键挑选不同的子编解码器，必须以 trait 对象存放多种实现；
/// - 泛型 [`Codec`] 的方法对后端泛型，无法装箱；对象层因此固定以内存树 [`Value`] 作为交换格式。
///
/// # 行为逻辑（How）
/// - `encode_value` 将值编码为内存树；
/// - `decode_value` 从内存树解码；
/// - [`ErasedCodec`] 负责在调用方后端与内存树之间做 [`Ops::convert_to`] 转换。
///
/// # 契约说明（What）
/// - 与泛型 [`Codec`] 在功能上保持等价，差异仅在于类型擦除与一次格式转换；
/// - **性能权衡**：相较泛型层，额外引入一次虚表跳转与一次结构化值的整体复制。
pub trait DynCodec<V>: Send + Sync + 'static + Sealed {
    fn encode_value(&self, value: &V) -> DataResult<Value>;

    fn decode_value(&self, input: &Value) -> DataResult<V>;

    fn is_stable(&self) -> bool;
}

/// `TypedCodecAdapter` 将泛型 [`Codec`] 装箱为对象安全的 [`DynCodec`]。
///
/// # 行为逻辑（How）
/// - 内部持有具体的泛型实现；
/// - 两个方向都以 [`ValueOps`] 作为后端调用泛型实现。
pub struct TypedCodecAdapter<C>
where
    C: Codec,
{
    inner: C,
}

impl<C> TypedCodecAdapter<C>
where
    C: Codec,
{
    /// 使用给定的泛型实现构造适配器。
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// 取回内部泛型实现。
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> DynCodec<C::Value> for TypedCodecAdapter<C>
where
    C: Codec,
{
    fn encode_value(&self, value: &C::Value) -> DataResult<Value> {
        self.inner.encode(value, &ValueOps)
    }

    fn decode_value(&self, input: &Value) -> DataResult<C::Value> {
        self.inner.decode(&ValueOps, input)
    }

    fn is_stable(&self) -> bool {
        self.inner.is_stable()
    }
}

/// `ErasedCodec` 是对象层编解码器的共享句柄，本身又实现了泛型 [`Codec`]。
///
/// # 设计初衷（Why）
/// - 分派解析函数 `K -> Codec<V>` 需要对不同的键返回不同具体类型的编解码器，`ErasedCodec<V>` 把它们统一为同一类型；
/// - 内部使用 `Arc`，克隆代价为一次原子计数，可以从静态表中按键廉价取出。
///
/// # 行为逻辑（How）
/// - 编码：先编码为内存树，再转换为调用方后端；
/// - 解码：先把调用方后端的值转换为内存树，再解码。
///
/// # 风险提示（Trade-offs）
/// - 转换会复制整棵子树；热路径上若子编解码器类型统一，请直接使用泛型实现。
pub struct ErasedCodec<V> {
    inner: Arc<dyn DynCodec<V>>,
}

impl<V> ErasedCodec<V>
where
    V: Send + Sync + 'static,
{
    pub fn new<C>(codec: C) -> Self
    where
        C: Codec<Value = V>,
    {
        Self {
            inner: Arc::new(TypedCodecAdapter::new(codec)),
        }
    }

    pub fn from_dyn(inner: Arc<dyn DynCodec<V>>) -> Self {
        Self { inner }
    }
}

impl<V> Clone for ErasedCodec<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> fmt::Debug for ErasedCodec<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedCodec")
            .field("value", &std::any::type_name::<V>())
            .finish()
    }
}

impl<V> Codec for ErasedCodec<V>
where
    V: Send + Sync + 'static,
{
    type Value = V;

    fn encode<O: Ops>(&self, value: &V, ops: &O) -> DataResult<O::Value> {
        self.inner
            .encode_value(value)
            .map(|tree| ValueOps.convert_to(ops, &tree))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<V> {
        let tree = ops.convert_to(&ValueOps, input);
        self.inner.decode_value(&tree)
    }

    fn is_stable(&self) -> bool {
        self.inner.is_stable()
    }
}
