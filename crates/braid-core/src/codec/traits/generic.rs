use std::borrow::Cow;
use std::sync::Arc;

use crate::combinator::list::ListCodec;
use crate::combinator::map::{ComapFlatMap, FlatXmap, Stable, Xmap};
use crate::combinator::validate::{Validate, ValidateWith};
use crate::ops::Ops;
use crate::record::field::{
    FieldCodec, OptionalFieldCodec, PropagatingOptionalField, StrictOptionalFieldCodec,
};
use crate::result::DataResult;
use crate::sealed::Sealed;

use super::object::ErasedCodec;

/// `Codec` 统一封装编码与解码逻辑，是泛型层的零成本编解码契约。
///
/// # 设计初衷（Why）
/// - 以单一 trait 同时表达双向能力，组合子只需包装一个值即可同时获得两个方向的变换；
/// - 方法对 [`Ops`] 泛型，同一个编解码器实例可服务任意结构化值后端；
/// - 作为对象层 [`super::object::DynCodec`] 的泛型基线，需要类型擦除时通过 [`CodecExt::erased`] 转换。
///
/// # 行为逻辑（How）
/// 1. `encode` 将内存值转换为后端的新结构化值，从不修改已有值；
/// 2. `decode` 检视结构化值并构造内存值，失败统一以 [`DataResult::Error`] 表达；
/// 3. `is_stable` 声明编码/解码往返是否规范化，仅供调用方优化参考，内部不做强制。
///
/// # 契约说明（What）
/// - **关联类型**：`Value` 需满足 `Send + Sync + 'static`，以支持跨线程共享解码结果；
/// - **往返律**：若 `decode(s) = Success(v)`，则 `decode(encode(v))` 必须再次得到 `Success(v)`（允许文档化的规范化）；
/// - **全函数**：两个方向都不允许 panic，所有失败都可表示为错误。
///
/// # 风险提示（Trade-offs）
/// - 泛型方法使该 trait 不具备对象安全性；需要按运行时键选择编解码器时，请使用对象层。
pub trait Codec: Send + Sync + 'static + Sealed {
    /// 内存中的值类型。
    type Value: Send + Sync + 'static;

    /// 将值编码为结构化值。
    fn encode<O: Ops>(&self, value: &Self::Value, ops: &O) -> DataResult<O::Value>;

    /// 从结构化值解码。
    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Self::Value>;

    /// 往返是否规范化。
    fn is_stable(&self) -> bool {
        false
    }
}

impl<C: Codec> Codec for &'static C {
    type Value = C::Value;

    fn encode<O: Ops>(&self, value: &Self::Value, ops: &O) -> DataResult<O::Value> {
        (**self).encode(value, ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Self::Value> {
        (**self).decode(ops, input)
    }

    fn is_stable(&self) -> bool {
        (**self).is_stable()
    }
}

impl<C: Codec> Codec for Arc<C> {
    type Value = C::Value;

    fn encode<O: Ops>(&self, value: &Self::Value, ops: &O) -> DataResult<O::Value> {
        (**self).encode(value, ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Self::Value> {
        (**self).decode(ops, input)
    }

    fn is_stable(&self) -> bool {
        (**self).is_stable()
    }
}

/// `CodecExt` 以方法链的形式提供常用组合子。
///
/// 所有方法按值消费 `self` 并返回新的编解码器；需要复用同一个编解码器时，可借助 `&'static` 或 `Arc` 的 blanket 实现。
pub trait CodecExt: Codec + Sized {
    /// 双向不会失败的映射：`to` 作用于解码结果，`from` 作用于待编码值。
    fn xmap<B, F, G>(self, to: F, from: G) -> Xmap<Self, B, F, G>
    where
        B: Send + Sync + 'static,
        F: Fn(Self::Value) -> B + Send + Sync + 'static,
        G: Fn(&B) -> Self::Value + Send + Sync + 'static,
    {
        Xmap::new(self, to, from)
    }

    /// 解码方向可失败的映射，例如把字符串解析为 URL。
    fn comap_flat_map<B, F, G>(self, to: F, from: G) -> ComapFlatMap<Self, B, F, G>
    where
        B: Send + Sync + 'static,
        F: Fn(Self::Value) -> DataResult<B> + Send + Sync + 'static,
        G: Fn(&B) -> Self::Value + Send + Sync + 'static,
    {
        ComapFlatMap::new(self, to, from)
    }

    /// 两个方向均可失败的映射。
    fn flat_xmap<B, F, G>(self, to: F, from: G) -> FlatXmap<Self, B, F, G>
    where
        B: Send + Sync + 'static,
        F: Fn(Self::Value) -> DataResult<B> + Send + Sync + 'static,
        G: Fn(&B) -> DataResult<Self::Value> + Send + Sync + 'static,
    {
        FlatXmap::new(self, to, from)
    }

    /// 对解码结果追加谓词校验，失败时以 `error()` 构造 [`ValidationFailure`](crate::ErrorKind::ValidationFailure)。
    fn validate<P, E>(self, predicate: P, error: E) -> Validate<Self, P, E>
    where
        P: Fn(&Self::Value) -> bool + Send + Sync + 'static,
        E: Fn() -> String + Send + Sync + 'static,
    {
        Validate::new(self, predicate, error)
    }

    /// 以返回 [`DataResult`] 的函数校验解码结果。
    fn validate_with<F>(self, check: F) -> ValidateWith<Self, F>
    where
        F: Fn(Self::Value) -> DataResult<Self::Value> + Send + Sync + 'static,
    {
        ValidateWith::new(self, check)
    }

    fn list_of(self) -> ListCodec<Self> {
        ListCodec::new(self)
    }

    /// 必填字段。
    fn field_of(self, name: impl Into<Cow<'static, str>>) -> FieldCodec<Self> {
        FieldCodec::new(self, name)
    }

    /// 宽松可选字段：畸形值被视为缺失，并在结果中留下告警。
    fn optional_field_of(self, name: impl Into<Cow<'static, str>>) -> OptionalFieldCodec<Self> {
        OptionalFieldCodec::new(self, name)
    }

    /// 严格可选字段：缺失时为 `None`，畸形值的解码错误向上传播。
    fn strict_optional_field_of(
        self,
        name: impl Into<Cow<'static, str>>,
    ) -> StrictOptionalFieldCodec<Self> {
        StrictOptionalFieldCodec::new(self, name)
    }

    /// 缺失时取 `default()` 的严格可选字段，编码时总是写出该字段。
    fn propagating_optional_field_of<D>(
        self,
        name: impl Into<Cow<'static, str>>,
        default: D,
    ) -> PropagatingOptionalField<Self, D>
    where
        D: Fn() -> Self::Value + Send + Sync + 'static,
    {
        PropagatingOptionalField::new(self, name, default)
    }

    /// 声明往返为规范化。
    fn stable(self) -> Stable<Self> {
        Stable::new(self)
    }

    /// 转为对象层句柄，用于按运行时键选择编解码器。
    fn erased(self) -> ErasedCodec<Self::Value> {
        ErasedCodec::new(self)
    }
}

impl<C: Codec> CodecExt for C {}
