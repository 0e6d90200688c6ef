//! 记录组合：以字段编解码器拼装映射形态的记录。
//!
//! # 设计背景（Why）
//! - 记录类型（例如由 `min`/`max` 两个向量组成的包围盒）需要逐字段描述，每个字段有自己的名字、编解码器与缺失策略；
//! - [`MapCodec`] 只面向“映射中的若干字段”，不关心映射本身；[`MapCodecExt::codec`] 负责把它提升为完整的 [`Codec`]。
//!
//! # 逻辑解析（How）
//! - 字段编解码器（[`field`] 模块）从 [`MapView`] 读取、向 [`MapBuilder`] 写入；
//! - [`MapCodecExt::and`] 把两个字段组合为元组，[`MapCodecExt::xmap`] 把元组映射为业务类型；
//! - [`RecordCodec`] 在解码前校验输入形态为映射。

pub mod field;

use std::marker::PhantomData;

use crate::codec::Codec;
use crate::ops::{Ops, Shape, expected_map};
use crate::result::DataResult;
use crate::sealed::Sealed;

pub use field::{
    FieldCodec, OptionalFieldCodec, PropagatingOptionalField, StrictOptionalFieldCodec,
    propagating_optional_field_of,
};

/// 解码期间对映射条目的只读视图。
pub struct MapView<'a, O: Ops> {
    ops: &'a O,
    entries: Vec<(O::Value, O::Value)>,
}

impl<'a, O: Ops> MapView<'a, O> {
    pub fn new(ops: &'a O, entries: Vec<(O::Value, O::Value)>) -> Self {
        Self { ops, entries }
    }

    pub fn ops(&self) -> &'a O {
        self.ops
    }

    /// 按字符串键查找字段；若出现重复键，取第一个。
    pub fn get(&self, name: &str) -> Option<&O::Value> {
        self.entries
            .iter()
            .find(|(key, _)| {
                self.ops.shape(key) == Shape::String
                    && self.ops.get_string(key).value().is_some_and(|k| k == name)
            })
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 编码期间累积映射条目的构建器。
pub struct MapBuilder<'a, O: Ops> {
    ops: &'a O,
    entries: Vec<(O::Value, O::Value)>,
}

impl<'a, O: Ops> MapBuilder<'a, O> {
    pub fn new(ops: &'a O) -> Self {
        Self {
            ops,
            entries: Vec::new(),
        }
    }

    pub fn ops(&self) -> &'a O {
        self.ops
    }

    pub fn add(&mut self, name: &str, value: O::Value) {
        let key = self.ops.create_string(name);
        self.entries.push((key, value));
    }

    pub fn build(self) -> O::Value {
        self.ops.create_map(self.entries)
    }
}

/// `MapCodec` 描述映射中一组字段的编解码。
///
/// # 契约说明（What）
/// - `decode_fields` 只读取自己关心的字段，未知字段被忽略；
/// - `encode_fields` 只写入自己负责的字段，失败时返回错误且不保证构建器内容完整。
pub trait MapCodec: Send + Sync + 'static + Sealed {
    type Value: Send + Sync + 'static;

    fn decode_fields<O: Ops>(&self, input: &MapView<'_, O>) -> DataResult<Self::Value>;

    fn encode_fields<O: Ops>(
        &self,
        value: &Self::Value,
        out: &mut MapBuilder<'_, O>,
    ) -> DataResult<()>;
}

pub trait MapCodecExt: MapCodec + Sized {
    /// 双向映射字段组的值。
    fn xmap<B, F, G>(self, to: F, from: G) -> MapXmap<Self, B, F, G>
    where
        B: Send + Sync + 'static,
        F: Fn(Self::Value) -> B + Send + Sync + 'static,
        G: Fn(&B) -> Self::Value + Send + Sync + 'static,
    {
        MapXmap {
            inner: self,
            to,
            from,
            _marker: PhantomData,
        }
    }

    /// 与另一组字段并列，值为二元组。两侧都失败时错误按序合并。
    fn and<M: MapCodec>(self, other: M) -> And<Self, M> {
        And {
            first: self,
            second: other,
        }
    }

    /// 提升为完整的记录编解码器。
    fn codec(self) -> RecordCodec<Self> {
        RecordCodec { inner: self }
    }
}

impl<M: MapCodec> MapCodecExt for M {}

/// [`MapCodecExt::xmap`] 的返回类型：在字段组值与 `B` 之间做无失败的双向映射。
pub struct MapXmap<M, B, F, G> {
    inner: M,
    to: F,
    from: G,
    _marker: PhantomData<fn() -> B>,
}

impl<M, B, F, G> MapCodec for MapXmap<M, B, F, G>
where
    M: MapCodec,
    B: Send + Sync + 'static,
    F: Fn(M::Value) -> B + Send + Sync + 'static,
    G: Fn(&B) -> M::Value + Send + Sync + 'static,
{
    type Value = B;

    fn decode_fields<O: Ops>(&self, input: &MapView<'_, O>) -> DataResult<B> {
        self.inner.decode_fields(input).map(&self.to)
    }

    fn encode_fields<O: Ops>(&self, value: &B, out: &mut MapBuilder<'_, O>) -> DataResult<()> {
        self.inner.encode_fields(&(self.from)(value), out)
    }
}

/// [`MapCodecExt::and`] 的返回类型：两组字段共享同一映射，解码结果为二元组。
#[derive(Clone, Debug)]
pub struct And<A, B> {
    first: A,
    second: B,
}

impl<A: MapCodec, B: MapCodec> MapCodec for And<A, B> {
    type Value = (A::Value, B::Value);

    fn decode_fields<O: Ops>(&self, input: &MapView<'_, O>) -> DataResult<Self::Value> {
        self.first
            .decode_fields(input)
            .apply2(self.second.decode_fields(input), |a, b| (a, b))
    }

    fn encode_fields<O: Ops>(
        &self,
        value: &Self::Value,
        out: &mut MapBuilder<'_, O>,
    ) -> DataResult<()> {
        self.first
            .encode_fields(&value.0, out)
            .and_then(|()| self.second.encode_fields(&value.1, out))
    }
}

/// 把字段组提升为映射形态的 [`Codec`]。
#[derive(Clone, Debug)]
pub struct RecordCodec<M> {
    inner: M,
}

impl<M: MapCodec> Codec for RecordCodec<M> {
    type Value = M::Value;

    fn encode<O: Ops>(&self, value: &M::Value, ops: &O) -> DataResult<O::Value> {
        let mut out = MapBuilder::new(ops);
        match self.inner.encode_fields(value, &mut out) {
            DataResult::Success { warnings, .. } => {
                DataResult::success_with_warnings(out.build(), warnings)
            }
            DataResult::Error { error, .. } => DataResult::error(error),
        }
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<M::Value> {
        let shape = ops.shape(input);
        if shape != Shape::Map {
            return DataResult::error(expected_map(shape));
        }
        ops.get_map_entries(input)
            .and_then(|entries| self.inner.decode_fields(&MapView::new(ops, entries)))
    }
}
