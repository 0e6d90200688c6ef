use std::marker::PhantomData;

use crate::codec::Codec;
use crate::ops::Ops;
use crate::result::DataResult;

/// 双向不会失败的值映射，见 [`CodecExt::xmap`](crate::CodecExt::xmap)。
///
/// 稳定性沿用内部编解码器：`to`/`from` 为纯函数且互逆时，往返律在映射后依然成立。
pub struct Xmap<C, B, F, G> {
    inner: C,
    to: F,
    from: G,
    _marker: PhantomData<fn() -> B>,
}

impl<C, B, F, G> Xmap<C, B, F, G> {
    pub(crate) fn new(inner: C, to: F, from: G) -> Self {
        Self {
            inner,
            to,
            from,
            _marker: PhantomData,
        }
    }
}

impl<C: Clone, B, F: Clone, G: Clone> Clone for Xmap<C, B, F, G> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone(), self.to.clone(), self.from.clone())
    }
}

impl<C, B, F, G> Codec for Xmap<C, B, F, G>
where
    C: Codec,
    B: Send + Sync + 'static,
    F: Fn(C::Value) -> B + Send + Sync + 'static,
    G: Fn(&B) -> C::Value + Send + Sync + 'static,
{
    type Value = B;

    fn encode<O: Ops>(&self, value: &B, ops: &O) -> DataResult<O::Value> {
        self.inner.encode(&(self.from)(value), ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<B> {
        self.inner.decode(ops, input).map(&self.to)
    }

    fn is_stable(&self) -> bool {
        self.inner.is_stable()
    }
}

/// 解码方向可失败的映射，见 [`CodecExt::comap_flat_map`](crate::CodecExt::comap_flat_map)。
pub struct ComapFlatMap<C, B, F, G> {
    inner: C,
    to: F,
    from: G,
    _marker: PhantomData<fn() -> B>,
}

impl<C, B, F, G> ComapFlatMap<C, B, F, G> {
    pub(crate) fn new(inner: C, to: F, from: G) -> Self {
        Self {
            inner,
            to,
            from,
            _marker: PhantomData,
        }
    }
}

impl<C: Clone, B, F: Clone, G: Clone> Clone for ComapFlatMap<C, B, F, G> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone(), self.to.clone(), self.from.clone())
    }
}

impl<C, B, F, G> Codec for ComapFlatMap<C, B, F, G>
where
    C: Codec,
    B: Send + Sync + 'static,
    F: Fn(C::Value) -> DataResult<B> + Send + Sync + 'static,
    G: Fn(&B) -> C::Value + Send + Sync + 'static,
{
    type Value = B;

    fn encode<O: Ops>(&self, value: &B, ops: &O) -> DataResult<O::Value> {
        self.inner.encode(&(self.from)(value), ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<B> {
        self.inner.decode(ops, input).and_then(&self.to)
    }

    fn is_stable(&self) -> bool {
        self.inner.is_stable()
    }
}

/// 两个方向均可失败的映射，见 [`CodecExt::flat_xmap`](crate::CodecExt::flat_xmap)。
///
/// 编码方向的失败没有恢复路径，直接同步返回错误。
pub struct FlatXmap<C, B, F, G> {
    inner: C,
    to: F,
    from: G,
    _marker: PhantomData<fn() -> B>,
}

impl<C, B, F, G> FlatXmap<C, B, F, G> {
    pub(crate) fn new(inner: C, to: F, from: G) -> Self {
        Self {
            inner,
            to,
            from,
            _marker: PhantomData,
        }
    }
}

impl<C: Clone, B, F: Clone, G: Clone> Clone for FlatXmap<C, B, F, G> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone(), self.to.clone(), self.from.clone())
    }
}

impl<C, B, F, G> Codec for FlatXmap<C, B, F, G>
where
    C: Codec,
    B: Send + Sync + 'static,
    F: Fn(C::Value) -> DataResult<B> + Send + Sync + 'static,
    G: Fn(&B) -> DataResult<C::Value> + Send + Sync + 'static,
{
    type Value = B;

    fn encode<O: Ops>(&self, value: &B, ops: &O) -> DataResult<O::Value> {
        (self.from)(value).and_then(|raw| self.inner.encode(&raw, ops))
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<B> {
        self.inner.decode(ops, input).and_then(&self.to)
    }

    fn is_stable(&self) -> bool {
        self.inner.is_stable()
    }
}

/// 将内部编解码器标记为往返规范化。
#[derive(Clone, Debug)]
pub struct Stable<C> {
    inner: C,
}

impl<C> Stable<C> {
    pub(crate) fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Codec> Codec for Stable<C> {
    type Value = C::Value;

    fn encode<O: Ops>(&self, value: &C::Value, ops: &O) -> DataResult<O::Value> {
        self.inner.encode(value, ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<C::Value> {
        self.inner.decode(ops, input)
    }

    fn is_stable(&self) -> bool {
        true
    }
}
