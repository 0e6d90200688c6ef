use crate::codec::Codec;
use crate::error::CodecError;
use crate::ops::Ops;
use crate::result::DataResult;

/// `Validate` 在解码成功后追加谓词校验。
///
/// # 契约说明（What）
/// - 解码：内部编解码器成功且 `predicate` 为真时原样返回；谓词为假时返回
///   [`ValidationFailure`](crate::ErrorKind::ValidationFailure)，消息取自 `error()`，不携带 `partial`；
/// - 编码：不做校验，假定待编码值已合法。
#[derive(Clone)]
pub struct Validate<C, P, E> {
    inner: C,
    predicate: P,
    error: E,
}

impl<C, P, E> Validate<C, P, E> {
    pub(crate) fn new(inner: C, predicate: P, error: E) -> Self {
        Self {
            inner,
            predicate,
            error,
        }
    }
}

impl<C, P, E> Codec for Validate<C, P, E>
where
    C: Codec,
    P: Fn(&C::Value) -> bool + Send + Sync + 'static,
    E: Fn() -> String + Send + Sync + 'static,
{
    type Value = C::Value;

    fn encode<O: Ops>(&self, value: &C::Value, ops: &O) -> DataResult<O::Value> {
        self.inner.encode(value, ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<C::Value> {
        self.inner.decode(ops, input).and_then(|value| {
            if (self.predicate)(&value) {
                DataResult::success(value)
            } else {
                DataResult::error(CodecError::validation((self.error)()))
            }
        })
    }

    fn is_stable(&self) -> bool {
        self.inner.is_stable()
    }
}

/// 以返回 [`DataResult`] 的函数校验解码结果，适合需要把实际值写进错误消息的场景。
#[derive(Clone)]
pub struct ValidateWith<C, F> {
    inner: C,
    check: F,
}

impl<C, F> ValidateWith<C, F> {
    pub(crate) fn new(inner: C, check: F) -> Self {
        Self { inner, check }
    }
}

impl<C, F> Codec for ValidateWith<C, F>
where
    C: Codec,
    F: Fn(C::Value) -> DataResult<C::Value> + Send + Sync + 'static,
{
    type Value = C::Value;

    fn encode<O: Ops>(&self, value: &C::Value, ops: &O) -> DataResult<O::Value> {
        self.inner.encode(value, ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<C::Value> {
        self.inner.decode(ops, input).and_then(&self.check)
    }

    fn is_stable(&self) -> bool {
        self.inner.is_stable()
    }
}

/// 自由函数形式的 [`CodecExt::validate`](crate::CodecExt::validate)。
pub fn validate<C, P, E>(codec: C, predicate: P, error: E) -> Validate<C, P, E>
where
    C: Codec,
    P: Fn(&C::Value) -> bool + Send + Sync + 'static,
    E: Fn() -> String + Send + Sync + 'static,
{
    Validate::new(codec, predicate, error)
}
