//! 列表相关组合子：列表、列表或单元素、定长数组。

use crate::codec::Codec;
use crate::error::{CodecError, PathSegment};
use crate::ops::Ops;
use crate::result::DataResult;

use super::either::{Either, EitherCodec, either};

/// 元素编解码器的列表形式，见 [`CodecExt::list_of`](crate::CodecExt::list_of)。
///
/// 任一元素失败即中止整个列表，错误路径附带元素下标，不返回部分结果。
#[derive(Clone, Copy, Debug)]
pub struct ListCodec<C> {
    element: C,
}

impl<C> ListCodec<C> {
    pub const fn new(element: C) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &C {
        &self.element
    }
}

impl<C: Codec> ListCodec<C> {
    /// 以切片编码，供不持有 `Vec` 的调用方（例如定长数组）复用。
    pub fn encode_slice<O: Ops>(&self, items: &[C::Value], ops: &O) -> DataResult<O::Value> {
        let mut encoded = Vec::with_capacity(items.len());
        let mut warnings = Vec::new();
        for (index, item) in items.iter().enumerate() {
            match self.element.encode(item, ops) {
                DataResult::Success {
                    value,
                    warnings: next,
                } => {
                    encoded.push(value);
                    warnings.extend(next);
                }
                DataResult::Error { error, .. } => {
                    return DataResult::error(error.within(PathSegment::Index(index)));
                }
            }
        }
        DataResult::success_with_warnings(ops.create_list(encoded), warnings)
    }
}

impl<C: Codec> Codec for ListCodec<C> {
    type Value = Vec<C::Value>;

    fn encode<O: Ops>(&self, value: &Vec<C::Value>, ops: &O) -> DataResult<O::Value> {
        self.encode_slice(value, ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Vec<C::Value>> {
        ops.get_list(input).and_then(|items| {
            let mut decoded = Vec::with_capacity(items.len());
            let mut warnings = Vec::new();
            for (index, item) in items.iter().enumerate() {
                match self.element.decode(ops, item) {
                    DataResult::Success {
                        value,
                        warnings: next,
                    } => {
                        decoded.push(value);
                        warnings.extend(next);
                    }
                    DataResult::Error { error, .. } => {
                        return DataResult::error(error.within(PathSegment::Index(index)));
                    }
                }
            }
            DataResult::success_with_warnings(decoded, warnings)
        })
    }

    fn is_stable(&self) -> bool {
        self.element.is_stable()
    }
}

/// `ListOrUnit` 接受列表或单个元素两种写法。
///
/// # 行为逻辑（How）
/// - 解码：等价于 `either(list_of(codec), codec)`，列表写法优先；单元素写法被包装为长度为 1 的序列；
/// - 编码：长度恰为 1 的序列编码为单元素写法，其余长度（包括 0）编码为列表。
///
/// # 契约说明（What）
/// - 编码规则是确定性的规范化而非启发式：反复编码/解码会收敛到同一表示。
#[derive(Clone, Debug)]
pub struct ListOrUnit<C> {
    inner: EitherCodec<ListCodec<C>, C>,
}

/// 构造 [`ListOrUnit`]。元素编解码器会被复制一份分别用于列表分支与单元素分支。
pub fn list_or_unit<C: Codec + Clone>(codec: C) -> ListOrUnit<C> {
    ListOrUnit {
        inner: either(ListCodec::new(codec.clone()), codec),
    }
}

impl<C: Codec> ListOrUnit<C> {
    fn encode_slice<O: Ops>(&self, items: &[C::Value], ops: &O) -> DataResult<O::Value> {
        match items {
            [single] => self.inner.second().encode(single, ops),
            _ => self.inner.first().encode_slice(items, ops),
        }
    }

    fn decode_vec<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Vec<C::Value>> {
        self.inner.decode(ops, input).map(|decoded| match decoded {
            Either::Left(list) => list,
            Either::Right(unit) => vec![unit],
        })
    }
}

impl<C: Codec> Codec for ListOrUnit<C> {
    type Value = Vec<C::Value>;

    fn encode<O: Ops>(&self, value: &Vec<C::Value>, ops: &O) -> DataResult<O::Value> {
        self.encode_slice(value, ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Vec<C::Value>> {
        self.decode_vec(ops, input)
    }
}

/// 与 [`ListOrUnit`] 语义相同，内存表示为定长的 `Box<[T]>`。
///
/// 解码得到的序列直接转为装箱切片，编码时以切片视图复用列表/单元素规则，不复制元素。
#[derive(Clone, Debug)]
pub struct ArrayOrUnit<C> {
    inner: ListOrUnit<C>,
}

/// 构造 [`ArrayOrUnit`]。
pub fn array_or_unit<C: Codec + Clone>(codec: C) -> ArrayOrUnit<C> {
    ArrayOrUnit {
        inner: list_or_unit(codec),
    }
}

impl<C: Codec> Codec for ArrayOrUnit<C> {
    type Value = Box<[C::Value]>;

    fn encode<O: Ops>(&self, value: &Box<[C::Value]>, ops: &O) -> DataResult<O::Value> {
        self.inner.encode_slice(value, ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Box<[C::Value]>> {
        self.inner
            .decode_vec(ops, input)
            .map(Vec::into_boxed_slice)
    }
}

/// 将任意序列编解码器的内存表示由 `Vec<T>` 改为 `Box<[T]>`。
///
/// 编码方向需要把切片还原为 `Vec`，因此要求元素可克隆；若元素编解码器已知，优先使用 [`array_or_unit`]。
#[derive(Clone, Debug)]
pub struct ListToArray<C> {
    inner: C,
}

/// 以 [`ListToArray`] 包装 `codec`。
pub fn list_to_array<C, T>(codec: C) -> ListToArray<C>
where
    C: Codec<Value = Vec<T>>,
    T: Clone + Send + Sync + 'static,
{
    ListToArray { inner: codec }
}

impl<C, T> Codec for ListToArray<C>
where
    C: Codec<Value = Vec<T>>,
    T: Clone + Send + Sync + 'static,
{
    type Value = Box<[T]>;

    fn encode<O: Ops>(&self, value: &Box<[T]>, ops: &O) -> DataResult<O::Value> {
        self.inner.encode(&value.to_vec(), ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Box<[T]>> {
        self.inner
            .decode(ops, input)
            .map(Vec::into_boxed_slice)
    }

    fn is_stable(&self) -> bool {
        self.inner.is_stable()
    }
}

/// `FixedLength` 要求序列长度恰为 `len`。
///
/// # 契约说明（What）
/// - 解码：长度不符时返回 [`ValidationFailure`](crate::ErrorKind::ValidationFailure)
///   `"Input is not a list of <len> elements"`；过长的输入在 `partial` 中保留前 `len` 个元素；
/// - 编码：长度不符时返回 [`Encode`](crate::ErrorKind::Encode) 错误，不产生结构化值。
#[derive(Clone, Debug)]
pub struct FixedLength<C> {
    inner: C,
    len: usize,
}

/// 以 [`FixedLength`] 约束 `codec` 的序列长度为 `len`。
pub fn fixed_length<C, T>(codec: C, len: usize) -> FixedLength<C>
where
    C: Codec<Value = Vec<T>>,
    T: Send + Sync + 'static,
{
    FixedLength { inner: codec, len }
}

impl<C, T> Codec for FixedLength<C>
where
    C: Codec<Value = Vec<T>>,
    T: Send + Sync + 'static,
{
    type Value = Vec<T>;

    fn encode<O: Ops>(&self, value: &Vec<T>, ops: &O) -> DataResult<O::Value> {
        if value.len() != self.len {
            return DataResult::error(CodecError::encode(format!(
                "Expected {} elements but found {}",
                self.len,
                value.len()
            )));
        }
        self.inner.encode(value, ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Vec<T>> {
        let len = self.len;
        self.inner.decode(ops, input).and_then(|mut values| {
            if values.len() == len {
                return DataResult::success(values);
            }
            let error =
                CodecError::validation(format!("Input is not a list of {len} elements"));
            if values.len() > len {
                values.truncate(len);
                DataResult::error_with_partial(error, values)
            } else {
                DataResult::error(error)
            }
        })
    }

    fn is_stable(&self) -> bool {
        self.inner.is_stable()
    }
}
