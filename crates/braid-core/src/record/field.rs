//! 字段编解码器。
//!
//! | 类型 | 缺失 | 存在但畸形 | 编码 |
//! | --- | --- | --- | --- |
//! | [`FieldCodec`] | `MissingField` 错误 | 错误向上传播 | 总是写出 |
//! | [`OptionalFieldCodec`] | `None` | `None` + 告警 | `None` 时省略 |
//! | [`StrictOptionalFieldCodec`] | `None` | 错误向上传播 | `None` 时省略 |
//! | [`PropagatingOptionalField`] | `default()` | 错误向上传播 | 总是写出 |

use std::borrow::Cow;

use crate::codec::Codec;
use crate::error::{CodecError, PathSegment};
use crate::ops::Ops;
use crate::result::DataResult;

use super::{MapBuilder, MapCodec, MapView};

fn context(name: &Cow<'static, str>) -> PathSegment {
    PathSegment::Field(name.clone())
}

fn encode_into<C: Codec, O: Ops>(
    codec: &C,
    name: &Cow<'static, str>,
    value: &C::Value,
    out: &mut MapBuilder<'_, O>,
) -> DataResult<()> {
    codec
        .encode(value, out.ops())
        .with_context(context(name))
        .map(|encoded| out.add(name, encoded))
}

/// 必填字段。
#[derive(Clone, Debug)]
pub struct FieldCodec<C> {
    codec: C,
    name: Cow<'static, str>,
}

impl<C> FieldCodec<C> {
    pub(crate) fn new(codec: C, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            codec,
            name: name.into(),
        }
    }
}

impl<C: Codec> MapCodec for FieldCodec<C> {
    type Value = C::Value;

    fn decode_fields<O: Ops>(&self, input: &MapView<'_, O>) -> DataResult<C::Value> {
        match input.get(&self.name) {
            Some(raw) => self
                .codec
                .decode(input.ops(), raw)
                .with_context(context(&self.name)),
            None => DataResult::error(CodecError::missing_field(&self.name)),
        }
    }

    fn encode_fields<O: Ops>(&self, value: &C::Value, out: &mut MapBuilder<'_, O>) -> DataResult<()> {
        encode_into(&self.codec, &self.name, value, out)
    }
}

/// 宽松可选字段：畸形值被视为缺失。
///
/// 被吞掉的解码失败会以告警形式留在成功结果中，并以 `debug` 级别记录。
#[derive(Clone, Debug)]
pub struct OptionalFieldCodec<C> {
    codec: C,
    name: Cow<'static, str>,
}

impl<C> OptionalFieldCodec<C> {
    pub(crate) fn new(codec: C, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            codec,
            name: name.into(),
        }
    }
}

impl<C: Codec> MapCodec for OptionalFieldCodec<C> {
    type Value = Option<C::Value>;

    fn decode_fields<O: Ops>(&self, input: &MapView<'_, O>) -> DataResult<Option<C::Value>> {
        let Some(raw) = input.get(&self.name) else {
            return DataResult::success(None);
        };
        match self.codec.decode(input.ops(), raw) {
            DataResult::Success { value, warnings } => {
                DataResult::success_with_warnings(Some(value), warnings)
            }
            DataResult::Error { error, .. } => {
                let error = error.within(context(&self.name));
                tracing::debug!(
                    target: "braid::record",
                    field = %self.name,
                    %error,
                    "ignoring malformed optional field"
                );
                DataResult::success(None)
                    .with_warning(format!("Ignored malformed optional field: {error}"))
            }
        }
    }

    fn encode_fields<O: Ops>(
        &self,
        value: &Option<C::Value>,
        out: &mut MapBuilder<'_, O>,
    ) -> DataResult<()> {
        match value {
            Some(value) => encode_into(&self.codec, &self.name, value, out),
            None => DataResult::success(()),
        }
    }
}

/// 严格可选字段：区分“缺失”和“存在但畸形”，后者的错误向上传播。
#[derive(Clone, Debug)]
pub struct StrictOptionalFieldCodec<C> {
    codec: C,
    name: Cow<'static, str>,
}

impl<C> StrictOptionalFieldCodec<C> {
    pub(crate) fn new(codec: C, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            codec,
            name: name.into(),
        }
    }
}

impl<C: Codec> MapCodec for StrictOptionalFieldCodec<C> {
    type Value = Option<C::Value>;

    fn decode_fields<O: Ops>(&self, input: &MapView<'_, O>) -> DataResult<Option<C::Value>> {
        match input.get(&self.name) {
            Some(raw) => self
                .codec
                .decode(input.ops(), raw)
                .map(Some)
                .with_context(context(&self.name)),
            None => DataResult::success(None),
        }
    }

    fn encode_fields<O: Ops>(
        &self,
        value: &Option<C::Value>,
        out: &mut MapBuilder<'_, O>,
    ) -> DataResult<()> {
        match value {
            Some(value) => encode_into(&self.codec, &self.name, value, out),
            None => DataResult::success(()),
        }
    }
}

/// `PropagatingOptionalField` 是带默认值的严格可选字段。
///
/// # 设计初衷（Why）
/// - 普通可选字段会把解码失败静默当作“缺失”，配置写错时用户只会得到默认值而无从察觉；
/// - 本字段只在真正缺失时使用默认值，畸形输入的错误总是传播给调用方。
///
/// # 契约说明（What）
/// - 解码：字段缺失时返回 `default()` 且不产生错误或告警；字段存在但解码失败时返回带字段路径的错误，绝不回退到默认值；
/// - 编码：总是写出字段，即便值与默认值相等。
#[derive(Clone, Debug)]
pub struct PropagatingOptionalField<C, D> {
    field: StrictOptionalFieldCodec<C>,
    default: D,
}

impl<C, D> PropagatingOptionalField<C, D> {
    pub(crate) fn new(codec: C, name: impl Into<Cow<'static, str>>, default: D) -> Self {
        Self {
            field: StrictOptionalFieldCodec::new(codec, name),
            default,
        }
    }
}

/// 自由函数形式的 [`CodecExt::propagating_optional_field_of`](crate::CodecExt::propagating_optional_field_of)。
pub fn propagating_optional_field_of<C, D>(
    codec: C,
    name: impl Into<Cow<'static, str>>,
    default: D,
) -> PropagatingOptionalField<C, D>
where
    C: Codec,
    D: Fn() -> C::Value + Send + Sync + 'static,
{
    PropagatingOptionalField::new(codec, name, default)
}

impl<C, D> MapCodec for PropagatingOptionalField<C, D>
where
    C: Codec,
    D: Fn() -> C::Value + Send + Sync + 'static,
{
    type Value = C::Value;

    fn decode_fields<O: Ops>(&self, input: &MapView<'_, O>) -> DataResult<C::Value> {
        self.field
            .decode_fields(input)
            .map(|present| present.unwrap_or_else(&self.default))
    }

    fn encode_fields<O: Ops>(&self, value: &C::Value, out: &mut MapBuilder<'_, O>) -> DataResult<()> {
        encode_into(&self.field.codec, &self.field.name, value, out)
    }
}
