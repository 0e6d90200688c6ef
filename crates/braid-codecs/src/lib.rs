//! # braid-codecs
//!
//! ## 职责（Why）
//! - 门面 crate：集中 re-export `braid-core` 的稳定编解码面，调用方只需依赖本 crate；
//! - 承载可复用的具体后端与编解码器，避免核心引擎依赖任何具体数据格式。
//!
//! ## 使用方式（How）
//! - Feature `json`（默认开启）：[`JsonOps`] 后端与 [`with_json`] 桥接；
//! - Feature `url`（默认开启）：[`URL`] 与限定协议的 [`url()`] 编解码器；
//! - 其余组合子与基础编解码器直接从本 crate 根访问，路径与 `braid-core` 保持一致。
//!
//! ## 契约说明（What）
//! - re-export 的类型与 `braid-core` 完全相同，不引入额外状态；
//! - 关闭某个 Feature 只会移除对应模块及其依赖。

/// 组合子模块，保持与核心 crate 相同的路径结构。
pub use braid_core::combinator;
/// 错误码常量命名空间。
pub use braid_core::codes;
/// 记录与字段组合模块。
pub use braid_core::record;
pub use braid_core::{
    ArrayOrUnit, BOOL, Codec, CodecError, CodecExt, DOUBLE, DataResult, DispatchMapCodec,
    DynCodec, Either, EitherCodec, ErasedCodec, ErrorKind, FLOAT, INT, INT_STREAM, KeyedVariants,
    LONG, ListCodec, ListOrUnit, MapCodec, MapCodecExt, Number, Ops, PASSTHROUGH, PathSegment,
    STRING, Shape, TypedCodecAdapter, Value, ValueOps, VariantTable, array_or_unit,
    dispatch_by_map_key, either, fixed_length, keyed_variants, list_or_unit, list_to_array,
    propagating_optional_field_of, string_variants, validate, with_map, with_ops, with_value,
};

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "json")]
pub use json::{JsonOps, with_json};

#[cfg(feature = "url")]
mod url;
#[cfg(feature = "url")]
pub use crate::url::{URL, UrlCodec, url};
