//! 按键分派的映射编解码器。
//!
//! # 设计背景（Why）
//! - 异构映射中每个条目的值形态由其键决定（例如以槽位名为键、值为各自结构的配置表）；
//! - 子编解码器由调用方提供的纯函数 `K -> Codec<V>` 在运行时解析，不依赖反射或全局注册表。
//!
//! # 逻辑解析（How）
//! - 解码按条目自然顺序线性推进：解码键 → 解析值编解码器 → 解码值 → 插入；
//! - 任一步骤失败即终止整个解码，不返回部分映射；
//! - 结果使用 [`IndexMap`] 保存，编码顺序即解码顺序。

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::codec::Codec;
use crate::error::{CodecError, PathSegment};
use crate::ops::{Ops, Shape, describe_key, expected_map};
use crate::result::DataResult;

/// 解码中止时所处的阶段，仅用于诊断日志。
#[derive(Clone, Copy, Debug)]
enum Stage {
    DecodingKey,
    DecodingValue,
    Inserting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::DecodingKey => "decoding_key",
            Stage::DecodingValue => "decoding_value",
            Stage::Inserting => "inserting",
        })
    }
}

fn abort<T>(stage: Stage, index: usize, error: CodecError) -> DataResult<T> {
    tracing::debug!(
        target: "braid::dispatch",
        %stage,
        entry = index,
        %error,
        "dispatch map decode aborted"
    );
    DataResult::error(error)
}

/// `DispatchMapCodec` 编解码值形态随键变化的映射。
///
/// # 契约说明（What）
/// - **输入形态**：非映射输入返回 `"Expected map, found <shape>"`；
/// - **重复键**：两个原始条目解码出相同的键时返回 [`DuplicateKey`](crate::ErrorKind::DuplicateKey)，与条目顺序无关；
/// - **中止**：任一条目的键或值解码失败都使整体失败，错误路径带有 `[key]` 定位，且不携带部分结果；
/// - **编码**：按插入顺序编码，键或值编码失败原样传播；
/// - **稳定性**：值编解码器由解析函数逐键给出，无法在构造时检视，因此 `is_stable()` 恒为 `false`；
///   确认所有值编解码器均稳定时可用 [`stable`](crate::CodecExt::stable) 显式声明。
///
/// # 风险提示（Trade-offs）
/// - 解析函数在每个条目上都会被调用一次，不做缓存；若构造子编解码器代价较高，请让解析函数返回预先构造的共享实例（例如克隆 [`ErasedCodec`](crate::ErasedCodec)）；
/// - 只接受字符串键的后端（例如 `braid-codecs` 的 JSON 后端）会把非字符串键写成其文本形式，
///   这类键编解码器（例如 [`INT`](crate::INT)）的编码结果无法用同一编解码器解码回来；
///   需要经由此类后端往返时，请使用字符串形态的键编解码器（例如对 `STRING` 做 `comap_flat_map` 解析）。
pub struct DispatchMapCodec<KC, F> {
    key_codec: KC,
    resolver: F,
}

/// 以键编解码器与解析函数构造 [`DispatchMapCodec`]。
pub fn dispatch_by_map_key<KC, F, R>(key_codec: KC, resolver: F) -> DispatchMapCodec<KC, F>
where
    KC: Codec,
    KC::Value: Eq + Hash,
    F: Fn(&KC::Value) -> R + Send + Sync + 'static,
    R: Codec,
{
    DispatchMapCodec {
        key_codec,
        resolver,
    }
}

impl<KC, F> DispatchMapCodec<KC, F> {
    /// 解码与编码条目键所用的编解码器。
    pub fn key_codec(&self) -> &KC {
        &self.key_codec
    }
}

impl<KC, F, R> Codec for DispatchMapCodec<KC, F>
where
    KC: Codec,
    KC::Value: Eq + Hash,
    F: Fn(&KC::Value) -> R + Send + Sync + 'static,
    R: Codec,
{
    type Value = IndexMap<KC::Value, R::Value>;

    fn encode<O: Ops>(&self, value: &Self::Value, ops: &O) -> DataResult<O::Value> {
        let mut entries = Vec::with_capacity(value.len());
        let mut warnings = Vec::new();
        for (index, (key, item)) in value.iter().enumerate() {
            let raw_key = match self.key_codec.encode(key, ops) {
                DataResult::Success {
                    value,
                    warnings: next,
                } => {
                    warnings.extend(next);
                    value
                }
                DataResult::Error { error, .. } => {
                    return DataResult::error(error.within(PathSegment::Index(index)));
                }
            };
            match (self.resolver)(key).encode(item, ops) {
                DataResult::Success {
                    value,
                    warnings: next,
                } => {
                    warnings.extend(next);
                    entries.push((raw_key, value));
                }
                DataResult::Error { error, .. } => {
                    let segment = PathSegment::Key(describe_key(ops, &raw_key));
                    return DataResult::error(error.within(segment));
                }
            }
        }
        DataResult::success_with_warnings(ops.create_map(entries), warnings)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Self::Value> {
        let shape = ops.shape(input);
        if shape != Shape::Map {
            return DataResult::error(expected_map(shape));
        }
        let entries = match ops.get_map_entries(input) {
            DataResult::Success { value, .. } => value,
            DataResult::Error { error, .. } => return DataResult::error(error),
        };

        let mut decoded = IndexMap::with_capacity(entries.len());
        let mut warnings = Vec::new();
        for (index, (raw_key, raw_value)) in entries.iter().enumerate() {
            let key = match self.key_codec.decode(ops, raw_key) {
                DataResult::Success {
                    value,
                    warnings: next,
                } => {
                    warnings.extend(next);
                    value
                }
                DataResult::Error { error, .. } => {
                    let segment = PathSegment::Key(describe_key(ops, raw_key));
                    return abort(Stage::DecodingKey, index, error.within(segment));
                }
            };
            let value = match (self.resolver)(&key).decode(ops, raw_value) {
                DataResult::Success {
                    value,
                    warnings: next,
                } => {
                    warnings.extend(next);
                    value
                }
                DataResult::Error { error, .. } => {
                    let segment = PathSegment::Key(describe_key(ops, raw_key));
                    return abort(Stage::DecodingValue, index, error.within(segment));
                }
            };
            match decoded.entry(key) {
                Entry::Occupied(_) => {
                    let error = CodecError::duplicate_key(format!(
                        "Duplicate entry for key '{}'",
                        describe_key(ops, raw_key)
                    ));
                    return abort(Stage::Inserting, index, error);
                }
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
            }
        }
        DataResult::success_with_warnings(decoded, warnings)
    }
}
