use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::codec::{Codec, STRING, StringCodec};
use crate::error::CodecError;
use crate::ops::Ops;
use crate::result::DataResult;

/// `VariantTable` 是由有限变体集合构建的不可变 键 → 变体 查找表。
///
/// # 设计背景（Why）
/// - 枚举类配置（例如槽位名、模式名）需要以字符串或其他键书写，但在内存中使用强类型值；
/// - 变体集合由调用方显式枚举，表不做任何运行时发现。
///
/// # 契约说明（What）
/// - **构建**：O(变体数)；键重复时返回 [`DuplicateKey`](crate::ErrorKind::DuplicateKey)，保证键唯一；
/// - **查找**：平均 O(1)；缺失时总是返回 [`UnknownVariant`](crate::ErrorKind::UnknownVariant)，从不替换为默认值；
/// - `keys()` 按变体声明顺序迭代。
#[derive(Clone, Debug)]
pub struct VariantTable<K, A> {
    by_key: IndexMap<K, A>,
}

impl<K, A> VariantTable<K, A>
where
    K: Eq + Hash + fmt::Display,
    A: Clone,
{
    /// 按 `key_of` 为每个变体计算键并建表。
    ///
    /// 两个变体得到相同的键时返回 [`DuplicateKey`](crate::ErrorKind::DuplicateKey) 错误，不会静默覆盖。
    pub fn new<F>(variants: impl IntoIterator<Item = A>, key_of: F) -> Result<Self, CodecError>
    where
        F: Fn(&A) -> K,
    {
        let variants = variants.into_iter();
        let mut by_key = IndexMap::with_capacity(variants.size_hint().0);
        for variant in variants {
            let key = key_of(&variant);
            if by_key.contains_key(&key) {
                return Err(CodecError::duplicate_key(format!(
                    "Duplicate variant key '{key}'"
                )));
            }
            by_key.insert(key, variant);
        }
        Ok(Self { by_key })
    }

    pub fn get(&self, key: &K) -> Option<&A> {
        self.by_key.get(key)
    }

    /// 查找变体，缺失时返回 `No variant with key '<key>'`。
    pub fn lookup(&self, key: &K) -> DataResult<A> {
        match self.by_key.get(key) {
            Some(variant) => DataResult::success(variant.clone()),
            None => DataResult::error(CodecError::unknown_variant(format!(
                "No variant with key '{key}'"
            ))),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.by_key.keys()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// 以键编解码器书写的变体编解码器。
///
/// - 解码：先以 `key_codec` 解码出键，再在表中查找；
/// - 编码：经 `key_of` 从值重新推导键，再以 `key_codec` 编码。
pub struct KeyedVariants<KC: Codec, A, F> {
    key_codec: KC,
    table: VariantTable<KC::Value, A>,
    key_of: F,
}

impl<KC: Codec, A, F> KeyedVariants<KC, A, F> {
    pub fn table(&self) -> &VariantTable<KC::Value, A> {
        &self.table
    }
}

impl<KC, A, F> Codec for KeyedVariants<KC, A, F>
where
    KC: Codec,
    KC::Value: Eq + Hash + fmt::Display,
    A: Clone + Send + Sync + 'static,
    F: Fn(&A) -> KC::Value + Send + Sync + 'static,
{
    type Value = A;

    fn encode<O: Ops>(&self, value: &A, ops: &O) -> DataResult<O::Value> {
        self.key_codec.encode(&(self.key_of)(value), ops)
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<A> {
        self.key_codec
            .decode(ops, input)
            .and_then(|key| self.table.lookup(&key))
    }

    fn is_stable(&self) -> bool {
        self.key_codec.is_stable()
    }
}

/// 由变体集合、键提取函数与键编解码器构造 [`KeyedVariants`]。
///
/// 变体的键必须唯一，否则返回 [`DuplicateKey`](crate::ErrorKind::DuplicateKey) 错误。
pub fn keyed_variants<A, KC, F>(
    variants: impl IntoIterator<Item = A>,
    key_of: F,
    key_codec: KC,
) -> Result<KeyedVariants<KC, A, F>, CodecError>
where
    KC: Codec,
    KC::Value: Eq + Hash + fmt::Display,
    A: Clone + Send + Sync + 'static,
    F: Fn(&A) -> KC::Value + Send + Sync + 'static,
{
    let table = VariantTable::new(variants, &key_of)?;
    Ok(KeyedVariants {
        key_codec,
        table,
        key_of,
    })
}

/// 以字符串名书写的 [`keyed_variants`]。
pub fn string_variants<A, F>(
    variants: impl IntoIterator<Item = A>,
    name_of: F,
) -> Result<KeyedVariants<StringCodec, A, F>, CodecError>
where
    A: Clone + Send + Sync + 'static,
    F: Fn(&A) -> String + Send + Sync + 'static,
{
    keyed_variants(variants, name_of, STRING)
}
