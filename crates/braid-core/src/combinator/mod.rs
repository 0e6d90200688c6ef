//! 组合子库。
//!
//! # 契约说明（What）
//! - 每个组合子都是保结构的包装：若内部编解码器在某个值子集上互逆，则包装后在对应的变换子集上依然互逆，
//!   文档化的规范化（例如单元素列表折叠为标量）除外；
//! - 组合子从不把嵌套失败吞成默认值；唯一的例外是可选字段的“缺失”分支与 `list_or_unit` 的形态规范化。

pub mod bridge;
pub mod either;
pub mod list;
pub mod map;
pub mod validate;
pub mod variants;

pub use bridge::{WithMap, WithOps, with_map, with_ops, with_value};
pub use either::{Either, EitherCodec, either};
pub use list::{
    ArrayOrUnit, FixedLength, ListCodec, ListOrUnit, ListToArray, array_or_unit, fixed_length,
    list_or_unit, list_to_array,
};
pub use map::{ComapFlatMap, FlatXmap, Stable, Xmap};
pub use validate::{Validate, ValidateWith, validate};
pub use variants::{KeyedVariants, VariantTable, keyed_variants, string_variants};
