#![deny(unsafe_code)]
#![allow(private_bounds)]
#![doc = "braid-core: 格式无关、可组合的双向编解码组合子引擎。"]
#![doc = ""]
#![doc = "== 分层 =="]
#![doc = "1. 泛型层 [`Codec`]：编解码器对结构化值后端 [`Ops`] 泛型，零成本组合。"]
#![doc = "2. 对象层 [`DynCodec`]：以内存树 [`Value`] 为交换格式，支撑按键分派等运行时选择。"]
#![doc = "3. 组合子：映射、校验、二选一、列表规范化、变体表、记录字段与按键分派映射。"]
#![doc = ""]
#![doc = "== 并发 =="]
#![doc = "所有编解码器构造后即不可变，`encode`/`decode` 不加锁、不修改共享状态，可作为进程级静态实例在多线程中共享。"]

mod sealed;

pub mod codec;
pub mod combinator;
pub mod dispatch;
pub mod error;
pub mod ops;
pub mod prelude;
pub mod record;
pub mod result;

pub use codec::{
    BOOL, BoolCodec, Codec, CodecExt, DOUBLE, DoubleCodec, DynCodec, ErasedCodec, FLOAT,
    FloatCodec, INT, INT_STREAM, IntCodec, LONG, LongCodec, PASSTHROUGH, PassthroughCodec, STRING,
    StringCodec, TypedCodecAdapter,
};
pub use combinator::{
    ArrayOrUnit, ComapFlatMap, Either, EitherCodec, FixedLength, FlatXmap, KeyedVariants,
    ListCodec, ListOrUnit, ListToArray, Stable, Validate, ValidateWith, VariantTable, WithMap,
    WithOps, Xmap, array_or_unit, either, fixed_length, keyed_variants, list_or_unit,
    list_to_array, string_variants, validate, with_map, with_ops, with_value,
};
pub use dispatch::{DispatchMapCodec, dispatch_by_map_key};
pub use error::{CodecError, ErrorKind, PathSegment, codes};
pub use ops::{Number, Ops, Shape, Value, ValueOps, not_a};
pub use record::{
    And, FieldCodec, MapBuilder, MapCodec, MapCodecExt, MapView, MapXmap,
    OptionalFieldCodec, PropagatingOptionalField, RecordCodec, StrictOptionalFieldCodec,
    propagating_optional_field_of,
};
pub use result::DataResult;
