//! # braid-core Prelude
//!
//! 组装编解码器图时最常用的 Trait 与类型一站式导入：`use braid_core::prelude::*;`。
//!
//! 仅收录跨模块高频使用的条目；具体组合子构造函数请从 crate 根或 [`crate::combinator`] 显式引入。

pub use crate::codec::{Codec, CodecExt, ErasedCodec};
pub use crate::error::{CodecError, ErrorKind};
pub use crate::ops::{Ops, Value, ValueOps};
pub use crate::record::{MapCodec, MapCodecExt};
pub use crate::result::DataResult;
