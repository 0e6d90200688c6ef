//! 编解码器核心：泛型/对象双层契约与基础类型编解码器。

pub mod primitive;
pub mod traits;

pub use primitive::{
    BOOL, BoolCodec, DOUBLE, DoubleCodec, FLOAT, FloatCodec, INT, INT_STREAM, IntCodec, LONG,
    LongCodec, PASSTHROUGH, PassthroughCodec, STRING, StringCodec,
};
pub use traits::{Codec, CodecExt, DynCodec, ErasedCodec, TypedCodecAdapter};
