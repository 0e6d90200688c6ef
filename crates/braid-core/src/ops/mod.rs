//! 结构化值能力抽象。
//!
//! # 设计背景（Why）
//! - 编解码器不关心最终落地的是 JSON 树、二进制标签树还是内存映射树，只需要一组狭窄的“构建/检视/转换”能力；
//! - 将能力收敛为 [`Ops`] Trait，具体格式后端（例如 `braid-codecs` 中的 JSON 后端）只需实现这一面即可接入全部组合子。
//!
//! # 契约说明（What）
//! - 所有构建方法都产出新值，编解码器从不就地修改传入的结构化值；
//! - 检视方法在形态不符时返回 [`ErrorKind::ShapeMismatch`](crate::ErrorKind::ShapeMismatch)。

mod value;

use std::fmt;

use crate::result::DataResult;
use crate::sealed::Sealed;

pub use value::{Value, ValueOps};

/// 格式无关的数值表示。
///
/// 整数与浮点分开保存，避免 `i64` 经由 `f64` 往返时丢失精度。
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// 无损转换为整数；带小数部分或越界的浮点返回 `None`。
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(value) => Some(value),
            Number::Float(value)
                if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
            {
                Some(value as i64)
            }
            Number::Float(_) => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(value) => value as f64,
            Number::Float(value) => value,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(value) => write!(f, "{value}"),
            Number::Float(value) => write!(f, "{value}"),
        }
    }
}

/// 结构化值的形态。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Empty,
    Bool,
    Number,
    String,
    List,
    Map,
}

impl Shape {
    pub fn is_scalar(self) -> bool {
        matches!(self, Shape::Bool | Shape::Number | Shape::String)
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Empty => "empty",
            Shape::Bool => "bool",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::List => "list",
            Shape::Map => "map",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `Ops` 描述一种结构化值格式的最小能力集。
///
/// # 设计初衷（Why）
/// - 借鉴 DataFixerUpper `DynamicOps` 的思路：编解码器以泛型方式接收 `Ops`，同一个编解码器即可服务任意后端；
/// - 关联类型 `Value` 是该后端的树节点类型，由后端自己拥有，本库仅按值/按引用传递。
///
/// # 行为逻辑（How）
/// - `create_*` 构建新节点；
/// - `shape` 与 `get_*` 检视节点；
/// - [`convert_to`](Self::convert_to) 依据形态递归地在两种后端之间重建值，是跨格式桥接（`with_ops`、对象层编解码器）的基础。
///
/// # 契约说明（What）
/// - **前置条件**：`shape` 的结果必须与对应 `get_*` 的成功与否一致；
/// - **后置条件**：`get_map_entries` 按自然条目顺序返回键值对，不做去重；
/// - 实现需满足 `Send + Sync + 'static`，以便共享的编解码器在并发解码中直接引用。
///
/// # 风险提示（Trade-offs）
/// - 检视方法返回拥有所有权的副本，换取对所有后端统一的接口；遍历代价与值的规模线性相关。
pub trait Ops: Send + Sync + 'static + Sealed {
    /// 后端树节点类型。
    type Value: Clone + fmt::Debug + PartialEq + Send + Sync + 'static;

    fn empty(&self) -> Self::Value;

    fn create_bool(&self, value: bool) -> Self::Value;

    fn create_number(&self, value: Number) -> Self::Value;

    fn create_string(&self, value: &str) -> Self::Value;

    fn create_list(&self, items: Vec<Self::Value>) -> Self::Value;

    fn create_map(&self, entries: Vec<(Self::Value, Self::Value)>) -> Self::Value;

    fn shape(&self, value: &Self::Value) -> Shape;

    fn get_bool(&self, value: &Self::Value) -> DataResult<bool>;

    fn get_number(&self, value: &Self::Value) -> DataResult<Number>;

    fn get_string(&self, value: &Self::Value) -> DataResult<String>;

    fn get_list(&self, value: &Self::Value) -> DataResult<Vec<Self::Value>>;

    fn get_map_entries(&self, value: &Self::Value) -> DataResult<Vec<(Self::Value, Self::Value)>>;

    /// 将本后端的值按形态递归重建为 `out` 后端的值。
    ///
    /// 检视失败（实现违反了 `shape` 与 `get_*` 的一致性约束）时退化为 `out.empty()`。
    fn convert_to<O: Ops>(&self, out: &O, value: &Self::Value) -> O::Value {
        let converted = match self.shape(value) {
            Shape::Empty => return out.empty(),
            Shape::Bool => self.get_bool(value).map(|b| out.create_bool(b)),
            Shape::Number => self.get_number(value).map(|n| out.create_number(n)),
            Shape::String => self.get_string(value).map(|s| out.create_string(&s)),
            Shape::List => self.get_list(value).map(|items| {
                out.create_list(
                    items
                        .iter()
                        .map(|item| self.convert_to(out, item))
                        .collect(),
                )
            }),
            Shape::Map => self.get_map_entries(value).map(|entries| {
                out.create_map(
                    entries
                        .iter()
                        .map(|(k, v)| (self.convert_to(out, k), self.convert_to(out, v)))
                        .collect(),
                )
            }),
        };
        converted.into_result().unwrap_or_else(|_| out.empty())
    }
}

/// 形态不符时的统一错误消息：`Not a <shape>: <value>`。
///
/// 供各后端的 `get_*` 实现复用，保证不同格式的报错文本一致。
pub fn not_a<T, V: fmt::Debug>(expected: Shape, value: &V) -> DataResult<T> {
    DataResult::error(crate::CodecError::shape_mismatch(format!(
        "Not a {expected}: {value:?}"
    )))
}

/// 期望映射却得到其他形态时的统一错误。
pub(crate) fn expected_map(found: Shape) -> crate::CodecError {
    crate::CodecError::shape_mismatch(format!("Expected map, found {found}"))
}

/// 渲染一个原始结构化键，用作错误定位路径：字符串键直接取文本，其余形态使用调试表示。
pub(crate) fn describe_key<O: Ops>(ops: &O, raw: &O::Value) -> String {
    match ops.get_string(raw) {
        DataResult::Success { value, .. } => value,
        DataResult::Error { .. } => format!("{raw:?}"),
    }
}
