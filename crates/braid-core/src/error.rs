use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

/// 稳定错误码命名空间，遵循 `<域>.<语义>` 约定。
///
/// # 契约说明（What）
/// - 码值在 SemVer 范围内保持不变，日志与调用方可以据此做精确分类；
/// - 每个码值与 [`ErrorKind`] 一一对应，通过 [`ErrorKind::code`] 取得。
pub mod codes {
    /// 结构化值形态（map/list/标量）与编解码器期望不符。
    pub const SHAPE_MISMATCH: &str = "codec.shape_mismatch";
    /// 形态正确但未通过语义校验。
    pub const VALIDATION_FAILURE: &str = "codec.validation_failure";
    /// 变体表中不存在对应键。
    pub const UNKNOWN_VARIANT: &str = "codec.unknown_variant";
    /// 同一映射中出现重复键。
    pub const DUPLICATE_KEY: &str = "codec.duplicate_key";
    /// 记录中缺少必填字段。
    pub const MISSING_FIELD: &str = "codec.missing_field";
    /// 编码方向的转换失败。
    pub const ENCODE: &str = "codec.encode";
}

/// 编解码失败的分类。
///
/// # 设计背景（Why）
/// - 组合子在错误传播路径上只做上下文包装，不改写分类；调用方因此能在任意深度拿到最内层的失败原因。
/// - 嵌套失败（NestedFailure）不单独占用分类，而是体现为非空的 [`CodecError::path`]。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ShapeMismatch,
    ValidationFailure,
    UnknownVariant,
    DuplicateKey,
    MissingField,
    Encode,
}

impl ErrorKind {
    /// 返回对应的稳定错误码。
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::ShapeMismatch => codes::SHAPE_MISMATCH,
            ErrorKind::ValidationFailure => codes::VALIDATION_FAILURE,
            ErrorKind::UnknownVariant => codes::UNKNOWN_VARIANT,
            ErrorKind::DuplicateKey => codes::DUPLICATE_KEY,
            ErrorKind::MissingField => codes::MISSING_FIELD,
            ErrorKind::Encode => codes::ENCODE,
        }
    }
}

/// 错误定位路径中的一段。
///
/// - `Field`：记录字段名，渲染为 `name` 或 `.name`；
/// - `Index`：列表下标，渲染为 `[i]`；
/// - `Key`：分派映射中的条目键，渲染为 `[key]`。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Field(Cow<'static, str>),
    Index(usize),
    Key(String),
}

/// `CodecError` 是所有编解码失败的最终形态。
///
/// # 设计背景（Why）
/// - 组合子图可能很深，调用方需要一条从顶层结构化值指向故障位置的路径，才能在原始文档中定位问题。
/// - 以稳定分类 + 人类可读消息 + 定位路径三元组承载信息，渲染交给 `Display`。
///
/// # 逻辑解析（How）
/// - 叶子编解码器通过 [`CodecError::new`] 或快捷构造函数创建错误；
/// - 外层组合子在向上传播时调用 [`within`](Self::within)，把字段名、下标或键插入路径最前端；
/// - `Display` 输出 `<路径>: <消息>`，路径为空时只输出消息。
///
/// # 契约说明（What）
/// - **后置条件**：分类与消息在传播过程中保持不变，只有路径增长；
/// - 结构体满足 `Send + Sync + 'static`，可跨线程传递。
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}", self.render())]
pub struct CodecError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    path: Vec<PathSegment>,
}

impl CodecError {
    /// 构造不带定位路径的错误。
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: Vec::new(),
        }
    }

    pub fn shape_mismatch(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ShapeMismatch, message)
    }

    pub fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ValidationFailure, message)
    }

    pub fn unknown_variant(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::UnknownVariant, message)
    }

    pub fn duplicate_key(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::DuplicateKey, message)
    }

    pub fn encode(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Encode, message)
    }

    /// 记录中缺少字段 `name`。
    pub fn missing_field(name: &str) -> Self {
        Self::new(ErrorKind::MissingField, format!("No key {name} in map"))
    }

    /// 将外层定位信息插入路径最前端。
    ///
    /// 路径按“由外到内”的顺序保存，因此外层组合子总是插入到下标 0。
    pub fn within(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// 合并两个并列备选分支的失败，消息按 `"<first>; <second>"` 拼接，分类沿用 `self`。
    pub fn merged_with(&self, other: &CodecError) -> Self {
        Self::new(self.kind, format!("{self}; {other}"))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// 不含路径的原始消息。
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 由外到内的定位路径。
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    /// 失败是否发生在某个子编解码器内部。
    pub fn is_nested(&self) -> bool {
        !self.path.is_empty()
    }

    /// 是否为顶层形态不匹配：输入本身的形态不对，而非其中某个子元素。
    pub(crate) fn is_top_level_shape_mismatch(&self) -> bool {
        self.kind == ErrorKind::ShapeMismatch && !self.is_nested()
    }

    fn render(&self) -> String {
        if self.path.is_empty() {
            return self.message.to_string();
        }
        let mut rendered = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Field(name) if rendered.is_empty() => rendered.push_str(name),
                PathSegment::Field(name) => {
                    rendered.push('.');
                    rendered.push_str(name);
                }
                PathSegment::Index(index) => rendered.push_str(&format!("[{index}]")),
                PathSegment::Key(key) => rendered.push_str(&format!("[{key}]")),
            }
        }
        format!("{rendered}: {}", self.message)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "[{index}]"),
            PathSegment::Key(key) => write!(f, "[{key}]"),
        }
    }
}
