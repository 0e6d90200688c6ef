use crate::error::{CodecError, PathSegment};

/// `DataResult` 是所有编解码器与组合子之间传递的结果类型。
///
/// # 设计背景（Why）
/// - 解码链条中常出现“成功但值得提醒”的情形（例如宽松可选字段吞掉了畸形输入），单纯的 `Result` 无法携带这类非致命告警；
/// - 外层组合子有时需要基于失败时的部分结果决定是否回退，因此错误分支可以附带 `partial`。
///
/// # 契约说明（What）
/// - `Success`：`value` 为有效值，`warnings` 按产生顺序记录非致命告警；
/// - `Error`：`partial` 绝不应被当作有效值使用，它只为外层的显式恢复策略（[`promote_partial`](Self::promote_partial)）服务；
/// - 组合操作（`map`/`and_then`/`apply2`）按顺序拼接告警，不会丢失任何一侧。
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub enum DataResult<T> {
    Success { value: T, warnings: Vec<String> },
    Error { error: CodecError, partial: Option<T> },
}

impl<T> DataResult<T> {
    pub fn success(value: T) -> Self {
        DataResult::Success {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn success_with_warnings(value: T, warnings: Vec<String>) -> Self {
        DataResult::Success { value, warnings }
    }

    pub fn error(error: CodecError) -> Self {
        DataResult::Error {
            error,
            partial: None,
        }
    }

    pub fn error_with_partial(error: CodecError, partial: T) -> Self {
        DataResult::Error {
            error,
            partial: Some(partial),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DataResult::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DataResult::Error { .. })
    }

    /// 成功值的引用；失败时返回 `None`，即便存在 `partial`。
    pub fn value(&self) -> Option<&T> {
        match self {
            DataResult::Success { value, .. } => Some(value),
            DataResult::Error { .. } => None,
        }
    }

    pub fn error_ref(&self) -> Option<&CodecError> {
        match self {
            DataResult::Success { .. } => None,
            DataResult::Error { error, .. } => Some(error),
        }
    }

    pub fn partial(&self) -> Option<&T> {
        match self {
            DataResult::Success { .. } => None,
            DataResult::Error { partial, .. } => partial.as_ref(),
        }
    }

    /// 成功分支上累积的告警；失败分支恒为空。
    pub fn warnings(&self) -> &[String] {
        match self {
            DataResult::Success { warnings, .. } => warnings,
            DataResult::Error { .. } => &[],
        }
    }

    /// 为成功结果追加告警；失败结果原样返回。
    pub fn with_warning(self, warning: impl Into<String>) -> Self {
        match self {
            DataResult::Success {
                value,
                mut warnings,
            } => {
                warnings.push(warning.into());
                DataResult::Success { value, warnings }
            }
            error => error,
        }
    }

    /// 转换成功值，`partial` 同步转换。
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DataResult<U> {
        match self {
            DataResult::Success { value, warnings } => DataResult::Success {
                value: f(value),
                warnings,
            },
            DataResult::Error { error, partial } => DataResult::Error {
                error,
                partial: partial.map(f),
            },
        }
    }

    /// 以可能失败的转换串联下一阶段。
    ///
    /// # 执行逻辑（How）
    /// 1. 成功：调用 `f`，若 `f` 同样成功则按顺序拼接两阶段告警；
    /// 2. 失败且携带 `partial`：对 `partial` 继续调用 `f`，仅保留其产出作为新的 `partial`，错误保持第一阶段的错误；
    /// 3. 失败且无 `partial`：直接透传错误。
    pub fn and_then<U>(self, f: impl FnOnce(T) -> DataResult<U>) -> DataResult<U> {
        match self {
            DataResult::Success {
                value,
                mut warnings,
            } => match f(value) {
                DataResult::Success {
                    value,
                    warnings: next,
                } => {
                    warnings.extend(next);
                    DataResult::Success { value, warnings }
                }
                error => error,
            },
            DataResult::Error {
                error,
                partial: Some(partial),
            } => {
                let partial = match f(partial) {
                    DataResult::Success { value, .. } => Some(value),
                    DataResult::Error { partial, .. } => partial,
                };
                DataResult::Error { error, partial }
            }
            DataResult::Error {
                error,
                partial: None,
            } => DataResult::error(error),
        }
    }

    pub fn map_error(self, f: impl FnOnce(CodecError) -> CodecError) -> Self {
        match self {
            DataResult::Error { error, partial } => DataResult::Error {
                error: f(error),
                partial,
            },
            success => success,
        }
    }

    /// 为嵌套失败补充定位信息。
    pub fn with_context(self, segment: PathSegment) -> Self {
        self.map_error(|error| error.within(segment))
    }

    /// 合并两个独立结果。两侧均失败时错误按 [`CodecError::merged_with`] 拼接。
    pub fn apply2<U, R>(self, other: DataResult<U>, f: impl FnOnce(T, U) -> R) -> DataResult<R> {
        match (self, other) {
            (
                DataResult::Success {
                    value: left,
                    mut warnings,
                },
                DataResult::Success {
                    value: right,
                    warnings: next,
                },
            ) => {
                warnings.extend(next);
                DataResult::Success {
                    value: f(left, right),
                    warnings,
                }
            }
            (DataResult::Error { error: left, .. }, DataResult::Error { error: right, .. }) => {
                DataResult::error(left.merged_with(&right))
            }
            (DataResult::Error { error, .. }, DataResult::Success { .. })
            | (DataResult::Success { .. }, DataResult::Error { error, .. }) => {
                DataResult::error(error)
            }
        }
    }

    /// 显式恢复：把携带 `partial` 的失败提升为成功，错误消息转为告警。
    pub fn promote_partial(self) -> Self {
        match self {
            DataResult::Error {
                error,
                partial: Some(value),
            } => DataResult::Success {
                value,
                warnings: vec![error.to_string()],
            },
            other => other,
        }
    }

    /// 丢弃告警，转为标准 `Result` 以便使用 `?` 传播。
    pub fn into_result(self) -> Result<T, CodecError> {
        match self {
            DataResult::Success { value, .. } => Ok(value),
            DataResult::Error { error, .. } => Err(error),
        }
    }
}

impl<T> From<Result<T, CodecError>> for DataResult<T> {
    fn from(result: Result<T, CodecError>) -> Self {
        match result {
            Ok(value) => DataResult::success(value),
            Err(error) => DataResult::error(error),
        }
    }
}
