use crate::codec::Codec;
use crate::error::CodecError;
use crate::ops::Ops;
use crate::result::DataResult;

/// 二选一的带标签联合。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

impl<L, R> Either<L, R> {
    /// 将两侧统一折叠为同一类型。
    pub fn fold<T>(self, left: impl FnOnce(L) -> T, right: impl FnOnce(R) -> T) -> T {
        match self {
            Either::Left(value) => left(value),
            Either::Right(value) => right(value),
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    pub fn left(self) -> Option<L> {
        match self {
            Either::Left(value) => Some(value),
            Either::Right(_) => None,
        }
    }

    pub fn right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(value) => Some(value),
        }
    }
}

/// `EitherCodec` 按“先左后右”的策略尝试两个备选编解码器。
///
/// # 设计初衷（Why）
/// - 常见写法是让两个备选分支作用于互不相交的形态（例如完整记录 vs 仅注册名字符串），
///   从而表达“同一值的两种书写方式”；
/// - 分支间的歧义由组合方负责规避，本组合子只保证确定性的优先级：第一个分支胜出。
///
/// # 行为逻辑（How）
/// 1. 以 `first` 解码，成功则返回 `Either::Left`；
/// 2. 否则以 `second` 解码，成功则返回 `Either::Right`；
/// 3. 两者均失败时按下列策略选择错误：
///    - 恰有一侧是顶层形态不匹配：返回另一侧的错误（其形态已匹配，消息更能定位问题）；
///    - 其余情况：以第一侧错误为主，拼接第二侧消息。
///
/// # 契约说明（What）
/// - 编码按 `Either` 的实际变体选择分支，不做形态推断；
///   “总是以左侧表示编码”之类的策略由组合方在外层 `xmap` 中显式选择；
/// - 不声明稳定：`Right` 值的编码若也被 `first` 接受，解码会得到 `Left`。组合方固定编码分支后可用
///   [`stable`](crate::CodecExt::stable) 显式声明。
#[derive(Clone, Debug)]
pub struct EitherCodec<A, B> {
    first: A,
    second: B,
}

impl<A, B> EitherCodec<A, B> {
    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }
}

/// 构造 [`EitherCodec`]。
pub fn either<A: Codec, B: Codec>(first: A, second: B) -> EitherCodec<A, B> {
    EitherCodec { first, second }
}

impl<A: Codec, B: Codec> Codec for EitherCodec<A, B> {
    type Value = Either<A::Value, B::Value>;

    fn encode<O: Ops>(&self, value: &Self::Value, ops: &O) -> DataResult<O::Value> {
        match value {
            Either::Left(left) => self.first.encode(left, ops),
            Either::Right(right) => self.second.encode(right, ops),
        }
    }

    fn decode<O: Ops>(&self, ops: &O, input: &O::Value) -> DataResult<Self::Value> {
        let first = match self.first.decode(ops, input) {
            DataResult::Success { value, warnings } => {
                return DataResult::success_with_warnings(Either::Left(value), warnings);
            }
            DataResult::Error { error, .. } => error,
        };
        match self.second.decode(ops, input) {
            DataResult::Success { value, warnings } => {
                tracing::trace!(
                    target: "braid::either",
                    first_error = %first,
                    "first alternative rejected input, second alternative accepted it"
                );
                DataResult::success_with_warnings(Either::Right(value), warnings)
            }
            DataResult::Error { error: second, .. } => {
                DataResult::error(select_failure(first, second))
            }
        }
    }
}

fn select_failure(first: CodecError, second: CodecError) -> CodecError {
    match (
        first.is_top_level_shape_mismatch(),
        second.is_top_level_shape_mismatch(),
    ) {
        (true, false) => second,
        (false, true) => first,
        _ => first.merged_with(&second),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{INT, LONG, STRING};
    use crate::error::ErrorKind;
    use crate::ops::{Value, ValueOps};

    #[test]
    fn first_alternative_wins() {
        let codec = either(INT, INT);
        assert_eq!(
            codec.decode(&ValueOps, &Value::from(5)).value(),
            Some(&Either::Left(5))
        );
    }

    #[test]
    fn overlapping_alternatives_are_not_stable() {
        let codec = either(INT, LONG);
        let encoded = codec
            .encode(&Either::Right(5), &ValueOps)
            .into_result()
            .unwrap();
        assert_eq!(
            codec.decode(&ValueOps, &encoded).value(),
            Some(&Either::Left(5))
        );
        assert!(!codec.is_stable());
        assert!(!either(INT, STRING).is_stable());
    }

    #[test]
    fn falls_back_to_second_alternative() {
        let codec = either(INT, STRING);
        assert_eq!(
            codec.decode(&ValueOps, &Value::from("five")).value(),
            Some(&Either::Right("five".to_owned()))
        );
    }

    #[test]
    fn both_shape_mismatches_are_merged() {
        let codec = either(INT, STRING);
        let err = codec
            .decode(&ValueOps, &Value::from(true))
            .into_result()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert_eq!(
            err.message(),
            "Not a number: Bool(true); Not a string: Bool(true)"
        );
    }
}
