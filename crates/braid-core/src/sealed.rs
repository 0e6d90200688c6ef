//! 内部 sealed 模块用于控制外部扩展边界。
//!
//! # 设计背景（Why）
//! - `braid-core` 向外暴露 `Codec`、`MapCodec`、`Ops` 等可实现的 Trait，需要在 SemVer 框架下保持未来演进空间。
//! - 通过统一的 `Sealed` 标记，我们能够在不破坏公开 API 的情况下，为 Trait 增加默认方法或强化约束。
//!
//! # 契约说明（What）
//! - `Sealed` 无需调用方显式实现；任意类型默认满足该约束。
//! - Blanket 实现意味着当前不会限制实现者，调用方仍可为自定义格式实现 `Ops`、为自定义类型实现 `Codec`。
pub(crate) trait Sealed {}

impl<T: ?Sized> Sealed for T {}
