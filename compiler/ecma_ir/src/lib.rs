//! Ecma IR - names, spans, operator tags and the parser-output tree.
//!
//! The operator core consumes this tree; it never produces it. A parser (or a
//! test) allocates [`Expr`] nodes in an [`ExprArena`] and hands the root
//! [`ExprId`] to the evaluator's lowering pass.
//!
//! - [`Name`] / [`StringInterner`]: interned identifiers and string literals
//! - [`Span`]: byte ranges for diagnostics
//! - [`BinaryOp`] / [`AssignOp`]: closed operator tag sets
//! - [`ExprKind`]: literals, identifiers, member access, calls, operators,
//!   assignment and destructuring patterns

mod expr;
mod interner;
mod name;
mod operators;
mod span;

pub use expr::{Expr, ExprArena, ExprId, ExprKind, FunctionKind, Literal, MemberProperty};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use operators::{AssignOp, BinaryOp, UnknownOperator};
pub use span::Span;
