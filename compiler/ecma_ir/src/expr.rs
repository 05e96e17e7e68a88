//! Flat expression tree.
//!
//! Nodes live in an [`ExprArena`] and refer to each other through
//! [`ExprId`] indices. The arena is append-only; ids stay valid for its
//! lifetime.

use std::fmt;

use crate::{AssignOp, BinaryOp, Name, Span};

/// Index into an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Literal syntax.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Literal {
    Undefined,
    Null,
    Bool(bool),
    /// Numeric literal as written; integral values within int32 become the
    /// exact-integer subtype when converted.
    Number(f64),
    Str(Name),
}

/// Whether a function literal was written as `function` or `class`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Arrow,
    Class,
}

/// Property part of a member expression.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MemberProperty {
    /// `obj.name`
    Static(Name),
    /// `obj[expr]`
    Computed(ExprId),
}

/// Expression kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Identifier(Name),
    Member {
        object: ExprId,
        property: MemberProperty,
    },
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    /// Function or class literal. `name` is `None` for anonymous literals.
    Function {
        name: Option<Name>,
        kind: FunctionKind,
    },
    Array(Vec<ExprId>),
    Object(Vec<(Name, ExprId)>),
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Assign {
        op: AssignOp,
        target: ExprId,
        value: ExprId,
    },
    /// `[a, , b]` on the left of `=`; `None` marks a hole.
    ArrayPattern(Vec<Option<ExprId>>),
    /// `{ key: target }` on the left of `=`.
    ObjectPattern(Vec<(Name, ExprId)>),
}

/// An expression node with its source position.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// Append-only storage for expression nodes.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a node and return its id.
    ///
    /// # Panics
    /// Panics if the arena exceeds `u32::MAX` nodes.
    pub fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let index = u32::try_from(self.exprs.len())
            .unwrap_or_else(|_| panic!("expression arena exceeded u32::MAX nodes"));
        self.exprs.push(Expr { kind, span });
        ExprId::new(index)
    }

    /// Get a node, or `None` for an id from another arena.
    #[inline]
    pub fn get(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    // Convenience constructors for embedders and tests that build trees by hand.

    pub fn literal(&mut self, literal: Literal) -> ExprId {
        self.alloc(ExprKind::Literal(literal), Span::DUMMY)
    }

    pub fn number(&mut self, value: f64) -> ExprId {
        self.literal(Literal::Number(value))
    }

    pub fn string(&mut self, value: Name) -> ExprId {
        self.literal(Literal::Str(value))
    }

    pub fn ident(&mut self, name: Name) -> ExprId {
        self.alloc(ExprKind::Identifier(name), Span::DUMMY)
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.alloc(ExprKind::Binary { op, left, right }, Span::DUMMY)
    }

    pub fn assign(&mut self, op: AssignOp, target: ExprId, value: ExprId) -> ExprId {
        self.alloc(ExprKind::Assign { op, target, value }, Span::DUMMY)
    }

    pub fn member(&mut self, object: ExprId, property: Name) -> ExprId {
        self.alloc(
            ExprKind::Member {
                object,
                property: MemberProperty::Static(property),
            },
            Span::DUMMY,
        )
    }

    pub fn call(&mut self, callee: ExprId, args: Vec<ExprId>) -> ExprId {
        self.alloc(ExprKind::Call { callee, args }, Span::DUMMY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StringInterner;
    use pretty_assertions::assert_eq;

    #[test]
    fn alloc_returns_sequential_ids() {
        let mut arena = ExprArena::new();
        let a = arena.number(1.0);
        let b = arena.number(2.0);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn binary_node_links_children() {
        let interner = StringInterner::new();
        let mut arena = ExprArena::new();
        let x = arena.ident(interner.intern("x"));
        let two = arena.number(2.0);
        let sum = arena.binary(BinaryOp::Add, x, two);

        let node = arena.get(sum).map(|e| e.kind.clone());
        assert_eq!(
            node,
            Some(ExprKind::Binary {
                op: BinaryOp::Add,
                left: x,
                right: two,
            })
        );
    }

    #[test]
    fn foreign_id_is_not_found() {
        let arena = ExprArena::new();
        assert!(arena.get(ExprId::new(7)).is_none());
    }
}
