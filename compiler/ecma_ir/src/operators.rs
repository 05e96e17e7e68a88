//! Operator tags produced by the parser.

use std::fmt;
use std::str::FromStr;

/// Binary operator tag.
///
/// The set is closed: every tag has exactly one evaluator in `ecma_eval`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Equality
    StrictEq,
    StrictNotEq,
    Eq,
    NotEq,

    // Relational
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Exp,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,

    // Type/shape checks
    InstanceOf,
    In,
}

impl BinaryOp {
    /// All operator tags, in declaration order.
    pub const ALL: [BinaryOp; 22] = [
        Self::StrictEq,
        Self::StrictNotEq,
        Self::Eq,
        Self::NotEq,
        Self::Lt,
        Self::Gt,
        Self::LtEq,
        Self::GtEq,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Exp,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::Shl,
        Self::Shr,
        Self::UShr,
        Self::InstanceOf,
        Self::In,
    ];

    /// Source-level spelling, used in diagnostics.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Exp => "**",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::InstanceOf => "instanceof",
            Self::In => "in",
        }
    }

    /// Whether the result depends only on the operand values.
    ///
    /// `instanceof` and `in` inspect prototype chains and property shapes,
    /// which literal syntax cannot describe, so they are never folded.
    pub const fn is_foldable(self) -> bool {
        !matches!(self, Self::InstanceOf | Self::In)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Raised when a raw operator token has no tag.
///
/// A parser that produces such a token has a defect; the tree is rejected
/// while it is being built, never while it runs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized binary operator `{0}`")]
pub struct UnknownOperator(pub String);

impl FromStr for BinaryOp {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_symbol() == s)
            .ok_or_else(|| UnknownOperator(s.to_owned()))
    }
}

/// Assignment operator tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AssignOp {
    /// `=`
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    ExpAssign,
    ShlAssign,
    ShrAssign,
    UShrAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    /// `&&=`
    AndAssign,
    /// `||=`
    OrAssign,
    /// `??=`
    NullishAssign,
}

impl AssignOp {
    /// The binary operator a compound assignment applies, if any.
    pub const fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Self::AddAssign => Some(BinaryOp::Add),
            Self::SubAssign => Some(BinaryOp::Sub),
            Self::MulAssign => Some(BinaryOp::Mul),
            Self::DivAssign => Some(BinaryOp::Div),
            Self::ModAssign => Some(BinaryOp::Mod),
            Self::ExpAssign => Some(BinaryOp::Exp),
            Self::ShlAssign => Some(BinaryOp::Shl),
            Self::ShrAssign => Some(BinaryOp::Shr),
            Self::UShrAssign => Some(BinaryOp::UShr),
            Self::BitAndAssign => Some(BinaryOp::BitAnd),
            Self::BitOrAssign => Some(BinaryOp::BitOr),
            Self::BitXorAssign => Some(BinaryOp::BitXor),
            Self::Assign | Self::AndAssign | Self::OrAssign | Self::NullishAssign => None,
        }
    }

    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::ExpAssign => "**=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::UShrAssign => ">>>=",
            Self::BitAndAssign => "&=",
            Self::BitOrAssign => "|=",
            Self::BitXorAssign => "^=",
            Self::AndAssign => "&&=",
            Self::OrAssign => "||=",
            Self::NullishAssign => "??=",
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
