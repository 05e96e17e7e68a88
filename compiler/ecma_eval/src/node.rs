//! Evaluator nodes.
//!
//! The lowering pass turns parser output into this tree once; the
//! interpreter walks it for every evaluation. Binary nodes carry the
//! evaluator for their operator, chosen at build time, and literal-only
//! subtrees are already folded into [`Node::Constant`].

use std::fmt;

use ecma_ir::{AssignOp, BinaryOp, FunctionKind, Name, Span};
use ecma_value::{JsStr, Value};

use crate::operators::{evaluator_for, BinaryFn};

/// An evaluator node.
#[derive(Clone, Debug)]
pub enum Node {
    Constant(Value),
    Identifier {
        name: Name,
        span: Span,
    },
    Member(Box<MemberNode>),
    Call(Box<CallNode>),
    /// Function or class literal; evaluates to a fresh function object.
    Function {
        name: Option<JsStr>,
        kind: FunctionKind,
    },
    Array(Vec<Node>),
    Object(Vec<(JsStr, Node)>),
    Binary(Box<BinaryNode>),
    Assign(Box<AssignNode>),
}

impl Node {
    pub fn is_constant(&self) -> bool {
        matches!(self, Node::Constant(_))
    }

    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Node::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// An anonymous function or class literal, which takes the name of the
    /// identifier it is first assigned to.
    pub fn is_anonymous_function(&self) -> bool {
        matches!(self, Node::Function { name: None, .. })
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Identifier { span, .. } => *span,
            Node::Member(member) => member.span,
            Node::Call(call) => call.span,
            Node::Binary(binary) => binary.span,
            Node::Assign(assign) => assign.span,
            Node::Constant(_) | Node::Function { .. } | Node::Array(_) | Node::Object(_) => {
                Span::DUMMY
            }
        }
    }
}

/// Property part of a member access.
#[derive(Clone, Debug)]
pub enum PropertyKey {
    Static(JsStr),
    Computed(Node),
}

#[derive(Clone, Debug)]
pub struct MemberNode {
    pub object: Node,
    pub property: PropertyKey,
    pub span: Span,
}

#[derive(Clone, Debug)]
pub struct CallNode {
    pub callee: Node,
    pub args: Vec<Node>,
    pub span: Span,
}

/// A binary operator bound to its evaluator.
#[derive(Clone)]
pub struct BinaryNode {
    pub op: BinaryOp,
    pub left: Node,
    pub right: Node,
    pub span: Span,
    eval: BinaryFn,
}

impl BinaryNode {
    pub fn new(op: BinaryOp, left: Node, right: Node, span: Span) -> Self {
        BinaryNode {
            op,
            left,
            right,
            span,
            eval: evaluator_for(op),
        }
    }

    #[inline]
    pub fn evaluator(&self) -> BinaryFn {
        self.eval
    }
}

impl fmt::Debug for BinaryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryNode")
            .field("op", &self.op)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("span", &self.span)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub struct AssignNode {
    pub op: AssignOp,
    pub target: AssignTarget,
    pub value: Node,
    pub span: Span,
}

/// Left-hand side of an assignment.
#[derive(Clone, Debug)]
pub enum AssignTarget {
    Identifier(Name),
    Member(Box<MemberNode>),
    Pattern(PatternNode),
    /// An expression that is not a reference, such as `f() = 1`. It is
    /// evaluated for its effects, then assignment fails.
    Invalid(Node),
}

/// Destructuring pattern on the left of `=`.
#[derive(Clone, Debug)]
pub enum PatternNode {
    /// `[a, , b]`; `None` skips an element.
    Array(Vec<Option<AssignTarget>>),
    /// `{ key: target }`
    Object(Vec<(JsStr, AssignTarget)>),
}
