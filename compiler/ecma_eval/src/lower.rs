//! Lowering from parser output to evaluator nodes.
//!
//! Each binary node gets its evaluator here, once. Literal operands are
//! converted to values and foldable operators over two constants are
//! evaluated on the spot.

use ecma_ir::{
    AssignOp, BinaryOp, ExprArena, ExprId, ExprKind, Literal, MemberProperty, Name, Span,
    StringInterner, UnknownOperator,
};
use ecma_stack::ensure_sufficient_stack;
use ecma_value::{JsStr, Value};

use crate::const_fold::try_fold;
use crate::node::{
    AssignNode, AssignTarget, BinaryNode, CallNode, MemberNode, Node, PatternNode, PropertyKey,
};

/// A defect in the tree handed to the builder.
///
/// These never occur at run time; a parser producing them is broken.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("expression {0:?} is not in the arena")]
    InvalidExprId(ExprId),
    #[error("destructuring pattern at {0} is only valid as the target of `=`")]
    MisplacedPattern(Span),
    #[error(transparent)]
    UnknownOperator(#[from] UnknownOperator),
}

/// Build a binary node, folding it when both operands are constant.
pub fn binary(op: BinaryOp, left: Node, right: Node, span: Span) -> Node {
    match try_fold(op, &left, &right) {
        Some(value) => Node::Constant(value),
        None => Node::Binary(Box::new(BinaryNode::new(op, left, right, span))),
    }
}

/// Build a binary node from a raw operator token.
pub fn binary_from_token(
    token: &str,
    left: Node,
    right: Node,
    span: Span,
) -> Result<Node, BuildError> {
    let op: BinaryOp = token.parse()?;
    Ok(binary(op, left, right, span))
}

/// Lower the tree rooted at `root`.
pub fn lower(arena: &ExprArena, interner: &StringInterner, root: ExprId) -> Result<Node, BuildError> {
    Lowerer::new(arena, interner).lower(root)
}

/// Lowering pass over one arena.
pub struct Lowerer<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    folded: usize,
}

impl<'a> Lowerer<'a> {
    pub fn new(arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        Lowerer {
            arena,
            interner,
            folded: 0,
        }
    }

    /// Number of binary nodes replaced by constants so far.
    pub fn folded_count(&self) -> usize {
        self.folded
    }

    pub fn lower(&mut self, id: ExprId) -> Result<Node, BuildError> {
        ensure_sufficient_stack(|| self.lower_inner(id))
    }

    fn text(&self, name: Name) -> JsStr {
        JsStr::from(self.interner.lookup(name))
    }

    fn literal(&self, literal: Literal) -> Value {
        match literal {
            Literal::Undefined => Value::Undefined,
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(b),
            Literal::Number(n) => Value::from_f64(n),
            Literal::Str(name) => Value::Str(self.text(name)),
        }
    }

    fn lower_inner(&mut self, id: ExprId) -> Result<Node, BuildError> {
        let expr = self.arena.get(id).ok_or(BuildError::InvalidExprId(id))?;
        let span = expr.span;
        match &expr.kind {
            ExprKind::Literal(literal) => Ok(Node::Constant(self.literal(*literal))),
            ExprKind::Identifier(name) => Ok(Node::Identifier { name: *name, span }),
            ExprKind::Member { object, property } => Ok(Node::Member(Box::new(
                self.member(*object, *property, span)?,
            ))),
            ExprKind::Call { callee, args } => {
                let callee = self.lower(*callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.lower(*arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Node::Call(Box::new(CallNode { callee, args, span })))
            }
            ExprKind::Function { name, kind } => Ok(Node::Function {
                name: name.map(|n| self.text(n)),
                kind: *kind,
            }),
            ExprKind::Array(elements) => Ok(Node::Array(
                elements
                    .iter()
                    .map(|e| self.lower(*e))
                    .collect::<Result<_, _>>()?,
            )),
            ExprKind::Object(entries) => Ok(Node::Object(
                entries
                    .iter()
                    .map(|(key, value)| Ok((self.text(*key), self.lower(*value)?)))
                    .collect::<Result<_, BuildError>>()?,
            )),
            ExprKind::Binary { op, left, right } => {
                let left = self.lower(*left)?;
                let right = self.lower(*right)?;
                let node = binary(*op, left, right, span);
                if node.is_constant() {
                    self.folded += 1;
                }
                Ok(node)
            }
            ExprKind::Assign { op, target, value } => {
                let target = self.target(*target, *op == AssignOp::Assign)?;
                let value = self.lower(*value)?;
                Ok(Node::Assign(Box::new(AssignNode {
                    op: *op,
                    target,
                    value,
                    span,
                })))
            }
            ExprKind::ArrayPattern(_) | ExprKind::ObjectPattern(_) => {
                Err(BuildError::MisplacedPattern(span))
            }
        }
    }

    fn member(
        &mut self,
        object: ExprId,
        property: MemberProperty,
        span: Span,
    ) -> Result<MemberNode, BuildError> {
        let object = self.lower(object)?;
        let property = match property {
            MemberProperty::Static(name) => PropertyKey::Static(self.text(name)),
            MemberProperty::Computed(expr) => PropertyKey::Computed(self.lower(expr)?),
        };
        Ok(MemberNode {
            object,
            property,
            span,
        })
    }

    fn target(&mut self, id: ExprId, allow_pattern: bool) -> Result<AssignTarget, BuildError> {
        let expr = self.arena.get(id).ok_or(BuildError::InvalidExprId(id))?;
        let span = expr.span;
        match &expr.kind {
            ExprKind::Identifier(name) => Ok(AssignTarget::Identifier(*name)),
            ExprKind::Member { object, property } => Ok(AssignTarget::Member(Box::new(
                self.member(*object, *property, span)?,
            ))),
            ExprKind::ArrayPattern(elements) if allow_pattern => {
                let targets = elements
                    .iter()
                    .map(|e| e.map(|e| self.target(e, true)).transpose())
                    .collect::<Result<_, _>>()?;
                Ok(AssignTarget::Pattern(PatternNode::Array(targets)))
            }
            ExprKind::ObjectPattern(entries) if allow_pattern => {
                let targets = entries
                    .iter()
                    .map(|(key, e)| Ok((self.text(*key), self.target(*e, true)?)))
                    .collect::<Result<_, BuildError>>()?;
                Ok(AssignTarget::Pattern(PatternNode::Object(targets)))
            }
            ExprKind::ArrayPattern(_) | ExprKind::ObjectPattern(_) => {
                Err(BuildError::MisplacedPattern(span))
            }
            _ => Ok(AssignTarget::Invalid(self.lower(id)?)),
        }
    }
}

#[cfg(test)]
mod tests;
