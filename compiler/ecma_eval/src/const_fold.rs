//! Constant folding of binary operators.
//!
//! Runs inside lowering, after both operands of a binary node are lowered.
//! If both are constants and the operator's result depends on nothing but
//! their values, it is evaluated once and the node becomes a constant.

use ecma_ir::BinaryOp;
use ecma_value::Value;

use crate::node::Node;
use crate::operators::evaluator_for;

/// Whether a lowered node is known at build time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Constness {
    Const,
    Runtime,
}

fn classify(node: &Node) -> Constness {
    match node {
        // Objects may run user code during coercion.
        Node::Constant(value) if !value.is_object() => Constness::Const,
        _ => Constness::Runtime,
    }
}

/// Fold `left op right` if both sides are constant.
///
/// `instanceof` and `in` are never folded. An evaluation that raises is not
/// folded either; the error surfaces when the node runs.
pub fn try_fold(op: BinaryOp, left: &Node, right: &Node) -> Option<Value> {
    if !op.is_foldable()
        || classify(left) == Constness::Runtime
        || classify(right) == Constness::Runtime
    {
        return None;
    }
    let (l, r) = (left.as_constant()?, right.as_constant()?);
    match evaluator_for(op)(None, l, r) {
        Ok(value) => {
            tracing::trace!(%op, left = %l, right = %r, result = %value, "folded constant");
            Some(value)
        }
        Err(err) => {
            tracing::trace!(%op, error = %err, "constant operands raised; left for run time");
            None
        }
    }
}
