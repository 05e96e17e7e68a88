//! Tree-walking evaluation of operator and assignment nodes.
//!
//! [`Interpreter::evaluate`] walks a lowered [`Node`] depth-first, left
//! operand before right. Binary nodes call the evaluator chosen at build
//! time; assignment nodes go through [`Interpreter::evaluate_assignment`].
//!
//! An interpreter is single-threaded. Independent interpreters may run on
//! other threads and share one [`OverloadResolver`].

mod assign;
mod builder;
mod reference_guard;

use std::sync::Arc;

use ecma_ir::{ExprArena, ExprId, Name, StringInterner};
use ecma_stack::ensure_sufficient_stack;
use ecma_value::{unresolvable_reference, EvalError, EvalResult, ObjectRef, Value};

pub use builder::InterpreterBuilder;
pub use reference_guard::ReferenceScope;

use crate::destructure::DestructuringAssigner;
use crate::environment::Environment;
use crate::lower::{lower, BuildError};
use crate::node::{BinaryNode, Node};
use crate::overload::OverloadResolver;
use crate::reference::ReferencePool;

/// Counters for observing what evaluation did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Binary nodes evaluated at run time. Folded constants never count.
    pub binary_evaluations: u64,
    /// Compound assignments (`+=`, `<<=`, ...) that applied their operator.
    pub compound_assignments: u64,
    /// References taken from the pool.
    pub references_acquired: u64,
}

/// Failure of [`Interpreter::run`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Names checked on every identifier assignment, interned once.
#[derive(Copy, Clone)]
struct ReservedNames {
    eval: Name,
    arguments: Name,
}

impl ReservedNames {
    fn new(interner: &StringInterner) -> Self {
        ReservedNames {
            eval: interner.intern("eval"),
            arguments: interner.intern("arguments"),
        }
    }

    #[inline]
    fn contains(self, name: Name) -> bool {
        name == self.eval || name == self.arguments
    }
}

/// Evaluates operator and assignment trees.
pub struct Interpreter<'a> {
    interner: &'a StringInterner,
    pub env: Environment,
    strict: bool,
    interop: Option<Arc<OverloadResolver>>,
    references: ReferencePool,
    destructuring: Arc<dyn DestructuringAssigner>,
    reserved: ReservedNames,
    stats: EvalStats,
}

impl<'a> Interpreter<'a> {
    /// Sloppy-mode interpreter with no host interop.
    pub fn new(interner: &'a StringInterner) -> Self {
        InterpreterBuilder::new(interner).build()
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn interop(&self) -> Option<&OverloadResolver> {
        self.interop.as_deref()
    }

    pub fn stats(&self) -> EvalStats {
        self.stats
    }

    /// References currently taken from the pool. Zero between evaluations.
    pub fn references_in_use(&self) -> usize {
        self.references.in_use()
    }

    /// Lower `root` and evaluate it.
    #[tracing::instrument(level = "debug", skip_all, fields(root = ?root))]
    pub fn run(&mut self, arena: &ExprArena, root: ExprId) -> Result<Value, RunError> {
        let node = lower(arena, self.interner, root)?;
        Ok(self.evaluate(&node)?)
    }

    /// Evaluate a node to a value.
    pub fn evaluate(&mut self, node: &Node) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(node))
    }

    fn eval_inner(&mut self, node: &Node) -> EvalResult {
        match node {
            Node::Constant(value) => Ok(value.clone()),
            Node::Identifier { name, span } => self.env.lookup(*name).ok_or_else(|| {
                unresolvable_reference(self.interner.lookup(*name)).with_span(*span)
            }),
            Node::Member(member) => self.eval_member(member),
            Node::Call(call) => self.eval_call(call),
            Node::Function { name, kind } => Ok(Value::Object(ObjectRef::function_literal(
                name.as_deref(),
                *kind,
            ))),
            Node::Array(elements) => {
                let values = elements
                    .iter()
                    .map(|e| self.evaluate(e))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Object(ObjectRef::array(values)))
            }
            Node::Object(entries) => {
                let obj = ObjectRef::ordinary();
                for (key, value) in entries {
                    let value = self.evaluate(value)?;
                    obj.set(key, value);
                }
                Ok(Value::Object(obj))
            }
            Node::Binary(binary) => self.eval_binary(binary),
            Node::Assign(assign) => self.evaluate_assignment(assign),
        }
    }

    fn eval_binary(&mut self, node: &BinaryNode) -> EvalResult {
        let left = self.evaluate(&node.left)?;
        let right = self.evaluate(&node.right)?;
        self.stats.binary_evaluations += 1;
        (node.evaluator())(self.interop.as_deref(), &left, &right)
            .map_err(|err| err.with_span(node.span))
    }
}
