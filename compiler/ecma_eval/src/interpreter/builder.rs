//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::sync::Arc;

use ecma_ir::StringInterner;
use ecma_value::Value;

use super::{EvalStats, Interpreter, ReservedNames};
use crate::destructure::{DestructuringAssigner, ElementwiseDestructuring};
use crate::environment::{Environment, Mutability};
use crate::overload::OverloadResolver;
use crate::reference::ReferencePool;

/// Builder for creating Interpreter instances.
///
/// Defaults to sloppy mode, a fresh environment, no host overloads, and
/// element-wise destructuring.
pub struct InterpreterBuilder<'a> {
    interner: &'a StringInterner,
    env: Option<Environment>,
    strict: bool,
    interop: Option<Arc<OverloadResolver>>,
    destructuring: Option<Arc<dyn DestructuringAssigner>>,
}

impl<'a> InterpreterBuilder<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Self {
            interner,
            env: None,
            strict: false,
            interop: None,
            destructuring: None,
        }
    }

    /// Evaluate in strict mode.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Enable host operator overloads through `resolver`.
    ///
    /// Interpreters on different threads may share one resolver.
    #[must_use]
    pub fn interop(mut self, resolver: Arc<OverloadResolver>) -> Self {
        self.interop = Some(resolver);
        self
    }

    /// Set the initial environment.
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Replace the destructuring collaborator.
    #[must_use]
    pub fn destructuring(mut self, assigner: Arc<dyn DestructuringAssigner>) -> Self {
        self.destructuring = Some(assigner);
        self
    }

    pub fn build(self) -> Interpreter<'a> {
        let mut env = self.env.unwrap_or_default();
        let undefined = self.interner.intern("undefined");
        if !env.global().borrow().declares(undefined) {
            env.define_global(undefined, Value::Undefined, Mutability::ReadOnly);
        }

        Interpreter {
            interner: self.interner,
            env,
            strict: self.strict,
            interop: self.interop,
            references: ReferencePool::new(),
            destructuring: self
                .destructuring
                .unwrap_or_else(|| Arc::new(ElementwiseDestructuring)),
            reserved: ReservedNames::new(self.interner),
            stats: EvalStats::default(),
        }
    }
}
