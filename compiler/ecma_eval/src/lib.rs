#![allow(
    clippy::result_large_err,
    reason = "EvalError carries a thrown Value; boxing would add indirection on every `?`"
)]
//! Ecma Eval - binary operator and assignment evaluation.
//!
//! # Architecture
//!
//! - [`coerce`]: the abstract conversion and comparison operations
//! - [`overload`]: host operator overloads and the shared resolution cache
//! - [`operators`]: one evaluator per operator tag, with integer fast paths
//! - [`lower`]: builds evaluator nodes from parser output, folding constants
//! - [`Interpreter`]: walks nodes, evaluating operators and assignments
//!
//! Values and errors come from `ecma_value`; names, spans and operator tags
//! from `ecma_ir`.

pub mod coerce;
mod const_fold;
pub mod destructure;
mod environment;
mod exec;
pub mod interpreter;
pub mod lower;
pub mod node;
pub mod operators;
pub mod overload;
pub mod reference;

use std::sync::Once;

pub use ecma_value::{EvalError, EvalErrorKind, EvalResult, Value};

pub use destructure::{DestructuringAssigner, ElementwiseDestructuring};
pub use environment::{AssignError, Environment, LocalScope, Mutability, Scope};
pub use exec::{get_property, put_property};
pub use interpreter::{EvalStats, Interpreter, InterpreterBuilder, ReferenceScope, RunError};
pub use lower::{lower, BuildError, Lowerer};
pub use node::Node;
pub use operators::{evaluate_binary, evaluator_for, BinaryFn};
pub use overload::{
    HostCatalog, HostCatalogBuilder, OverloadMethod, OverloadResolver, OverloadSymbol, ParamType,
};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
mod tests;
