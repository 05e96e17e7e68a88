//! Runtime errors raised while evaluating operators and assignments.
//!
//! `EvalErrorKind` follows the language's error categories so embedders can
//! surface them as the matching script-visible error objects. Factory
//! functions below are the public way to build each error; they keep the
//! message wording in one place.

use std::fmt;
use std::sync::Arc;

use ecma_ir::Span;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Error category.
#[derive(Clone, Debug, PartialEq)]
pub enum EvalErrorKind {
    TypeError(String),
    ReferenceError(String),
    SyntaxError(String),
    RangeError(String),
    /// A value thrown by script code, propagated unchanged.
    Thrown(Value),
    /// A failure raised by a native callback. Never rewrapped.
    Host(HostError),
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeError(msg) => write!(f, "TypeError: {msg}"),
            Self::ReferenceError(msg) => write!(f, "ReferenceError: {msg}"),
            Self::SyntaxError(msg) => write!(f, "SyntaxError: {msg}"),
            Self::RangeError(msg) => write!(f, "RangeError: {msg}"),
            Self::Thrown(value) => write!(f, "Uncaught {value}"),
            Self::Host(err) => write!(f, "{err}"),
        }
    }
}

/// Failure raised by a host callback.
///
/// Cloning shares the underlying error, so the original failure reaches the
/// embedder exactly as the callback produced it.
#[derive(Clone)]
pub struct HostError(Arc<dyn std::error::Error + Send + Sync>);

impl HostError {
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        HostError(Arc::new(err))
    }

    /// The callback's original error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.0
    }

    /// Downcast to the callback's concrete error type.
    pub fn downcast_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}

impl PartialEq for HostError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostError").field(&self.0).finish()
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&*self.0)
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Source location of the operator or assignment that raised it.
    pub span: Option<Span>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    #[cold]
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::TypeError(message.into()))
    }

    #[cold]
    pub fn reference_error(message: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::ReferenceError(message.into()))
    }

    #[cold]
    pub fn syntax_error(message: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::SyntaxError(message.into()))
    }

    #[cold]
    pub fn range_error(message: impl Into<String>) -> Self {
        Self::new(EvalErrorKind::RangeError(message.into()))
    }

    /// A script-level `throw` of `value`.
    #[cold]
    pub fn thrown(value: Value) -> Self {
        Self::new(EvalErrorKind::Thrown(value))
    }

    /// Wrap a native callback failure.
    #[cold]
    pub fn host(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::new(EvalErrorKind::Host(HostError::new(err)))
    }

    /// Attach a span unless one is already recorded.
    ///
    /// The innermost operator keeps its location as the error unwinds
    /// through enclosing expressions.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_dummy() {
            self.span = Some(span);
        }
        self
    }

    pub fn is_type_error(&self) -> bool {
        matches!(self.kind, EvalErrorKind::TypeError(_))
    }

    pub fn is_reference_error(&self) -> bool {
        matches!(self.kind, EvalErrorKind::ReferenceError(_))
    }

    pub fn is_syntax_error(&self) -> bool {
        matches!(self.kind, EvalErrorKind::SyntaxError(_))
    }

    /// The error's message without its category prefix.
    pub fn message(&self) -> String {
        match &self.kind {
            EvalErrorKind::TypeError(msg)
            | EvalErrorKind::ReferenceError(msg)
            | EvalErrorKind::SyntaxError(msg)
            | EvalErrorKind::RangeError(msg) => msg.clone(),
            EvalErrorKind::Thrown(value) => value.to_string(),
            EvalErrorKind::Host(err) => err.to_string(),
        }
    }
}

// Conversion

#[cold]
pub fn cannot_convert_to_primitive() -> EvalError {
    EvalError::type_error("Cannot convert object to primitive value")
}

#[cold]
pub fn invalid_string_length() -> EvalError {
    EvalError::range_error("Invalid string length")
}

// instanceof / in

#[cold]
pub fn instanceof_requires_object(right: &Value) -> EvalError {
    EvalError::type_error(format!(
        "Right-hand side of 'instanceof' is not an object: {right}"
    ))
}

#[cold]
pub fn instanceof_not_callable(right: &Value) -> EvalError {
    EvalError::type_error(format!(
        "Right-hand side of 'instanceof' is not callable: {right}"
    ))
}

#[cold]
pub fn instanceof_non_object_prototype(prototype: &Value) -> EvalError {
    EvalError::type_error(format!(
        "Function has non-object prototype '{prototype}' in instanceof check"
    ))
}

#[cold]
pub fn in_requires_object(key: &Value, right: &Value) -> EvalError {
    EvalError::type_error(format!(
        "Cannot use 'in' operator to search for {key} in {right}"
    ))
}

// Assignment

#[cold]
pub fn invalid_assignment_target() -> EvalError {
    EvalError::reference_error("Invalid left-hand side in assignment")
}

#[cold]
pub fn reserved_assignment_target(name: &str) -> EvalError {
    EvalError::syntax_error(format!("Unexpected eval or arguments in strict mode: {name}"))
}

#[cold]
pub fn unresolvable_reference(name: &str) -> EvalError {
    EvalError::reference_error(format!("{name} is not defined"))
}

#[cold]
pub fn assignment_to_constant(name: &str) -> EvalError {
    EvalError::type_error(format!("Assignment to constant variable '{name}'"))
}

#[cold]
pub fn read_only_binding(name: &str) -> EvalError {
    EvalError::type_error(format!("Cannot assign to read only variable '{name}'"))
}

#[cold]
pub fn read_only_property(key: &str, base: &Value) -> EvalError {
    EvalError::type_error(format!(
        "Cannot assign to read only property '{key}' of {base}"
    ))
}

#[cold]
pub fn cannot_create_property(key: &str, base: &Value) -> EvalError {
    EvalError::type_error(format!("Cannot create property '{key}' on {base}"))
}

#[cold]
pub fn property_of_nullish(key: &str, base: &Value) -> EvalError {
    EvalError::type_error(format!("Cannot read properties of {base} (reading '{key}')"))
}

#[cold]
pub fn not_iterable(value: &Value) -> EvalError {
    EvalError::type_error(format!("{value} is not iterable"))
}

// Calls

#[cold]
pub fn not_a_function(callee: &Value) -> EvalError {
    EvalError::type_error(format!("{callee} is not a function"))
}

#[cold]
pub fn class_call_without_new(name: &str) -> EvalError {
    EvalError::type_error(format!(
        "Class constructor {name} cannot be invoked without 'new'"
    ))
}
