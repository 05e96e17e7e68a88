#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Tests for operators on host-wrapped operands.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use ecma_ir::BinaryOp;
use ecma_value::{
    EvalError, EvalErrorKind, HostObject, HostTypeId, JsStr, ObjectRef, PreferredType, Value,
};
use pretty_assertions::assert_eq;

use crate::operators::evaluate_binary;
use crate::overload::{HostCatalog, OverloadResolver, OverloadSymbol, ParamType};

#[derive(Debug)]
struct Money(i64);

impl HostObject for Money {
    fn type_name(&self) -> &'static str {
        "Money"
    }

    fn host_equals(&self, other: &dyn HostObject) -> bool {
        other
            .as_any()
            .downcast_ref::<Money>()
            .is_some_and(|m| m.0 == self.0)
    }

    fn to_primitive(&self, _hint: PreferredType) -> Result<Value, EvalError> {
        Ok(Value::from_i64(self.0))
    }

    fn get_property(&self, key: &JsStr) -> Option<Value> {
        (key.as_str() == "cents").then(|| Value::from_i64(self.0))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Opaque;

impl HostObject for Opaque {
    fn type_name(&self) -> &'static str {
        "Opaque"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Overdrawn;

impl fmt::Display for Overdrawn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("overdrawn")
    }
}

impl std::error::Error for Overdrawn {}

fn cents(v: &Value) -> i64 {
    v.host_ref::<Money>().map_or(0, |m| m.0)
}

fn resolver() -> Arc<OverloadResolver> {
    let catalog = HostCatalog::builder()
        .register::<Money, _>(
            OverloadSymbol::Addition,
            [ParamType::host::<Money>(), ParamType::host::<Money>()],
            |a, b| Ok(Value::host(Money(cents(a) + cents(b)))),
        )
        .register::<Money, _>(
            OverloadSymbol::Subtraction,
            [ParamType::host::<Money>(), ParamType::host::<Money>()],
            |a, b| {
                let diff = cents(a) - cents(b);
                if diff < 0 {
                    return Err(EvalError::host(Overdrawn));
                }
                Ok(Value::host(Money(diff)))
            },
        )
        .register::<Money, _>(
            OverloadSymbol::LessThan,
            [ParamType::host::<Money>(), ParamType::Number],
            |a, b| Ok(Value::Bool((cents(a) as f64) < b.as_f64().unwrap_or(f64::NAN))),
        )
        .build();
    OverloadResolver::shared(catalog)
}

#[test]
fn overload_replaces_builtin_addition() {
    let resolver = resolver();
    let sum = evaluate_binary(
        Some(&*resolver),
        BinaryOp::Add,
        &Value::host(Money(150)),
        &Value::host(Money(250)),
    )
    .unwrap();
    assert_eq!(cents(&sum), 400);
    assert_eq!(resolver.dispatch_count(), 1);
}

#[test]
fn without_interop_host_values_coerce() {
    let sum = evaluate_binary(
        None,
        BinaryOp::Add,
        &Value::host(Money(150)),
        &Value::host(Money(250)),
    )
    .unwrap();
    assert_eq!(sum, Value::int(400));
}

#[test]
fn missing_overload_falls_back_to_coercion() {
    let resolver = resolver();
    let product = evaluate_binary(
        Some(&*resolver),
        BinaryOp::Mul,
        &Value::host(Money(3)),
        &Value::int(4),
    )
    .unwrap();
    assert_eq!(product, Value::int(12));
    assert_eq!(resolver.dispatch_count(), 0);
    assert_eq!(resolver.resolution_count(), 1);
}

#[test]
fn overload_with_primitive_operand() {
    let resolver = resolver();
    let less = evaluate_binary(
        Some(&*resolver),
        BinaryOp::Lt,
        &Value::host(Money(3)),
        &Value::int(4),
    )
    .unwrap();
    assert_eq!(less, Value::Bool(true));
    assert_eq!(resolver.dispatch_count(), 1);
}

#[test]
fn host_error_propagates_unmodified() {
    let resolver = resolver();
    let err = evaluate_binary(
        Some(&*resolver),
        BinaryOp::Sub,
        &Value::host(Money(1)),
        &Value::host(Money(2)),
    )
    .unwrap_err();
    let EvalErrorKind::Host(host) = &err.kind else {
        panic!("expected a host error, got {err:?}");
    };
    assert!(host.downcast_ref::<Overdrawn>().is_some());
    assert_eq!(err.to_string(), "overdrawn");
}

#[test]
fn strict_equality_is_never_overloaded() {
    let resolver = resolver();
    let same = evaluate_binary(
        Some(&*resolver),
        BinaryOp::StrictEq,
        &Value::host(Money(5)),
        &Value::host(Money(5)),
    )
    .unwrap();
    assert_eq!(same, Value::Bool(true));
    assert_eq!(resolver.cache_len(), 0);
}

#[test]
fn unconvertible_host_value_is_type_error() {
    let err = evaluate_binary(None, BinaryOp::Add, &Value::host(Opaque), &Value::int(1))
        .unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn host_instanceof_checks_host_type() {
    let money_type = Value::Object(ObjectRef::host_type(HostTypeId::of::<Money>()));
    let yes = evaluate_binary(None, BinaryOp::InstanceOf, &Value::host(Money(1)), &money_type)
        .unwrap();
    let no = evaluate_binary(None, BinaryOp::InstanceOf, &Value::host(Opaque), &money_type)
        .unwrap();
    assert_eq!(yes, Value::Bool(true));
    assert_eq!(no, Value::Bool(false));
}

#[test]
fn in_reads_host_properties() {
    let money = Value::host(Money(1));
    assert_eq!(
        evaluate_binary(None, BinaryOp::In, &Value::string("cents"), &money).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(None, BinaryOp::In, &Value::string("euros"), &money).unwrap(),
        Value::Bool(false)
    );
}
