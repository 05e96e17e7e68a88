use super::*;
use ecma_value::{EvalError, HostObject};
use pretty_assertions::assert_eq;
use std::any::Any;

#[derive(Debug)]
struct Vec2(f64, f64);

impl HostObject for Vec2 {
    fn type_name(&self) -> &'static str {
        "Vec2"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct Scale(f64);

impl HostObject for Scale {
    fn type_name(&self) -> &'static str {
        "Scale"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn vec_x(v: &Value) -> f64 {
    v.host_ref::<Vec2>().map_or(f64::NAN, |v| v.0)
}

fn catalog() -> HostCatalog {
    HostCatalog::builder()
        .register::<Vec2, _>(
            OverloadSymbol::Addition,
            [ParamType::host::<Vec2>(), ParamType::host::<Vec2>()],
            |a, b| {
                let (a, b) = (a.host_ref::<Vec2>(), b.host_ref::<Vec2>());
                match (a, b) {
                    (Some(a), Some(b)) => Ok(Value::host(Vec2(a.0 + b.0, a.1 + b.1))),
                    _ => Err(EvalError::type_error("expected Vec2")),
                }
            },
        )
        .register::<Vec2, _>(
            OverloadSymbol::Multiply,
            [ParamType::host::<Vec2>(), ParamType::Any],
            |_, _| Ok(Value::from("any")),
        )
        .register::<Vec2, _>(
            OverloadSymbol::Multiply,
            [ParamType::host::<Vec2>(), ParamType::Number],
            |a, b| Ok(Value::from_f64(vec_x(a) * b.as_f64().unwrap_or(f64::NAN))),
        )
        .register::<Scale, _>(
            OverloadSymbol::Multiply,
            [ParamType::host::<Scale>(), ParamType::host::<Vec2>()],
            |_, _| Ok(Value::from("scale")),
        )
        .register::<Vec2, _>(
            OverloadSymbol::Subtraction,
            [ParamType::host::<Vec2>(), ParamType::String],
            |_, b| Ok(b.clone()),
        )
        .build()
}

#[test]
fn symbols_follow_operator_table() {
    assert_eq!(
        OverloadSymbol::for_binary(BinaryOp::Add).map(OverloadSymbol::method_name),
        Some("op_Addition")
    );
    assert_eq!(
        OverloadSymbol::for_binary(BinaryOp::GtEq),
        Some(OverloadSymbol::GreaterThanOrEqual)
    );
    for op in [BinaryOp::StrictEq, BinaryOp::StrictNotEq, BinaryOp::InstanceOf, BinaryOp::In] {
        assert_eq!(OverloadSymbol::for_binary(op), None);
    }
}

#[test]
fn resolves_once_per_key() {
    let resolver = OverloadResolver::new(catalog());
    let (a, b) = (Value::host(Vec2(1.0, 2.0)), Value::host(Vec2(3.0, 4.0)));

    for _ in 0..2 {
        let sum = resolver.try_dispatch(OverloadSymbol::Addition, &a, &b);
        let sum = sum.and_then(Result::ok);
        assert_eq!(sum.as_ref().map(vec_x), Some(4.0));
    }
    assert_eq!(resolver.resolution_count(), 1);
    assert_eq!(resolver.dispatch_count(), 2);
    assert_eq!(resolver.cache_len(), 1);
}

#[test]
fn absence_is_cached_too() {
    let resolver = OverloadResolver::new(catalog());
    let (a, b) = (Value::host(Vec2(1.0, 2.0)), Value::host(Vec2(3.0, 4.0)));
    assert!(resolver.try_dispatch(OverloadSymbol::Division, &a, &b).is_none());
    assert!(resolver.try_dispatch(OverloadSymbol::Division, &a, &b).is_none());
    assert_eq!(resolver.resolution_count(), 1);
    assert_eq!(resolver.dispatch_count(), 0);
}

#[test]
fn swapped_operand_types_get_their_own_entry() {
    let resolver = OverloadResolver::new(catalog());
    let (v, s) = (Value::host(Vec2(1.0, 0.0)), Value::host(Scale(2.0)));

    let left = resolver.lookup(OverloadSymbol::Multiply, &s, &v);
    assert_eq!(left.map(|m| m.declaring_type().name()), Some("Scale"));
    let right = resolver.lookup(OverloadSymbol::Multiply, &v, &s);
    assert_eq!(right.map(|m| m.params()[1]), Some(ParamType::Any));
    assert_eq!(resolver.cache_len(), 2);
}

#[test]
fn exact_match_beats_any() {
    let resolver = OverloadResolver::new(catalog());
    let v = Value::host(Vec2(5.0, 0.0));
    let product = resolver
        .try_dispatch(OverloadSymbol::Multiply, &v, &Value::Int(3))
        .and_then(Result::ok);
    assert_eq!(product, Some(Value::Int(15)));
}

#[test]
fn arguments_are_converted_to_parameter_types() {
    let resolver = OverloadResolver::new(catalog());
    let v = Value::host(Vec2(0.0, 0.0));
    let out = resolver
        .try_dispatch(OverloadSymbol::Subtraction, &v, &Value::Int(12))
        .and_then(Result::ok);
    assert_eq!(out, Some(Value::from("12")));
}

#[test]
fn primitives_alone_never_resolve() {
    let resolver = OverloadResolver::new(catalog());
    assert!(resolver
        .lookup(OverloadSymbol::Addition, &Value::Int(1), &Value::Int(2))
        .is_none());
    assert!(resolver
        .lookup(OverloadSymbol::Addition, &Value::host(Vec2(0.0, 0.0)), &Value::Undefined)
        .is_none());
    assert_eq!(resolver.cache_len(), 0);
}

#[test]
fn callback_errors_propagate() {
    let catalog = HostCatalog::builder()
        .register::<Scale, _>(
            OverloadSymbol::Addition,
            [ParamType::Any, ParamType::Any],
            |_, _| Err(EvalError::range_error("overflow")),
        )
        .build();
    let resolver = OverloadResolver::new(catalog);
    let s = Value::host(Scale(1.0));
    let err = resolver
        .try_dispatch(OverloadSymbol::Addition, &s, &s)
        .and_then(Result::err);
    assert_eq!(err.map(|e| e.message()), Some("overflow".to_string()));
}

#[test]
fn concurrent_lookups_share_one_entry() {
    let resolver = OverloadResolver::shared(catalog());
    std::thread::scope(|scope| {
        for _ in 0..8 {
            let resolver = Arc::clone(&resolver);
            scope.spawn(move || {
                let (a, b) = (Value::host(Vec2(1.0, 1.0)), Value::host(Vec2(2.0, 2.0)));
                for _ in 0..100 {
                    let sum = resolver
                        .try_dispatch(OverloadSymbol::Addition, &a, &b)
                        .and_then(Result::ok);
                    assert_eq!(sum.as_ref().map(vec_x), Some(3.0));
                }
            });
        }
    });
    assert_eq!(resolver.cache_len(), 1);
    assert!(resolver.resolution_count() >= 1);
    assert_eq!(resolver.dispatch_count(), 800);
}
