#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Tests for the per-operator evaluators without host interop.

use ecma_ir::{BinaryOp, FunctionKind};
use ecma_value::{ObjectRef, Value};
use pretty_assertions::assert_eq;

use crate::operators::evaluate_binary;

fn eval(op: BinaryOp, left: &Value, right: &Value) -> Value {
    evaluate_binary(None, op, left, right).unwrap()
}

fn num(n: f64) -> Value {
    Value::number(n)
}

fn is_neg_zero(value: &Value) -> bool {
    matches!(value, Value::Number(n) if *n == 0.0 && n.is_sign_negative())
}

// Arithmetic

#[test]
fn int_addition_stays_int() {
    let sum = eval(BinaryOp::Add, &Value::int(2), &Value::int(40));
    assert!(sum.is_int());
    assert_eq!(sum, Value::int(42));
}

#[test]
fn int_addition_widens_on_overflow() {
    let sum = eval(BinaryOp::Add, &Value::int(i32::MAX), &Value::int(1));
    assert!(matches!(sum, Value::Number(_)));
    assert_eq!(sum, num(2_147_483_648.0));
}

#[test]
fn integral_floats_take_the_general_path() {
    let sum = eval(BinaryOp::Add, &num(2.0), &num(3.0));
    assert_eq!(sum, Value::int(5));
}

#[test]
fn addition_concatenates_when_either_side_is_a_string() {
    assert_eq!(
        eval(BinaryOp::Add, &Value::int(1), &Value::string("2")),
        Value::string("12")
    );
    assert_eq!(
        eval(BinaryOp::Add, &Value::string("2"), &Value::int(1)),
        Value::string("21")
    );
    assert_eq!(
        eval(BinaryOp::Add, &Value::string("a"), &Value::Null),
        Value::string("anull")
    );
}

#[test]
fn empty_arrays_add_to_empty_string() {
    let a = Value::Object(ObjectRef::array(vec![]));
    let b = Value::Object(ObjectRef::array(vec![]));
    assert_eq!(eval(BinaryOp::Add, &a, &b), Value::string(""));
}

#[test]
fn array_addition_joins_elements() {
    let a = Value::Object(ObjectRef::array(vec![Value::int(1), Value::int(2)]));
    assert_eq!(
        eval(BinaryOp::Add, &a, &Value::int(3)),
        Value::string("1,23")
    );
}

#[test]
fn sparse_array_joins_holes_as_empty() {
    let array = ObjectRef::array(vec![Value::int(1)]);
    array.set("2000", Value::int(2));
    let joined = eval(BinaryOp::Add, &Value::Object(array), &Value::string(""));
    let Value::Str(text) = joined else {
        panic!("expected a string, got {joined:?}");
    };
    assert_eq!(text.len(), 2002);
    assert!(text.starts_with("1,,"));
    assert!(text.ends_with(",2"));
}

#[test]
fn oversized_array_join_is_range_error() {
    let array = ObjectRef::array(vec![]);
    assert!(array.set("length", num(4e9)));
    let err = evaluate_binary(None, BinaryOp::Add, &Value::Object(array), &Value::string(""))
        .unwrap_err();
    assert!(matches!(err.kind, ecma_value::EvalErrorKind::RangeError(_)));
}

#[test]
fn object_addition_uses_value_of() {
    let obj = ObjectRef::ordinary();
    obj.set(
        "valueOf",
        Value::Object(ObjectRef::native_function("valueOf", |_, _| {
            Ok(Value::int(10))
        })),
    );
    assert_eq!(
        eval(BinaryOp::Add, &Value::Object(obj), &Value::int(5)),
        Value::int(15)
    );
}

#[test]
fn non_numeric_addition() {
    assert_eq!(
        eval(BinaryOp::Add, &Value::Bool(true), &Value::Null),
        Value::int(1)
    );
    let nan = eval(BinaryOp::Add, &Value::Undefined, &Value::int(1));
    assert!(nan.as_f64().is_some_and(f64::is_nan));
}

#[test]
fn subtraction_coerces_strings() {
    assert_eq!(
        eval(BinaryOp::Sub, &Value::string("10"), &Value::int(4)),
        Value::int(6)
    );
    assert_eq!(
        eval(BinaryOp::Sub, &Value::int(i32::MIN), &Value::int(1)),
        num(-2_147_483_649.0)
    );
}

#[test]
fn multiplication_widens_before_converting_back() {
    let product = eval(BinaryOp::Mul, &Value::int(65_536), &Value::int(65_536));
    assert_eq!(product, num(4_294_967_296.0));
    assert!(matches!(product, Value::Number(_)));
}

#[test]
fn multiplication_by_zero_keeps_sign() {
    assert!(is_neg_zero(&eval(
        BinaryOp::Mul,
        &Value::int(0),
        &Value::int(-5)
    )));
    assert!(eval(BinaryOp::Mul, &Value::int(0), &Value::int(5)).is_int());
}

#[test]
fn multiplication_and_modulo_with_undefined_yield_undefined() {
    assert_eq!(
        eval(BinaryOp::Mul, &Value::Undefined, &Value::int(3)),
        Value::Undefined
    );
    assert_eq!(
        eval(BinaryOp::Mod, &Value::int(3), &Value::Undefined),
        Value::Undefined
    );
}

#[test]
fn division_by_zero() {
    assert_eq!(
        eval(BinaryOp::Div, &Value::int(1), &Value::int(0)),
        num(f64::INFINITY)
    );
    assert_eq!(
        eval(BinaryOp::Div, &Value::int(-1), &Value::int(0)),
        num(f64::NEG_INFINITY)
    );
    assert_eq!(eval(BinaryOp::Div, &Value::int(7), &Value::int(2)), num(3.5));
    assert!(eval(BinaryOp::Div, &Value::int(6), &Value::int(2)).is_int());
}

#[test]
fn modulo_fast_path_and_fallback() {
    assert_eq!(eval(BinaryOp::Mod, &Value::int(5), &Value::int(3)), Value::int(2));
    assert_eq!(
        eval(BinaryOp::Mod, &Value::int(-5), &Value::int(3)),
        Value::int(-2)
    );
    assert!(is_neg_zero(&eval(
        BinaryOp::Mod,
        &Value::int(-4),
        &Value::int(2)
    )));
    let nan = eval(BinaryOp::Mod, &Value::int(5), &Value::int(0));
    assert!(nan.as_f64().is_some_and(f64::is_nan));
    assert_eq!(eval(BinaryOp::Mod, &num(5.5), &Value::int(2)), num(1.5));
}

#[test]
fn exponentiation() {
    assert_eq!(
        eval(BinaryOp::Exp, &Value::int(2), &Value::int(10)),
        Value::int(1024)
    );
    assert_eq!(eval(BinaryOp::Exp, &num(f64::NAN), &Value::int(0)), Value::int(1));
    for (base, exponent) in [(1.0, f64::INFINITY), (-1.0, f64::NEG_INFINITY), (2.0, f64::NAN)] {
        let result = eval(BinaryOp::Exp, &num(base), &num(exponent));
        assert!(result.as_f64().is_some_and(f64::is_nan), "{base} ** {exponent}");
    }
}

// Bitwise

#[test]
fn shifts_mask_the_count() {
    assert_eq!(eval(BinaryOp::Shl, &Value::int(1), &Value::int(33)), Value::int(2));
    assert_eq!(
        eval(BinaryOp::Shl, &Value::int(1), &Value::int(31)),
        Value::int(i32::MIN)
    );
    assert_eq!(eval(BinaryOp::Shr, &Value::int(-8), &Value::int(1)), Value::int(-4));
}

#[test]
fn unsigned_shift_reinterprets_sign() {
    assert_eq!(
        eval(BinaryOp::UShr, &Value::int(-1), &Value::int(0)),
        num(4_294_967_295.0)
    );
    assert_eq!(
        eval(BinaryOp::UShr, &Value::int(-8), &Value::int(28)),
        Value::int(15)
    );
}

#[test]
fn bitwise_operators_truncate_through_int32() {
    assert_eq!(
        eval(BinaryOp::BitAnd, &num(4_294_967_295.0), &Value::int(255)),
        Value::int(255)
    );
    assert_eq!(
        eval(BinaryOp::BitOr, &num(2.9), &Value::string("4")),
        Value::int(6)
    );
    assert_eq!(
        eval(BinaryOp::BitXor, &Value::int(5), &Value::int(3)),
        Value::int(6)
    );
    assert_eq!(
        eval(BinaryOp::BitOr, &num(f64::NAN), &Value::int(0)),
        Value::int(0)
    );
}

// Relational

#[test]
fn nan_comparisons_are_false() {
    let nan = num(f64::NAN);
    let one = Value::int(1);
    for op in [BinaryOp::Lt, BinaryOp::Gt, BinaryOp::LtEq, BinaryOp::GtEq] {
        assert_eq!(eval(op, &nan, &one), Value::Bool(false), "NaN {op} 1");
        assert_eq!(eval(op, &one, &nan), Value::Bool(false), "1 {op} NaN");
    }
}

#[test]
fn ordered_comparisons() {
    let (one, two) = (Value::int(1), Value::int(2));
    assert_eq!(eval(BinaryOp::Lt, &one, &two), Value::Bool(true));
    assert_eq!(eval(BinaryOp::Gt, &one, &two), Value::Bool(false));
    assert_eq!(eval(BinaryOp::LtEq, &one, &one), Value::Bool(true));
    assert_eq!(eval(BinaryOp::GtEq, &one, &two), Value::Bool(false));
    assert_eq!(eval(BinaryOp::GtEq, &two, &one), Value::Bool(true));
}

#[test]
fn string_comparison_is_lexicographic() {
    assert_eq!(
        eval(BinaryOp::Lt, &Value::string("10"), &Value::string("9")),
        Value::Bool(true)
    );
    assert_eq!(
        eval(BinaryOp::Lt, &Value::string("10"), &Value::int(9)),
        Value::Bool(false)
    );
}

#[test]
fn undefined_compares_false_both_ways() {
    let undef = Value::Undefined;
    let zero = Value::int(0);
    assert_eq!(eval(BinaryOp::LtEq, &undef, &zero), Value::Bool(false));
    assert_eq!(eval(BinaryOp::GtEq, &undef, &zero), Value::Bool(false));
    assert_eq!(eval(BinaryOp::LtEq, &Value::Null, &zero), Value::Bool(true));
}

// Equality

#[test]
fn loose_equality_coerces() {
    assert_eq!(
        eval(BinaryOp::Eq, &Value::string("1"), &Value::int(1)),
        Value::Bool(true)
    );
    assert_eq!(
        eval(BinaryOp::Eq, &Value::Null, &Value::Undefined),
        Value::Bool(true)
    );
    assert_eq!(
        eval(BinaryOp::Eq, &Value::Null, &Value::int(0)),
        Value::Bool(false)
    );
    assert_eq!(
        eval(BinaryOp::NotEq, &Value::Bool(true), &Value::string("1")),
        Value::Bool(false)
    );
}

#[test]
fn strict_equality_does_not_coerce() {
    assert_eq!(
        eval(BinaryOp::StrictEq, &Value::string("1"), &Value::int(1)),
        Value::Bool(false)
    );
    assert_eq!(
        eval(BinaryOp::StrictEq, &Value::int(1), &num(1.0)),
        Value::Bool(true)
    );
    assert_eq!(
        eval(BinaryOp::StrictEq, &num(0.0), &num(-0.0)),
        Value::Bool(true)
    );
    let nan = num(f64::NAN);
    assert_eq!(eval(BinaryOp::StrictEq, &nan, &nan), Value::Bool(false));
    assert_eq!(eval(BinaryOp::StrictNotEq, &nan, &nan), Value::Bool(true));
}

#[test]
fn objects_are_equal_by_identity() {
    let a = Value::Object(ObjectRef::ordinary());
    let b = Value::Object(ObjectRef::ordinary());
    assert_eq!(eval(BinaryOp::StrictEq, &a, &a.clone()), Value::Bool(true));
    assert_eq!(eval(BinaryOp::Eq, &a, &b), Value::Bool(false));
}

// Type and shape checks

#[test]
fn instanceof_walks_the_prototype_chain() {
    let ctor = ObjectRef::function_literal(Some("Point"), FunctionKind::Function);
    let Value::Object(proto) = ctor.get("prototype") else {
        panic!("function literal has no prototype object");
    };
    let instance = Value::Object(ObjectRef::with_prototype(proto));
    let ctor = Value::Object(ctor);

    assert_eq!(eval(BinaryOp::InstanceOf, &instance, &ctor), Value::Bool(true));
    assert_eq!(
        eval(BinaryOp::InstanceOf, &Value::Object(ObjectRef::ordinary()), &ctor),
        Value::Bool(false)
    );
    assert_eq!(
        eval(BinaryOp::InstanceOf, &Value::int(1), &ctor),
        Value::Bool(false)
    );
}

#[test]
fn instanceof_rejects_bad_right_operands() {
    let err = evaluate_binary(
        None,
        BinaryOp::InstanceOf,
        &Value::Object(ObjectRef::ordinary()),
        &Value::int(1),
    )
    .unwrap_err();
    assert!(err.is_type_error());

    let err = evaluate_binary(
        None,
        BinaryOp::InstanceOf,
        &Value::Object(ObjectRef::ordinary()),
        &Value::Object(ObjectRef::ordinary()),
    )
    .unwrap_err();
    assert!(err.is_type_error());

    let arrow = Value::Object(ObjectRef::function_literal(None, FunctionKind::Arrow));
    let err = evaluate_binary(
        None,
        BinaryOp::InstanceOf,
        &Value::Object(ObjectRef::ordinary()),
        &arrow,
    )
    .unwrap_err();
    assert!(err.is_type_error());
}

#[test]
fn in_checks_own_and_inherited_properties() {
    let proto = ObjectRef::ordinary();
    proto.set("inherited", Value::int(1));
    let obj = ObjectRef::with_prototype(proto);
    obj.set("own", Value::int(2));
    let obj = Value::Object(obj);

    assert_eq!(eval(BinaryOp::In, &Value::string("own"), &obj), Value::Bool(true));
    assert_eq!(
        eval(BinaryOp::In, &Value::string("inherited"), &obj),
        Value::Bool(true)
    );
    assert_eq!(
        eval(BinaryOp::In, &Value::string("missing"), &obj),
        Value::Bool(false)
    );

    let array = Value::Object(ObjectRef::array(vec![Value::int(7)]));
    assert_eq!(eval(BinaryOp::In, &Value::int(0), &array), Value::Bool(true));
    assert_eq!(eval(BinaryOp::In, &Value::int(1), &array), Value::Bool(false));
}

#[test]
fn in_requires_an_object() {
    let err = evaluate_binary(None, BinaryOp::In, &Value::string("length"), &Value::string("abc"))
        .unwrap_err();
    assert!(err.is_type_error());
}
