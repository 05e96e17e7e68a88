//! Binary operator evaluators.
//!
//! One function per operator tag, each a pure function of two evaluated
//! operands. The closed tag set maps to a table of function pointers
//! ([`evaluator_for`]) resolved once when the tree is built, so the run-time
//! path is a single indirect call with no match on the tag.
//!
//! Every evaluator checks, in order: a host overload (when interop is on and
//! the operator has an overload symbol), the exact-integer fast path, then
//! the coercing algorithm.

use ecma_ir::BinaryOp;
use ecma_value::{
    in_requires_object, instanceof_non_object_prototype, instanceof_not_callable,
    instanceof_requires_object, EvalResult, ObjectClass, PreferredType, Value,
};

use crate::coerce::{
    loose_equals, relational_compare, strict_equals, to_int32, to_number, to_primitive,
    to_property_key, to_string, to_uint32,
};
use crate::overload::{OverloadResolver, OverloadSymbol};

/// Evaluator signature shared by every operator.
pub type BinaryFn = fn(Option<&OverloadResolver>, &Value, &Value) -> EvalResult;

/// The evaluator for an operator tag.
pub fn evaluator_for(op: BinaryOp) -> BinaryFn {
    match op {
        BinaryOp::StrictEq => strict_eq,
        BinaryOp::StrictNotEq => strict_not_eq,
        BinaryOp::Eq => eq,
        BinaryOp::NotEq => not_eq,
        BinaryOp::Lt => lt,
        BinaryOp::Gt => gt,
        BinaryOp::LtEq => lt_eq,
        BinaryOp::GtEq => gt_eq,
        BinaryOp::Add => add,
        BinaryOp::Sub => sub,
        BinaryOp::Mul => mul,
        BinaryOp::Div => div,
        BinaryOp::Mod => rem,
        BinaryOp::Exp => exp,
        BinaryOp::BitAnd => bit_and,
        BinaryOp::BitOr => bit_or,
        BinaryOp::BitXor => bit_xor,
        BinaryOp::Shl => shl,
        BinaryOp::Shr => shr,
        BinaryOp::UShr => ushr,
        BinaryOp::InstanceOf => instance_of,
        BinaryOp::In => has_property,
    }
}

/// Evaluate `left op right`.
pub fn evaluate_binary(
    interop: Option<&OverloadResolver>,
    op: BinaryOp,
    left: &Value,
    right: &Value,
) -> EvalResult {
    evaluator_for(op)(interop, left, right)
}

#[inline]
fn overloaded(
    interop: Option<&OverloadResolver>,
    symbol: OverloadSymbol,
    left: &Value,
    right: &Value,
) -> Option<EvalResult> {
    interop?.try_dispatch(symbol, left, right)
}

/// Try the overload for `$symbol`, returning its result if one applied.
macro_rules! try_overload {
    ($interop:expr, $symbol:ident, $left:expr, $right:expr) => {
        if let Some(result) = overloaded($interop, OverloadSymbol::$symbol, $left, $right) {
            return result;
        }
    };
}

// Arithmetic

/// `+`. Int pair adds in `i64`; otherwise string concatenation when either
/// primitive is a string, numeric addition when neither is.
pub fn add(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, Addition, left, right);
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return Ok(Value::from_i64(i64::from(*a) + i64::from(*b)));
    }

    let lprim = to_primitive(left, PreferredType::Default)?;
    let rprim = to_primitive(right, PreferredType::Default)?;
    if lprim.is_string() || rprim.is_string() {
        let lstr = to_string(&lprim)?;
        let rstr = to_string(&rprim)?;
        return Ok(Value::Str(lstr.concat(&rstr)));
    }
    Ok(Value::from_f64(to_number(&lprim)? + to_number(&rprim)?))
}

/// `-`. Int pair subtracts in `i64`; otherwise ToNumber on both.
pub fn sub(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, Subtraction, left, right);
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return Ok(Value::from_i64(i64::from(*a) - i64::from(*b)));
    }
    let l = to_number(left)?;
    Ok(Value::from_f64(l - to_number(right)?))
}

/// `*`. Int pair multiplies in `i64`, keeping `-0`; an `undefined` operand
/// yields `undefined`; otherwise ToNumber on both.
pub fn mul(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, Multiply, left, right);
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        let product = i64::from(*a) * i64::from(*b);
        // 0 * -n is -0, which the integer subtype cannot hold.
        if product == 0 && (*a < 0 || *b < 0) {
            return Ok(Value::number(-0.0));
        }
        return Ok(Value::from_i64(product));
    }
    if left.is_undefined() || right.is_undefined() {
        return Ok(Value::Undefined);
    }
    let l = to_number(left)?;
    Ok(Value::from_f64(l * to_number(right)?))
}

/// `/`. ToNumber on both; there is no integer fast path.
pub fn div(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, Division, left, right);
    let l = to_number(left)?;
    Ok(Value::from_f64(l / to_number(right)?))
}

/// `%`. Positive int dividend with a non-zero divisor stays integral; an
/// `undefined` operand yields `undefined`; otherwise f64 remainder, which
/// takes the sign of the dividend.
pub fn rem(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, Modulus, left, right);
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        if *a > 0 && *b != 0 {
            return Ok(Value::Int(a % b));
        }
    }
    if left.is_undefined() || right.is_undefined() {
        return Ok(Value::Undefined);
    }
    let l = to_number(left)?;
    Ok(Value::from_f64(l % to_number(right)?))
}

/// `**`. ToNumber on both, then Number::exponentiate.
pub fn exp(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, Exponentiation, left, right);
    let base = to_number(left)?;
    Ok(Value::from_f64(exponentiate(base, to_number(right)?)))
}

/// Number::exponentiate. Differs from `powf` for NaN exponents and for
/// `(±1) ** ±Infinity`, which are NaN.
fn exponentiate(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() {
        return f64::NAN;
    }
    if exponent == 0.0 {
        return 1.0;
    }
    if base.abs() == 1.0 && exponent.is_infinite() {
        return f64::NAN;
    }
    base.powf(exponent)
}

// Bitwise

/// `&`. Int pair masks directly; otherwise ToInt32 on both.
pub fn bit_and(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, BitwiseAnd, left, right);
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return Ok(Value::Int(a & b));
    }
    let l = to_int32(left)?;
    Ok(Value::Int(l & to_int32(right)?))
}

/// `|`. Int pair combines directly; otherwise ToInt32 on both.
pub fn bit_or(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, BitwiseOr, left, right);
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return Ok(Value::Int(a | b));
    }
    let l = to_int32(left)?;
    Ok(Value::Int(l | to_int32(right)?))
}

/// `^`. Int pair combines directly; otherwise ToInt32 on both.
pub fn bit_xor(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, ExclusiveOr, left, right);
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return Ok(Value::Int(a ^ b));
    }
    let l = to_int32(left)?;
    Ok(Value::Int(l ^ to_int32(right)?))
}

/// `<<`. ToInt32 on the left, shift count masked to its low 5 bits.
pub fn shl(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, LeftShift, left, right);
    let l = to_int32(left)?;
    let count = to_uint32(right)? & 31;
    Ok(Value::Int(l.wrapping_shl(count)))
}

/// `>>`. Sign-propagating; ToInt32 on the left, count masked to 5 bits.
pub fn shr(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, RightShift, left, right);
    let l = to_int32(left)?;
    let count = to_uint32(right)? & 31;
    Ok(Value::Int(l >> count))
}

/// `>>>`. Zero-filling; ToUint32 on the left, so the result may leave the
/// integer subtype.
pub fn ushr(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, UnsignedRightShift, left, right);
    let l = to_uint32(left)?;
    let count = to_uint32(right)? & 31;
    Ok(Value::from_i64(i64::from(l >> count)))
}

// Relational

/// `<`. Relational comparison, left first; an undefined comparison is `false`.
pub fn lt(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, LessThan, left, right);
    Ok(Value::Bool(relational_compare(left, right, true)? == Some(true)))
}

/// `a > b` is `b < a`, converting `a` first.
pub fn gt(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, GreaterThan, left, right);
    Ok(Value::Bool(relational_compare(right, left, false)? == Some(true)))
}

/// `a <= b` is `!(b < a)`, except that an undefined comparison is `false`.
pub fn lt_eq(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, LessThanOrEqual, left, right);
    let swapped = relational_compare(right, left, false)?;
    Ok(Value::Bool(swapped == Some(false)))
}

/// `a >= b` is `!(a < b)`, except that an undefined comparison is `false`.
pub fn gt_eq(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, GreaterThanOrEqual, left, right);
    let less = relational_compare(left, right, true)?;
    Ok(Value::Bool(less == Some(false)))
}

// Equality

/// `==`. Abstract equality after any host overload.
pub fn eq(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, Equality, left, right);
    Ok(Value::Bool(loose_equals(left, right)?))
}

/// `!=`. Negated abstract equality after any host overload.
pub fn not_eq(interop: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    try_overload!(interop, Inequality, left, right);
    Ok(Value::Bool(!loose_equals(left, right)?))
}

/// `===`. Never overloaded.
pub fn strict_eq(_: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    Ok(Value::Bool(strict_equals(left, right)))
}

/// `!==`. Never overloaded.
pub fn strict_not_eq(_: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    Ok(Value::Bool(!strict_equals(left, right)))
}

// Type and shape checks

/// `instanceof`.
///
/// A host type on the right tests the left operand's host type. Otherwise
/// the right operand must be callable, and its `prototype` is searched for on
/// the left operand's prototype chain.
pub fn instance_of(_: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    let Value::Object(target) = right else {
        return Err(instanceof_requires_object(right));
    };
    if let ObjectClass::HostType(id) = target.class() {
        return Ok(Value::Bool(left.host_type() == Some(*id)));
    }
    if !target.is_callable() {
        return Err(instanceof_not_callable(right));
    }
    let Value::Object(obj) = left else {
        return Ok(Value::Bool(false));
    };
    let prototype = target.get("prototype");
    let Value::Object(prototype) = prototype else {
        return Err(instanceof_non_object_prototype(&prototype));
    };

    let mut cursor = obj.prototype();
    while let Some(proto) = cursor {
        if proto.ptr_eq(&prototype) {
            return Ok(Value::Bool(true));
        }
        cursor = proto.prototype();
    }
    Ok(Value::Bool(false))
}

/// `in`: own or inherited property membership.
pub fn has_property(_: Option<&OverloadResolver>, left: &Value, right: &Value) -> EvalResult {
    let Value::Object(obj) = right else {
        return Err(in_requires_object(left, right));
    };
    let key = to_property_key(left)?;
    Ok(Value::Bool(obj.has_property(&key)))
}
