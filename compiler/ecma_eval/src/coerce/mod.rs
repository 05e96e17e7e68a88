//! Abstract operations: type conversion and comparison.
//!
//! Each function here is one of the language's abstract operations. They are
//! free of interpreter state; the only side effects are those of user
//! `valueOf`/`toString` methods and host conversions reached through
//! [`to_primitive`].

mod primitive;

use std::cmp::Ordering;

use ecma_value::{number_to_string, EvalError, JsStr, PreferredType, Value, ValueTag};

pub use primitive::to_primitive;

const TWO_32: f64 = 4_294_967_296.0;
const TWO_31: f64 = 2_147_483_648.0;

// Conversions

pub fn to_boolean(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => false,
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Number(n) => !(*n == 0.0 || n.is_nan()),
        Value::Str(s) => !s.is_empty(),
        Value::Object(_) => true,
    }
}

pub fn to_number(value: &Value) -> Result<f64, EvalError> {
    match value {
        Value::Undefined => Ok(f64::NAN),
        Value::Null => Ok(0.0),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::Int(i) => Ok(f64::from(*i)),
        Value::Number(n) => Ok(*n),
        Value::Str(s) => Ok(string_to_number(s)),
        Value::Object(_) => to_number(&to_primitive(value, PreferredType::Number)?),
    }
}

/// WhiteSpace or LineTerminator. Narrower than [`char::is_whitespace`],
/// which also admits U+0085.
fn is_str_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// StringToNumber: numeric literal grammar with surrounding whitespace.
///
/// Anything outside the grammar is `NaN`, including spellings Rust accepts
/// such as `inf` and `nan`.
pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim_matches(is_str_whitespace);
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }

    if is_decimal_literal(s) {
        s.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut acc = 0.0_f64;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            return f64::NAN;
        };
        acc = acc * f64::from(radix) + f64::from(d);
    }
    acc
}

/// `[+-] (digits [. digits?] | . digits) ([eE] [+-] digits)?`
fn is_decimal_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        mantissa_digits += i - frac_start;
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

pub fn to_string(value: &Value) -> Result<JsStr, EvalError> {
    Ok(match value {
        Value::Undefined => JsStr::from("undefined"),
        Value::Null => JsStr::from("null"),
        Value::Bool(b) => JsStr::from(if *b { "true" } else { "false" }),
        Value::Int(i) => JsStr::from(i.to_string()),
        Value::Number(n) => JsStr::from(number_to_string(*n)),
        Value::Str(s) => s.clone(),
        Value::Object(_) => return to_string(&to_primitive(value, PreferredType::String)?),
    })
}

pub fn to_property_key(value: &Value) -> Result<JsStr, EvalError> {
    to_string(&to_primitive(value, PreferredType::String)?)
}

/// ToInt32 on an already-numeric value: modulo 2^32 into the signed range.
pub fn f64_to_int32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    let m = n.trunc().rem_euclid(TWO_32);
    if m >= TWO_31 {
        (m - TWO_32) as i32
    } else {
        m as i32
    }
}

/// ToUint32 on an already-numeric value: modulo 2^32.
pub fn f64_to_uint32(n: f64) -> u32 {
    if !n.is_finite() {
        return 0;
    }
    n.trunc().rem_euclid(TWO_32) as u32
}

pub fn to_int32(value: &Value) -> Result<i32, EvalError> {
    match value {
        Value::Int(i) => Ok(*i),
        other => Ok(f64_to_int32(to_number(other)?)),
    }
}

pub fn to_uint32(value: &Value) -> Result<u32, EvalError> {
    match value {
        Value::Int(i) => Ok(*i as u32),
        other => Ok(f64_to_uint32(to_number(other)?)),
    }
}

// Equality

/// `===`. Never coerces.
pub fn strict_equals(x: &Value, y: &Value) -> bool {
    match (x, y) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Object(a), Value::Object(b)) => {
            if a.ptr_eq(b) {
                return true;
            }
            match (x.host_target(), y.host_target()) {
                (Some(l), Some(r)) => l.host_equals(r.as_ref()),
                _ => false,
            }
        }
        _ => match (x.as_f64(), y.as_f64()) {
            // IEEE equality: NaN != NaN, 0 == -0.
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// SameValueZero: `===` except that `NaN` equals `NaN`.
pub fn same_value_zero(x: &Value, y: &Value) -> bool {
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) if a.is_nan() && b.is_nan() => true,
        _ => strict_equals(x, y),
    }
}

/// `==`.
pub fn loose_equals(x: &Value, y: &Value) -> Result<bool, EvalError> {
    let (tx, ty) = (x.tag(), y.tag());
    if tx == ty {
        return Ok(strict_equals(x, y));
    }
    if x.is_nullish() && y.is_nullish() {
        return Ok(true);
    }
    match (tx, ty) {
        (ValueTag::Number, ValueTag::String) => Ok(x.as_f64() == Some(to_number(y)?)),
        (ValueTag::String, ValueTag::Number) => Ok(Some(to_number(x)?) == y.as_f64()),
        (ValueTag::Boolean, _) => loose_equals(&Value::from_f64(to_number(x)?), y),
        (_, ValueTag::Boolean) => loose_equals(x, &Value::from_f64(to_number(y)?)),
        (ValueTag::Number | ValueTag::String, ValueTag::Object) => {
            loose_equals(x, &to_primitive(y, PreferredType::Default)?)
        }
        (ValueTag::Object, ValueTag::Number | ValueTag::String) => {
            loose_equals(&to_primitive(x, PreferredType::Default)?, y)
        }
        _ => Ok(false),
    }
}

// Relational comparison

/// IsLessThan(x, y): `Some(x < y)`, or `None` when either side is `NaN`.
///
/// `left_first` says which operand is converted first, so user conversion
/// methods run in source order even when the caller swapped the operands.
pub fn relational_compare(
    x: &Value,
    y: &Value,
    left_first: bool,
) -> Result<Option<bool>, EvalError> {
    if let (Value::Int(a), Value::Int(b)) = (x, y) {
        return Ok(Some(a < b));
    }

    let (px, py) = if left_first {
        let px = to_primitive(x, PreferredType::Number)?;
        let py = to_primitive(y, PreferredType::Number)?;
        (px, py)
    } else {
        let py = to_primitive(y, PreferredType::Number)?;
        let px = to_primitive(x, PreferredType::Number)?;
        (px, py)
    };

    if let (Value::Str(a), Value::Str(b)) = (&px, &py) {
        return Ok(Some(a.cmp_utf16(b) == Ordering::Less));
    }

    let nx = to_number(&px)?;
    let ny = to_number(&py)?;
    if nx.is_nan() || ny.is_nan() {
        return Ok(None);
    }
    Ok(Some(nx < ny))
}
