//! ToPrimitive.
//!
//! Objects convert through `valueOf`/`toString`, looked up along the
//! prototype chain. A method that is absent from the chain falls back to the
//! built-in behavior of the object's class; one that is present but not
//! callable is skipped.

use ecma_ir::FunctionKind;
use ecma_value::{
    cannot_convert_to_primitive, format_date, invalid_string_length, EvalResult, JsStr,
    ObjectClass, ObjectRef, PreferredType, Value,
};

use super::to_string;

#[derive(Copy, Clone)]
enum Method {
    ValueOf,
    ToString,
}

impl Method {
    fn key(self) -> &'static str {
        match self {
            Method::ValueOf => "valueOf",
            Method::ToString => "toString",
        }
    }
}

/// Convert `value` to a primitive. Primitives pass through unchanged.
pub fn to_primitive(value: &Value, hint: PreferredType) -> EvalResult {
    let Value::Object(obj) = value else {
        return Ok(value.clone());
    };

    match obj.class() {
        ObjectClass::Host(target) => {
            let result = target.to_primitive(hint)?;
            if result.is_object() {
                return Err(cannot_convert_to_primitive());
            }
            Ok(result)
        }
        ObjectClass::HostType(id) => Ok(Value::string(format!(
            "function {}() {{ [native code] }}",
            id.name()
        ))),
        _ => ordinary_to_primitive(obj, hint),
    }
}

fn ordinary_to_primitive(obj: &ObjectRef, hint: PreferredType) -> EvalResult {
    let hint = match hint {
        PreferredType::Default if matches!(obj.class(), ObjectClass::Date(_)) => {
            PreferredType::String
        }
        PreferredType::Default => PreferredType::Number,
        other => other,
    };
    let order = if hint == PreferredType::String {
        [Method::ToString, Method::ValueOf]
    } else {
        [Method::ValueOf, Method::ToString]
    };

    let this = Value::Object(obj.clone());
    for method in order {
        let result = if obj.has_property(method.key()) {
            let func = obj.get(method.key());
            match func.as_object() {
                Some(f) if f.is_callable() => f.call(&this, &[])?,
                _ => continue,
            }
        } else {
            builtin(obj, method)?
        };
        if !result.is_object() {
            return Ok(result);
        }
    }
    Err(cannot_convert_to_primitive())
}

/// Class-specific `valueOf`/`toString` for objects that do not override them.
fn builtin(obj: &ObjectRef, method: Method) -> EvalResult {
    match method {
        Method::ValueOf => match obj.class() {
            ObjectClass::Date(time) => Ok(Value::from_f64(*time)),
            _ => Ok(Value::Object(obj.clone())),
        },
        Method::ToString => match obj.class() {
            ObjectClass::Array(_) => join(obj).map(Value::Str),
            ObjectClass::Function(func) => Ok(Value::string(match func.kind() {
                FunctionKind::Class => format!("class {} {{ }}", func.name()),
                FunctionKind::Function | FunctionKind::Arrow => {
                    format!("function {}() {{ [native code] }}", func.name())
                }
            })),
            ObjectClass::Date(time) => Ok(Value::string(format_date(*time))),
            ObjectClass::Host(target) => {
                Ok(Value::string(format!("[object {}]", target.type_name())))
            }
            ObjectClass::Ordinary | ObjectClass::HostType(_) => {
                Ok(Value::from("[object Object]"))
            }
        },
    }
}

/// Longest string a join may produce, in bytes.
const MAX_STRING_LENGTH: usize = (1 << 30) - 25;

/// `Array.prototype.join` with the default separator.
///
/// Separators alone exceed [`MAX_STRING_LENGTH`] for very long sparse
/// arrays, which fail up front instead of walking every hole.
fn join(array: &ObjectRef) -> Result<JsStr, ecma_value::EvalError> {
    let len = array.array_len().unwrap_or(0);
    if len as usize > MAX_STRING_LENGTH {
        return Err(invalid_string_length());
    }
    let mut out = String::new();
    for index in 0..len {
        if index > 0 {
            out.push(',');
        }
        if let Some(element) = array.array_element(index) {
            if !element.is_nullish() {
                out.push_str(&to_string(&element)?);
            }
        }
        if out.len() > MAX_STRING_LENGTH {
            return Err(invalid_string_length());
        }
    }
    Ok(JsStr::from(out))
}
