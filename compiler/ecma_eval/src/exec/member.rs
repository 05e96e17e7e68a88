//! Property reads and writes on evaluated values.

use ecma_value::{
    cannot_create_property, property_of_nullish, read_only_property, EvalError, EvalResult,
    JsStr, Value,
};

use crate::coerce::to_property_key;
use crate::interpreter::Interpreter;
use crate::node::{MemberNode, PropertyKey};

/// `base[key]`.
///
/// Strings answer `length` and their UTF-16 code units; other primitives
/// have no own properties here and read as `undefined`.
pub fn get_property(base: &Value, key: &str) -> EvalResult {
    match base {
        Value::Object(obj) => Ok(obj.get(key)),
        Value::Undefined | Value::Null => Err(property_of_nullish(key, base)),
        Value::Str(s) => {
            if key == "length" {
                return Ok(Value::from_i64(s.utf16_len() as i64));
            }
            Ok(string_index(key)
                .and_then(|i| s.unit_at(i))
                .map_or(Value::Undefined, Value::Str))
        }
        Value::Bool(_) | Value::Int(_) | Value::Number(_) => Ok(Value::Undefined),
    }
}

/// `base[key] = value`.
///
/// A rejected write is a `TypeError` in strict mode and silently dropped
/// otherwise. Writes to a nullish base always fail.
pub fn put_property(base: &Value, key: &str, value: Value, strict: bool) -> Result<(), EvalError> {
    match base {
        Value::Object(obj) => {
            if obj.set(key, value) || !strict {
                Ok(())
            } else {
                Err(read_only_property(key, base))
            }
        }
        Value::Undefined | Value::Null => Err(property_of_nullish(key, base)),
        _ if strict => Err(cannot_create_property(key, base)),
        _ => Ok(()),
    }
}

fn string_index(key: &str) -> Option<usize> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

impl Interpreter<'_> {
    /// Evaluate the object and key of a member expression, left to right.
    pub(crate) fn eval_member_parts(
        &mut self,
        member: &MemberNode,
    ) -> Result<(Value, JsStr), EvalError> {
        let base = self.evaluate(&member.object)?;
        let key = match &member.property {
            PropertyKey::Static(name) => name.clone(),
            PropertyKey::Computed(node) => {
                let key = self.evaluate(node)?;
                if base.is_nullish() {
                    let text = match &key {
                        Value::Str(s) => s.to_string(),
                        other => other.to_string(),
                    };
                    return Err(property_of_nullish(&text, &base).with_span(member.span));
                }
                to_property_key(&key).map_err(|e| e.with_span(member.span))?
            }
        };
        Ok((base, key))
    }

    pub(crate) fn eval_member(&mut self, member: &MemberNode) -> EvalResult {
        let (base, key) = self.eval_member_parts(member)?;
        get_property(&base, &key).map_err(|e| e.with_span(member.span))
    }
}
