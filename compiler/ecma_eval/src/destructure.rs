//! Destructuring assignment.
//!
//! Pattern targets are handed to a [`DestructuringAssigner`] so embedders
//! can supply their own iteration protocol. [`ElementwiseDestructuring`]
//! covers arrays, strings and plain object patterns.

use ecma_value::{not_iterable, property_of_nullish, EvalError, ObjectRef, Value};

use crate::exec::get_property;
use crate::interpreter::Interpreter;
use crate::node::PatternNode;

/// Assigns the parts of a value to the targets of a pattern.
pub trait DestructuringAssigner: Send + Sync {
    fn assign_pattern(
        &self,
        interp: &mut Interpreter<'_>,
        pattern: &PatternNode,
        value: Value,
    ) -> Result<(), EvalError>;
}

/// Index-based destructuring without an iterator protocol.
#[derive(Copy, Clone, Debug, Default)]
pub struct ElementwiseDestructuring;

impl DestructuringAssigner for ElementwiseDestructuring {
    fn assign_pattern(
        &self,
        interp: &mut Interpreter<'_>,
        pattern: &PatternNode,
        value: Value,
    ) -> Result<(), EvalError> {
        match pattern {
            PatternNode::Array(targets) => {
                let elements = Elements::of(&value)?;
                for (index, target) in targets.iter().enumerate() {
                    let Some(target) = target else { continue };
                    interp.assign_to_target(target, elements.get(index))?;
                }
                Ok(())
            }
            PatternNode::Object(entries) => {
                if value.is_nullish() {
                    let key = entries.first().map_or("", |(key, _)| key.as_str());
                    return Err(property_of_nullish(key, &value));
                }
                for (key, target) in entries {
                    let element = get_property(&value, key)?;
                    interp.assign_to_target(target, element)?;
                }
                Ok(())
            }
        }
    }
}

/// Indexable source of an array pattern.
enum Elements<'v> {
    Array(&'v ObjectRef),
    Chars(Vec<Value>),
}

impl<'v> Elements<'v> {
    fn of(value: &'v Value) -> Result<Self, EvalError> {
        match value {
            Value::Object(obj) if obj.array_len().is_some() => Ok(Elements::Array(obj)),
            Value::Str(s) => Ok(Elements::Chars(
                s.chars().map(|c| Value::string(c.to_string())).collect(),
            )),
            _ => Err(not_iterable(value)),
        }
    }

    /// Element at `index`; holes and indices past the end are `undefined`.
    fn get(&self, index: usize) -> Value {
        match self {
            Elements::Array(obj) => u32::try_from(index)
                .ok()
                .and_then(|index| obj.array_element(index))
                .unwrap_or(Value::Undefined),
            Elements::Chars(chars) => chars.get(index).cloned().unwrap_or(Value::Undefined),
        }
    }
}
