//! Runtime values.
//!
//! `Value` is a tagged union with one tag per value. `Int` is a fast-path
//! view of a Number holding an exact int32; it reports [`ValueTag::Number`]
//! so type comparisons never distinguish it from `Number`.

mod number;
mod string;

use std::fmt;
use std::sync::Arc;

pub use number::number_to_string;
pub use string::JsStr;

use crate::host::{HostObject, HostTypeId};
use crate::object::{ObjectClass, ObjectRef};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    /// Exact-integer subtype of Number.
    Int(i32),
    Number(f64),
    Str(JsStr),
    Object(ObjectRef),
}

/// Language-level type tag. `Int` and `Number` share `Number`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueTag {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Object,
}

/// Conversion hint for ToPrimitive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PreferredType {
    /// No hint: objects treat it as `Number`, dates as `String`.
    Default,
    Number,
    String,
}

impl Value {
    // Factory methods

    #[inline]
    pub const fn int(value: i32) -> Self {
        Value::Int(value)
    }

    /// A Number tagged as general floating point, even when integral.
    #[inline]
    pub const fn number(value: f64) -> Self {
        Value::Number(value)
    }

    /// A Number, tagged `Int` when it is an exact int32 other than `-0`.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        let truncated = value as i32;
        if f64::from(truncated) == value && !(value == 0.0 && value.is_sign_negative()) {
            Value::Int(truncated)
        } else {
            Value::Number(value)
        }
    }

    /// A Number from a widened integer result, tagged `Int` when it fits.
    #[inline]
    pub fn from_i64(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(int) => Value::Int(int),
            Err(_) => Value::Number(value as f64),
        }
    }

    #[inline]
    pub fn string(value: impl Into<JsStr>) -> Self {
        Value::Str(value.into())
    }

    #[inline]
    pub fn object(object: ObjectRef) -> Self {
        Value::Object(object)
    }

    /// Wrap a native value for scripts.
    pub fn host<T: HostObject>(value: T) -> Self {
        Value::Object(ObjectRef::host(Arc::new(value)))
    }

    // Tag inspection

    pub fn tag(&self) -> ValueTag {
        match self {
            Value::Undefined => ValueTag::Undefined,
            Value::Null => ValueTag::Null,
            Value::Bool(_) => ValueTag::Boolean,
            Value::Int(_) | Value::Number(_) => ValueTag::Number,
            Value::Str(_) => ValueTag::String,
            Value::Object(_) => ValueTag::Object,
        }
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Number(_))
    }

    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Numeric payload of a Number value, for either subtype.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(f64::from(*i)),
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    // Host unwrapping

    /// Whether this value wraps a native host object.
    pub fn is_host_wrapped(&self) -> bool {
        self.host_target().is_some()
    }

    /// The native object behind a host-wrapped value.
    pub fn host_target(&self) -> Option<&Arc<dyn HostObject>> {
        match self {
            Value::Object(obj) => match obj.class() {
                ObjectClass::Host(target) => Some(target),
                _ => None,
            },
            _ => None,
        }
    }

    /// Downcast a host-wrapped value to its concrete native type.
    pub fn host_ref<T: HostObject>(&self) -> Option<&T> {
        self.host_target()?.as_any().downcast_ref::<T>()
    }

    /// Runtime host type of a host-wrapped value.
    pub fn host_type(&self) -> Option<HostTypeId> {
        self.host_target().map(|target| target.host_type())
    }

    /// `typeof` result.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Object(_) if !self.is_callable() => "object",
            Value::Object(_) => "function",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Number(_) => "number",
            Value::Str(_) => "string",
        }
    }

    pub fn is_callable(&self) -> bool {
        self.as_object().is_some_and(ObjectRef::is_callable)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::from_f64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.into())
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

/// Host-side comparison for assertions and maps.
///
/// Numbers compare by value across both subtypes with `NaN == NaN`, objects
/// by identity. This is not a language operator; see `ecma_eval::coerce`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y || (x.is_nan() && y.is_nan()),
                _ => false,
            },
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(i) => write!(f, "Int({i})"),
            Value::Number(n) => write!(f, "Number({})", number_to_string(*n)),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Object(obj) => write!(f, "Object({obj:?})"),
        }
    }
}

/// Display form used in diagnostics. Strings are quoted.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Number(n) => write!(f, "{}", number_to_string(*n)),
            Value::Str(s) => write!(f, "'{s}'"),
            Value::Object(obj) => write!(f, "{obj}"),
        }
    }
}
