#![allow(
    clippy::result_large_err,
    reason = "EvalError carries a thrown Value; boxing would add indirection on every `?`"
)]
//! Ecma Value - the value/type model consumed by the operator core.
//!
//! - [`Value`]: tagged primitive-or-object value with an exact-integer subtype
//! - [`JsStr`]: immutable shared string compared by UTF-16 code units
//! - [`ObjectRef`]: shared heap object with a prototype chain
//! - [`HostObject`]: native values wrapped for scripts
//! - [`EvalError`], [`EvalResult`]: runtime errors and their constructors
//!
//! All heap values are `Arc`-backed so that independently running programs
//! on different threads can share host values.

mod errors;
mod host;
mod object;
mod value;

pub use errors::{
    assignment_to_constant, cannot_convert_to_primitive, cannot_create_property,
    class_call_without_new, in_requires_object, instanceof_non_object_prototype,
    instanceof_not_callable, instanceof_requires_object, invalid_assignment_target,
    invalid_string_length,
    not_a_function, not_iterable, property_of_nullish, read_only_binding, read_only_property,
    reserved_assignment_target, unresolvable_reference, EvalError, EvalErrorKind, EvalResult,
    HostError,
};
pub use host::{HostObject, HostTypeId};
pub use object::{
    format_date, ArrayElements, FunctionObject, JsObject, NativeFn, ObjectClass, ObjectRef,
    Property, MAX_ARRAY_LENGTH,
};
pub use value::{number_to_string, JsStr, PreferredType, Value, ValueTag};
