//! Native values exposed to scripts.
//!
//! A host object is any Rust value implementing [`HostObject`], wrapped in a
//! script object. Operators on host-wrapped operands first consult the
//! overload catalog; otherwise the host object takes part in ordinary
//! coercion through [`HostObject::to_primitive`].

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::errors::{cannot_convert_to_primitive, EvalError};
use crate::value::{JsStr, PreferredType, Value};

/// A native value reachable from scripts.
pub trait HostObject: Any + Send + Sync + fmt::Debug {
    /// Type name used in diagnostics and `[object Name]` rendering.
    fn type_name(&self) -> &'static str;

    /// Runtime type identity, used for overload lookup.
    fn host_type(&self) -> HostTypeId {
        HostTypeId {
            id: self.as_any().type_id(),
            name: self.type_name(),
        }
    }

    /// Host-level equality for `===` between two distinct wrappers.
    fn host_equals(&self, _other: &dyn HostObject) -> bool {
        false
    }

    /// Convert to a primitive for ordinary (non-overloaded) operators.
    fn to_primitive(&self, _hint: PreferredType) -> Result<Value, EvalError> {
        Err(cannot_convert_to_primitive())
    }

    /// Read a script-visible property.
    fn get_property(&self, _key: &JsStr) -> Option<Value> {
        None
    }

    fn has_property(&self, key: &JsStr) -> bool {
        self.get_property(key).is_some()
    }

    fn as_any(&self) -> &dyn Any;
}

/// Identity of a native type, independent of any instance.
///
/// Equality and hashing use the `TypeId` only; the name is for display.
#[derive(Copy, Clone)]
pub struct HostTypeId {
    id: TypeId,
    name: &'static str,
}

impl HostTypeId {
    /// Identity of `T`, named by its unqualified Rust type name.
    pub fn of<T: Any>() -> Self {
        let full = std::any::type_name::<T>();
        let name = full.rsplit("::").next().unwrap_or(full);
        HostTypeId {
            id: TypeId::of::<T>(),
            name,
        }
    }

    pub fn name(self) -> &'static str {
        self.name
    }

    pub fn type_id(self) -> TypeId {
        self.id
    }
}

impl PartialEq for HostTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HostTypeId {}

impl Hash for HostTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for HostTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTypeId({})", self.name)
    }
}

impl fmt::Display for HostTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug)]
    struct Meters(f64);

    impl HostObject for Meters {
        fn type_name(&self) -> &'static str {
            "Meters"
        }

        fn to_primitive(&self, _hint: PreferredType) -> Result<Value, EvalError> {
            Ok(Value::from_f64(self.0))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn instance_type_matches_static_type() {
        let m = Meters(2.0);
        assert_eq!(m.host_type(), HostTypeId::of::<Meters>());
        assert_eq!(HostTypeId::of::<Meters>().name(), "Meters");
    }

    #[test]
    fn distinct_types_are_distinct() {
        assert_ne!(HostTypeId::of::<Meters>(), HostTypeId::of::<String>());
    }

    #[test]
    fn wrapped_value_downcasts() {
        let v = Value::host(Meters(3.5));
        assert!(v.is_host_wrapped());
        assert_eq!(v.host_ref::<Meters>().map(|m| m.0), Some(3.5));
        assert!(!Value::Int(1).is_host_wrapped());
    }
}
