//! Heap objects.
//!
//! Every object is shared through [`ObjectRef`] (`Arc<JsObject>`). The
//! property table and prototype link sit behind `RwLock`s so objects can be
//! read and written from any thread holding a reference. Guards are never
//! held across a prototype hop or a callback.

mod array;
mod date;

use std::fmt;
use std::sync::Arc;

use ecma_ir::FunctionKind;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

pub use array::{ArrayElements, MAX_ARRAY_LENGTH};
pub use date::format_date;

use crate::errors::{class_call_without_new, not_a_function, EvalResult};
use crate::host::{HostObject, HostTypeId};
use crate::value::{JsStr, Value};

/// Signature of native callables: `(this, args) -> result`.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> EvalResult + Send + Sync;

/// An own data property.
#[derive(Clone, Debug)]
pub struct Property {
    pub value: Value,
    pub writable: bool,
}

impl Property {
    pub fn writable(value: Value) -> Self {
        Property {
            value,
            writable: true,
        }
    }

    pub fn readonly(value: Value) -> Self {
        Property {
            value,
            writable: false,
        }
    }
}

/// Function object payload.
///
/// Function and class literals carry no script body here; calling one
/// yields `undefined` (functions) or throws (classes). Behavior comes from
/// native callables installed by the embedder.
pub struct FunctionObject {
    name: RwLock<JsStr>,
    kind: FunctionKind,
    native: Option<Arc<NativeFn>>,
}

impl FunctionObject {
    pub fn name(&self) -> JsStr {
        self.name.read().clone()
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn is_native(&self) -> bool {
        self.native.is_some()
    }
}

/// Internal class of an object.
pub enum ObjectClass {
    Ordinary,
    /// Element storage; `length` and index keys read through it.
    Array(RwLock<ArrayElements>),
    Function(FunctionObject),
    /// Time value in milliseconds since the epoch.
    Date(f64),
    /// Wrapper around a native instance.
    Host(Arc<dyn HostObject>),
    /// A native type exposed as a value, usable on the right of `instanceof`.
    HostType(HostTypeId),
}

/// Object storage.
pub struct JsObject {
    class: ObjectClass,
    properties: RwLock<FxHashMap<JsStr, Property>>,
    prototype: RwLock<Option<ObjectRef>>,
}

/// Shared handle to a heap object. Equality is identity.
#[derive(Clone)]
pub struct ObjectRef(Arc<JsObject>);

impl ObjectRef {
    fn from_class(class: ObjectClass, prototype: Option<ObjectRef>) -> Self {
        ObjectRef(Arc::new(JsObject {
            class,
            properties: RwLock::new(FxHashMap::default()),
            prototype: RwLock::new(prototype),
        }))
    }

    // Construction

    pub fn ordinary() -> Self {
        Self::from_class(ObjectClass::Ordinary, None)
    }

    pub fn with_prototype(prototype: ObjectRef) -> Self {
        Self::from_class(ObjectClass::Ordinary, Some(prototype))
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Self::from_class(
            ObjectClass::Array(RwLock::new(ArrayElements::new(elements))),
            None,
        )
    }

    /// A callable backed by a Rust closure.
    pub fn native_function<F>(name: &str, f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> EvalResult + Send + Sync + 'static,
    {
        Self::from_class(
            ObjectClass::Function(FunctionObject {
                name: RwLock::new(JsStr::from(name)),
                kind: FunctionKind::Function,
                native: Some(Arc::new(f)),
            }),
            None,
        )
    }

    /// The value of a `function` or `class` literal.
    ///
    /// Non-arrow literals get a fresh `prototype` object, writable for
    /// functions and read-only for classes.
    pub fn function_literal(name: Option<&str>, kind: FunctionKind) -> Self {
        let func = Self::from_class(
            ObjectClass::Function(FunctionObject {
                name: RwLock::new(JsStr::from(name.unwrap_or(""))),
                kind,
                native: None,
            }),
            None,
        );
        let prototype = Value::Object(ObjectRef::ordinary());
        match kind {
            FunctionKind::Function => func.define("prototype", Property::writable(prototype)),
            FunctionKind::Class => func.define("prototype", Property::readonly(prototype)),
            FunctionKind::Arrow => {}
        }
        func
    }

    pub fn date(time: f64) -> Self {
        Self::from_class(ObjectClass::Date(time), None)
    }

    pub fn host(target: Arc<dyn HostObject>) -> Self {
        Self::from_class(ObjectClass::Host(target), None)
    }

    pub fn host_type(id: HostTypeId) -> Self {
        Self::from_class(ObjectClass::HostType(id), None)
    }

    // Inspection

    pub fn class(&self) -> &ObjectClass {
        &self.0.class
    }

    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self.0.class, ObjectClass::Function(_))
    }

    pub fn as_function(&self) -> Option<&FunctionObject> {
        match &self.0.class {
            ObjectClass::Function(func) => Some(func),
            _ => None,
        }
    }

    pub fn prototype(&self) -> Option<ObjectRef> {
        self.0.prototype.read().clone()
    }

    /// Replace the prototype link.
    ///
    /// Returns `false`, leaving the link unchanged, if `prototype` would
    /// make the chain circular.
    pub fn set_prototype(&self, prototype: Option<ObjectRef>) -> bool {
        let mut cursor = prototype.clone();
        while let Some(obj) = cursor {
            if obj.ptr_eq(self) {
                return false;
            }
            cursor = obj.prototype();
        }
        *self.0.prototype.write() = prototype;
        true
    }

    /// Snapshot of the elements of an array, holes as `undefined`.
    ///
    /// Allocates one slot per index up to `length`; check
    /// [`ObjectRef::array_len`] first when the array may be sparse.
    pub fn array_elements(&self) -> Option<Vec<Value>> {
        match &self.0.class {
            ObjectClass::Array(elements) => Some(elements.read().to_vec()),
            _ => None,
        }
    }

    pub fn array_len(&self) -> Option<u32> {
        match &self.0.class {
            ObjectClass::Array(elements) => Some(elements.read().len()),
            _ => None,
        }
    }

    /// Element at `index` of an array; `None` for holes and non-arrays.
    pub fn array_element(&self, index: u32) -> Option<Value> {
        match &self.0.class {
            ObjectClass::Array(elements) => elements.read().get(index).cloned(),
            _ => None,
        }
    }

    // Properties

    /// Own property, including the implicit ones of arrays, functions and
    /// host objects.
    pub fn get_own(&self, key: &str) -> Option<Value> {
        if let Some(prop) = self.0.properties.read().get(key) {
            return Some(prop.value.clone());
        }
        match &self.0.class {
            ObjectClass::Array(elements) => {
                let elements = elements.read();
                if key == "length" {
                    return Some(Value::from_i64(i64::from(elements.len())));
                }
                array_index(key).and_then(|i| elements.get(i).cloned())
            }
            ObjectClass::Function(func) if key == "name" => Some(Value::Str(func.name())),
            ObjectClass::Host(target) => target.get_property(&JsStr::from(key)),
            _ => None,
        }
    }

    /// Property lookup along the prototype chain. Missing keys read as
    /// `undefined`.
    pub fn get(&self, key: &str) -> Value {
        let mut cursor = Some(self.clone());
        while let Some(obj) = cursor {
            if let Some(value) = obj.get_own(key) {
                return value;
            }
            cursor = obj.prototype();
        }
        Value::Undefined
    }

    pub fn has_own_property(&self, key: &str) -> bool {
        if self.0.properties.read().contains_key(key) {
            return true;
        }
        match &self.0.class {
            ObjectClass::Array(elements) => {
                key == "length" || array_index(key).is_some_and(|i| elements.read().contains(i))
            }
            ObjectClass::Function(_) => key == "name",
            ObjectClass::Host(target) => target.has_property(&JsStr::from(key)),
            _ => false,
        }
    }

    pub fn has_property(&self, key: &str) -> bool {
        let mut cursor = Some(self.clone());
        while let Some(obj) = cursor {
            if obj.has_own_property(key) {
                return true;
            }
            cursor = obj.prototype();
        }
        false
    }

    fn is_writable(&self, key: &str) -> bool {
        let mut cursor = Some(self.clone());
        while let Some(obj) = cursor {
            if let Some(prop) = obj.0.properties.read().get(key) {
                return prop.writable;
            }
            if matches!(obj.0.class, ObjectClass::Function(_)) && key == "name" {
                return false;
            }
            cursor = obj.prototype();
        }
        true
    }

    /// Ordinary `[[Set]]`.
    ///
    /// Returns `false` when the property, own or inherited, is read-only;
    /// the caller decides whether that is an error.
    pub fn set(&self, key: &str, value: Value) -> bool {
        if !self.is_writable(key) {
            return false;
        }
        if let ObjectClass::Array(elements) = &self.0.class {
            if let Some(index) = array_index(key) {
                elements.write().set(index, value);
                return true;
            }
            if key == "length" {
                let Some(len) = value
                    .as_f64()
                    .filter(|n| n.fract() == 0.0 && (0.0..=f64::from(MAX_ARRAY_LENGTH)).contains(n))
                else {
                    return false;
                };
                elements.write().set_len(len as u32);
                return true;
            }
        }
        self.0
            .properties
            .write()
            .insert(JsStr::from(key), Property::writable(value));
        true
    }

    /// Define or replace an own property.
    pub fn define(&self, key: &str, prop: Property) {
        self.0.properties.write().insert(JsStr::from(key), prop);
    }

    pub fn define_readonly(&self, key: &str, value: Value) {
        self.define(key, Property::readonly(value));
    }

    // Functions

    pub fn function_name(&self) -> Option<JsStr> {
        self.as_function().map(FunctionObject::name)
    }

    /// Give an anonymous function or class literal the name of the binding
    /// it is first assigned to. Named functions keep their name.
    pub fn set_function_name(&self, name: &str) {
        if let Some(func) = self.as_function() {
            let mut current = func.name.write();
            if current.is_empty() {
                *current = JsStr::from(name);
            }
        }
    }

    /// Invoke with `this` and `args`.
    pub fn call(&self, this: &Value, args: &[Value]) -> EvalResult {
        let Some(func) = self.as_function() else {
            return Err(not_a_function(&Value::Object(self.clone())));
        };
        if let Some(native) = &func.native {
            return native(this, args);
        }
        match func.kind {
            FunctionKind::Class => Err(class_call_without_new(&func.name())),
            FunctionKind::Function | FunctionKind::Arrow => Ok(Value::Undefined),
        }
    }
}

/// Parse a canonical array index (`"0"`, `"17"`, never `"01"`).
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|i| *i != u32::MAX)
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} @ {:p}", Arc::as_ptr(&self.0))
    }
}

/// Short description for diagnostics. Not the script-visible string form.
impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0.class {
            ObjectClass::Ordinary => write!(f, "#<Object>"),
            ObjectClass::Array(_) => write!(f, "#<Array>"),
            ObjectClass::Function(func) => match func.kind {
                FunctionKind::Class => write!(f, "class {}", func.name()),
                FunctionKind::Function | FunctionKind::Arrow => {
                    write!(f, "function {}", func.name())
                }
            },
            ObjectClass::Date(_) => write!(f, "#<Date>"),
            ObjectClass::Host(target) => write!(f, "#<{}>", target.type_name()),
            ObjectClass::HostType(id) => write!(f, "[type {id}]"),
        }
    }
}
