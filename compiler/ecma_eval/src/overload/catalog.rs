//! Host overload catalog.
//!
//! Embedders declare operator overloads for their native types before any
//! script runs. The catalog is built once and frozen; resolution only reads
//! it.

use std::fmt;
use std::sync::Arc;

use ecma_value::{EvalResult, HostObject, HostTypeId, Value};
use rustc_hash::FxHashMap;

use super::OverloadSymbol;
use crate::coerce::{to_boolean, to_number, to_string};

/// Callback invoked with the two converted arguments.
pub type OverloadFn = dyn Fn(&Value, &Value) -> EvalResult + Send + Sync;

/// Declared parameter type of an overload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Exactly this host type.
    Host(HostTypeId),
    Number,
    String,
    Boolean,
    /// Any value, passed through unconverted.
    Any,
}

impl ParamType {
    pub fn host<T: HostObject>() -> Self {
        ParamType::Host(HostTypeId::of::<T>())
    }

    /// Conversion cost from an operand of type `arg`, or `None` if the
    /// argument cannot bind to this parameter.
    ///
    /// Exact matches cost 0, widening Boolean to Number costs 1, stringifying
    /// a primitive costs 2, and `Any` costs 3.
    pub(crate) fn cost(self, arg: OperandType) -> Option<u32> {
        match (self, arg) {
            (ParamType::Host(p), OperandType::Host(a)) => (p == a).then_some(0),
            (ParamType::Number, OperandType::Number)
            | (ParamType::String, OperandType::String)
            | (ParamType::Boolean, OperandType::Boolean) => Some(0),
            (ParamType::Number, OperandType::Boolean) => Some(1),
            (ParamType::String, OperandType::Number | OperandType::Boolean) => Some(2),
            (ParamType::Any, _) => Some(3),
            _ => None,
        }
    }

    fn convert(self, arg: &Value) -> EvalResult {
        match self {
            ParamType::Number => Ok(Value::from_f64(to_number(arg)?)),
            ParamType::String => Ok(Value::Str(to_string(arg)?)),
            ParamType::Boolean => Ok(Value::Bool(to_boolean(arg))),
            ParamType::Host(_) | ParamType::Any => Ok(arg.clone()),
        }
    }
}

/// Runtime type of an operand as seen by overload resolution.
///
/// `undefined`, `null` and plain script objects have no host view and never
/// take part.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperandType {
    Host(HostTypeId),
    Number,
    String,
    Boolean,
}

impl OperandType {
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Int(_) | Value::Number(_) => Some(OperandType::Number),
            Value::Str(_) => Some(OperandType::String),
            Value::Bool(_) => Some(OperandType::Boolean),
            Value::Object(_) => value.host_type().map(OperandType::Host),
            Value::Undefined | Value::Null => None,
        }
    }

    fn host_type(self) -> Option<HostTypeId> {
        match self {
            OperandType::Host(id) => Some(id),
            _ => None,
        }
    }
}

/// A declared overload bound to its parameter conversions.
pub struct OverloadMethod {
    symbol: OverloadSymbol,
    declaring_type: HostTypeId,
    params: [ParamType; 2],
    callback: Arc<OverloadFn>,
}

impl OverloadMethod {
    pub fn symbol(&self) -> OverloadSymbol {
        self.symbol
    }

    pub fn declaring_type(&self) -> HostTypeId {
        self.declaring_type
    }

    pub fn params(&self) -> [ParamType; 2] {
        self.params
    }

    fn cost(&self, left: OperandType, right: OperandType) -> Option<u32> {
        Some(self.params[0].cost(left)? + self.params[1].cost(right)?)
    }

    /// Convert both arguments to the declared parameter types and call.
    ///
    /// Errors from conversion or from the callback are returned unchanged.
    pub fn invoke(&self, left: &Value, right: &Value) -> EvalResult {
        let left = self.params[0].convert(left)?;
        let right = self.params[1].convert(right)?;
        (self.callback)(&left, &right)
    }
}

impl fmt::Debug for OverloadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverloadMethod")
            .field("symbol", &self.symbol)
            .field("declaring_type", &self.declaring_type)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Frozen table of overloads per host type.
#[derive(Default)]
pub struct HostCatalog {
    methods: FxHashMap<HostTypeId, Vec<Arc<OverloadMethod>>>,
}

impl HostCatalog {
    pub fn builder() -> HostCatalogBuilder {
        HostCatalogBuilder::default()
    }

    /// Overloads of `symbol` declared on `ty`, in registration order.
    pub fn methods_on(
        &self,
        ty: HostTypeId,
        symbol: OverloadSymbol,
    ) -> impl Iterator<Item = &Arc<OverloadMethod>> {
        self.methods
            .get(&ty)
            .into_iter()
            .flatten()
            .filter(move |m| m.symbol == symbol)
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Pick the cheapest applicable overload for the operand types.
    ///
    /// Candidates come from the left operand's type, then the right's; the
    /// first of equally cheap candidates wins.
    pub fn best_match(
        &self,
        symbol: OverloadSymbol,
        left: OperandType,
        right: OperandType,
    ) -> Option<Arc<OverloadMethod>> {
        let left_ty = left.host_type();
        let right_ty = right.host_type().filter(|r| Some(*r) != left_ty);

        let mut best: Option<(u32, &Arc<OverloadMethod>)> = None;
        for ty in left_ty.into_iter().chain(right_ty) {
            for method in self.methods_on(ty, symbol) {
                let Some(cost) = method.cost(left, right) else {
                    continue;
                };
                if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                    best = Some((cost, method));
                }
            }
        }
        best.map(|(_, method)| Arc::clone(method))
    }
}

impl fmt::Debug for HostCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.methods.iter().map(|(ty, methods)| (ty, methods.len())))
            .finish()
    }
}

/// Builder for [`HostCatalog`].
#[derive(Default)]
pub struct HostCatalogBuilder {
    methods: FxHashMap<HostTypeId, Vec<Arc<OverloadMethod>>>,
}

impl HostCatalogBuilder {
    /// Declare an overload of `symbol` on host type `T`.
    #[must_use]
    pub fn register<T, F>(mut self, symbol: OverloadSymbol, params: [ParamType; 2], f: F) -> Self
    where
        T: HostObject,
        F: Fn(&Value, &Value) -> EvalResult + Send + Sync + 'static,
    {
        let declaring_type = HostTypeId::of::<T>();
        self.methods
            .entry(declaring_type)
            .or_default()
            .push(Arc::new(OverloadMethod {
                symbol,
                declaring_type,
                params,
                callback: Arc::new(f),
            }));
        self
    }

    pub fn build(self) -> HostCatalog {
        HostCatalog {
            methods: self.methods,
        }
    }
}
