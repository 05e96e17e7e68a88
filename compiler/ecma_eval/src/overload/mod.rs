//! Host operator overloading.
//!
//! When an operator sees a host-wrapped operand, it asks the
//! [`OverloadResolver`] for a method declared for that operator on the
//! operand types. Resolutions, including "no overload", are cached per
//! `(symbol, left type, right type)` for the life of the resolver. One
//! resolver is normally shared (`Arc`) by every interpreter in the process.

mod catalog;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use ecma_ir::BinaryOp;
use ecma_value::{EvalResult, Value};
use rustc_hash::FxBuildHasher;

pub use catalog::{
    HostCatalog, HostCatalogBuilder, OperandType, OverloadFn, OverloadMethod, ParamType,
};

/// Method name an overload is declared under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverloadSymbol {
    Addition,
    Subtraction,
    Multiply,
    Division,
    Modulus,
    Exponentiation,
    BitwiseAnd,
    BitwiseOr,
    ExclusiveOr,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Equality,
    Inequality,
}

impl OverloadSymbol {
    pub const fn method_name(self) -> &'static str {
        match self {
            Self::Addition => "op_Addition",
            Self::Subtraction => "op_Subtraction",
            Self::Multiply => "op_Multiply",
            Self::Division => "op_Division",
            Self::Modulus => "op_Modulus",
            Self::Exponentiation => "op_Exponentiation",
            Self::BitwiseAnd => "op_BitwiseAnd",
            Self::BitwiseOr => "op_BitwiseOr",
            Self::ExclusiveOr => "op_ExclusiveOr",
            Self::LeftShift => "op_LeftShift",
            Self::RightShift => "op_RightShift",
            Self::UnsignedRightShift => "op_UnsignedRightShift",
            Self::LessThan => "op_LessThan",
            Self::GreaterThan => "op_GreaterThan",
            Self::LessThanOrEqual => "op_LessThanOrEqual",
            Self::GreaterThanOrEqual => "op_GreaterThanOrEqual",
            Self::Equality => "op_Equality",
            Self::Inequality => "op_Inequality",
        }
    }

    /// Overload symbol of an operator. `===`, `!==`, `instanceof` and `in`
    /// have none.
    pub const fn for_binary(op: BinaryOp) -> Option<Self> {
        Some(match op {
            BinaryOp::Add => Self::Addition,
            BinaryOp::Sub => Self::Subtraction,
            BinaryOp::Mul => Self::Multiply,
            BinaryOp::Div => Self::Division,
            BinaryOp::Mod => Self::Modulus,
            BinaryOp::Exp => Self::Exponentiation,
            BinaryOp::BitAnd => Self::BitwiseAnd,
            BinaryOp::BitOr => Self::BitwiseOr,
            BinaryOp::BitXor => Self::ExclusiveOr,
            BinaryOp::Shl => Self::LeftShift,
            BinaryOp::Shr => Self::RightShift,
            BinaryOp::UShr => Self::UnsignedRightShift,
            BinaryOp::Lt => Self::LessThan,
            BinaryOp::Gt => Self::GreaterThan,
            BinaryOp::LtEq => Self::LessThanOrEqual,
            BinaryOp::GtEq => Self::GreaterThanOrEqual,
            BinaryOp::Eq => Self::Equality,
            BinaryOp::NotEq => Self::Inequality,
            BinaryOp::StrictEq | BinaryOp::StrictNotEq | BinaryOp::InstanceOf | BinaryOp::In => {
                return None
            }
        })
    }
}

impl fmt::Display for OverloadSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// Cache key: operator symbol and the runtime types of both operands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OverloadKey {
    pub symbol: OverloadSymbol,
    pub left: OperandType,
    pub right: OperandType,
}

/// Resolves overloads against a frozen catalog and memoizes the result.
///
/// Safe to share across threads. Two threads missing on the same key may
/// both resolve it; the first insert is kept and the other result dropped.
/// Resolution reads only the catalog, so the duplicate work is invisible.
pub struct OverloadResolver {
    catalog: HostCatalog,
    cache: DashMap<OverloadKey, Option<Arc<OverloadMethod>>, FxBuildHasher>,
    resolutions: AtomicUsize,
    dispatches: AtomicUsize,
}

impl OverloadResolver {
    pub fn new(catalog: HostCatalog) -> Self {
        OverloadResolver {
            catalog,
            cache: DashMap::with_hasher(FxBuildHasher),
            resolutions: AtomicUsize::new(0),
            dispatches: AtomicUsize::new(0),
        }
    }

    /// Wrap in an `Arc` for sharing with interpreters.
    pub fn shared(catalog: HostCatalog) -> Arc<Self> {
        Arc::new(Self::new(catalog))
    }

    pub fn catalog(&self) -> &HostCatalog {
        &self.catalog
    }

    /// Find the overload for `symbol` on these operands, if any.
    ///
    /// Returns `None` without touching the cache unless at least one operand
    /// is host-wrapped and both have a host view.
    pub fn lookup(
        &self,
        symbol: OverloadSymbol,
        left: &Value,
        right: &Value,
    ) -> Option<Arc<OverloadMethod>> {
        if !left.is_host_wrapped() && !right.is_host_wrapped() {
            return None;
        }
        let key = OverloadKey {
            symbol,
            left: OperandType::of(left)?,
            right: OperandType::of(right)?,
        };

        if let Some(hit) = self.cache.get(&key) {
            return hit.value().clone();
        }

        self.resolutions.fetch_add(1, Ordering::Relaxed);
        let resolved = self.catalog.best_match(symbol, key.left, key.right);
        tracing::debug!(
            symbol = symbol.method_name(),
            left = ?key.left,
            right = ?key.right,
            found = resolved.is_some(),
            "resolved operator overload"
        );
        self.cache.entry(key).or_insert(resolved).value().clone()
    }

    /// Run the overload for `symbol` if one applies.
    ///
    /// `None` means the caller continues with the built-in algorithm.
    pub fn try_dispatch(
        &self,
        symbol: OverloadSymbol,
        left: &Value,
        right: &Value,
    ) -> Option<EvalResult> {
        let method = self.lookup(symbol, left, right)?;
        self.dispatches.fetch_add(1, Ordering::Relaxed);
        Some(method.invoke(left, right))
    }

    /// Number of cache misses that ran resolution.
    pub fn resolution_count(&self) -> usize {
        self.resolutions.load(Ordering::Relaxed)
    }

    /// Number of operator evaluations handled by an overload.
    pub fn dispatch_count(&self) -> usize {
        self.dispatches.load(Ordering::Relaxed)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

impl fmt::Debug for OverloadResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverloadResolver")
            .field("catalog", &self.catalog)
            .field("cached", &self.cache.len())
            .field("resolutions", &self.resolution_count())
            .finish()
    }
}

#[cfg(test)]
mod tests;
