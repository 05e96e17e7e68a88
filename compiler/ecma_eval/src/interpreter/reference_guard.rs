//! RAII ownership of pooled references.
//!
//! [`ReferenceScope`] holds `&mut Interpreter` plus one [`RefId`] and
//! releases the slot when dropped, on every exit path including `?` and
//! unwinding. It derefs to the interpreter so the reference can be read and
//! written while the guard is alive.

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::reference::{RefId, Reference};

/// Guard that returns a pooled reference on drop.
pub struct ReferenceScope<'guard, 'interp> {
    interpreter: &'guard mut Interpreter<'interp>,
    id: RefId,
}

impl ReferenceScope<'_, '_> {
    /// Handle of the guarded slot.
    #[inline]
    pub fn id(&self) -> RefId {
        self.id
    }

    /// The guarded reference.
    pub fn reference(&self) -> Option<&Reference> {
        self.interpreter.references.get(self.id)
    }
}

impl Drop for ReferenceScope<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.references.release(self.id);
    }
}

impl<'interp> Deref for ReferenceScope<'_, 'interp> {
    type Target = Interpreter<'interp>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ReferenceScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Put `reference` in the pool, returning a guard that releases it.
    pub fn acquire_reference(&mut self, reference: Reference) -> ReferenceScope<'_, 'a> {
        self.stats.references_acquired += 1;
        let id = self.references.acquire(reference);
        ReferenceScope {
            interpreter: self,
            id,
        }
    }
}
