//! Assignable locations.
//!
//! A [`Reference`] names a storage slot resolved but not yet read: a binding
//! in a particular scope, a name no scope declares, or a property of a base
//! value. References live in a per-interpreter [`ReferencePool`] and are
//! addressed by [`RefId`]; a slot is handed out for one read/write cycle and
//! then released back to the pool's free list.

use ecma_ir::Name;
use ecma_value::{JsStr, Value};

use crate::environment::{LocalScope, Scope};

/// A resolved storage location.
#[derive(Clone, Debug)]
pub enum Reference {
    /// A binding declared in `scope`.
    Binding {
        name: Name,
        scope: LocalScope<Scope>,
    },
    /// A name no scope declares.
    Unresolvable { name: Name },
    /// `base[key]`. `base` may be a primitive; writes to it are dropped or
    /// rejected depending on mode.
    Property { base: Value, key: JsStr },
}

impl Reference {
    pub fn is_unresolvable(&self) -> bool {
        matches!(self, Reference::Unresolvable { .. })
    }
}

/// Handle to a pooled reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RefId(u32);

impl RefId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Free-list pool of reference slots.
///
/// Slots are reused after release, so a steady stream of assignments
/// allocates only up to the deepest nesting of live references.
#[derive(Debug, Default)]
pub struct ReferencePool {
    slots: Vec<Option<Reference>>,
    free: Vec<u32>,
}

impl ReferencePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `reference` in a free slot.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` references are live at once.
    pub fn acquire(&mut self, reference: Reference) -> RefId {
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(reference);
            return RefId(index);
        }
        let index = u32::try_from(self.slots.len())
            .unwrap_or_else(|_| panic!("reference pool exceeded u32::MAX live references"));
        self.slots.push(Some(reference));
        RefId(index)
    }

    /// The reference in a live slot.
    #[inline]
    pub fn get(&self, id: RefId) -> Option<&Reference> {
        self.slots.get(id.index())?.as_ref()
    }

    /// Return a slot to the pool. Releasing twice is a no-op.
    pub fn release(&mut self, id: RefId) -> Option<Reference> {
        let reference = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id.0);
        Some(reference)
    }

    /// Number of slots currently handed out.
    pub fn in_use(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Number of slots ever allocated.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
