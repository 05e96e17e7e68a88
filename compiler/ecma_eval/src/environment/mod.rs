//! Variable bindings.
//!
//! A stack of lexical scopes over a global scope. Each interpreter owns its
//! environment; scopes are `Rc<RefCell<_>>` and never cross threads.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use ecma_ir::Name;
use ecma_value::Value;

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `let` / `var`
    Mutable,
    /// `const`
    Immutable,
    /// Non-writable global such as `undefined`. Writes are dropped in sloppy
    /// mode and rejected in strict mode.
    ReadOnly,
}

/// Why a write to a binding failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The binding is `const`.
    Immutable,
    /// The binding is a non-writable global.
    ReadOnly,
    /// No scope declares the name.
    Undefined,
}

/// Shared handle to a scope.
///
/// `#[repr(transparent)]` over `Rc<RefCell<T>>`; all scope allocations go
/// through [`LocalScope::new`].
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// One lexical scope.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Binding>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.bindings.insert(name, Binding { value, mutability });
    }

    /// Whether this scope itself declares `name`.
    #[inline]
    pub fn declares(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Value of a binding declared in this scope, ignoring parents.
    #[inline]
    pub fn get_own(&self, name: Name) -> Option<Value> {
        self.bindings.get(&name).map(|b| b.value.clone())
    }

    pub fn mutability(&self, name: Name) -> Option<Mutability> {
        self.bindings.get(&name).map(|b| b.mutability)
    }

    /// Write a binding declared in this scope, ignoring parents.
    pub fn set_own(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        let binding = self.bindings.get_mut(&name).ok_or(AssignError::Undefined)?;
        match binding.mutability {
            Mutability::Mutable => {
                binding.value = value;
                Ok(())
            }
            Mutability::Immutable => Err(AssignError::Immutable),
            Mutability::ReadOnly => Err(AssignError::ReadOnly),
        }
    }

    /// Look up through the scope chain.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(binding) = self.bindings.get(&name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Assign through the scope chain.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        if self.declares(name) {
            return self.set_own(name, value);
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }
}

/// Scope stack for one interpreter.
pub struct Environment {
    scopes: Vec<LocalScope<Scope>>,
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the innermost scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    fn current_scope(&self) -> LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global).clone()
    }

    pub fn global(&self) -> &LocalScope<Scope> {
        &self.global
    }

    /// Define a binding in the innermost scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .define(name, value, mutability);
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow()
            .lookup(name)
    }

    #[inline]
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .assign(name, value)
    }

    /// The scope that declares `name`, searching from the innermost.
    pub fn resolve(&self, name: Name) -> Option<LocalScope<Scope>> {
        self.scopes
            .iter()
            .rev()
            .find(|scope| scope.borrow().declares(name))
            .cloned()
    }

    /// Assign to an existing binding, or create a mutable global.
    pub fn define_or_assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        match self.resolve(name) {
            Some(scope) => scope.borrow_mut().set_own(name, value),
            None => {
                self.global
                    .borrow_mut()
                    .define(name, value, Mutability::Mutable);
                Ok(())
            }
        }
    }

    /// Define a global binding.
    pub fn define_global(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.global.borrow_mut().define(name, value, mutability);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
