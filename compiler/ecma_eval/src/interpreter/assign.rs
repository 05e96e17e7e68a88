//! Assignment evaluation.
//!
//! Plain `name = value` writes the binding directly. Every other target
//! goes through a pooled [`Reference`] held by a [`ReferenceScope`] for the
//! duration of one read-modify-write cycle.
//!
//! A compound assignment reads the target before it evaluates the
//! right-hand side and writes only after the operator succeeds, so an
//! error anywhere leaves the target unchanged.

use ecma_ir::{AssignOp, Name};
use ecma_value::{
    assignment_to_constant, invalid_assignment_target, read_only_binding,
    reserved_assignment_target, unresolvable_reference, EvalError, EvalResult, Value,
};

use super::{Interpreter, ReferenceScope};
use crate::coerce::to_boolean;
use crate::environment::AssignError;
use crate::exec::{get_property, put_property};
use crate::node::{AssignNode, AssignTarget, Node, PatternNode};
use crate::operators::evaluator_for;
use crate::reference::{RefId, Reference};

impl<'a> Interpreter<'a> {
    /// Evaluate an assignment node. The result is the value written, or the
    /// current value when a logical assignment short-circuits.
    #[tracing::instrument(level = "trace", skip_all, fields(op = %node.op))]
    pub fn evaluate_assignment(&mut self, node: &AssignNode) -> EvalResult {
        let result = match &node.target {
            AssignTarget::Identifier(name) if node.op == AssignOp::Assign => {
                self.assign_identifier(*name, &node.value)
            }
            AssignTarget::Identifier(name) => {
                self.check_reserved(*name)?;
                let reference = self.identifier_reference(*name);
                self.acquire_reference(reference)
                    .apply(node.op, &node.value)
            }
            AssignTarget::Member(member) => {
                let (base, key) = self.eval_member_parts(member)?;
                self.acquire_reference(Reference::Property { base, key })
                    .apply(node.op, &node.value)
            }
            AssignTarget::Pattern(pattern) => {
                let value = self.evaluate(&node.value)?;
                self.assign_pattern(pattern, value.clone())?;
                Ok(value)
            }
            AssignTarget::Invalid(target) => {
                self.evaluate(target)?;
                Err(invalid_assignment_target())
            }
        };
        result.map_err(|err| err.with_span(node.span))
    }

    /// `name = value` without going through the reference pool.
    fn assign_identifier(&mut self, name: Name, value: &Node) -> EvalResult {
        self.check_reserved(name)?;
        let scope = self.env.resolve(name);
        let result = self.evaluate(value)?;
        if value.is_anonymous_function() {
            if let Value::Object(obj) = &result {
                obj.set_function_name(self.interner.lookup(name));
            }
        }
        match scope {
            Some(scope) => {
                let written = scope.borrow_mut().set_own(name, result.clone());
                self.binding_written(written, name)?;
            }
            None if self.strict => {
                return Err(unresolvable_reference(self.interner.lookup(name)));
            }
            None => {
                let written = self.env.define_or_assign(name, result.clone());
                self.binding_written(written, name)?;
            }
        }
        Ok(result)
    }

    fn check_reserved(&self, name: Name) -> Result<(), EvalError> {
        if self.strict && self.reserved.contains(name) {
            return Err(reserved_assignment_target(self.interner.lookup(name)));
        }
        Ok(())
    }

    fn identifier_reference(&self, name: Name) -> Reference {
        match self.env.resolve(name) {
            Some(scope) => Reference::Binding { name, scope },
            None => Reference::Unresolvable { name },
        }
    }

    /// Map the outcome of a binding write. Writes to read-only bindings are
    /// dropped outside strict mode.
    fn binding_written(
        &self,
        written: Result<(), AssignError>,
        name: Name,
    ) -> Result<(), EvalError> {
        let text = self.interner.lookup(name);
        match written {
            Ok(()) => Ok(()),
            Err(AssignError::ReadOnly) if !self.strict => Ok(()),
            Err(AssignError::ReadOnly) => Err(read_only_binding(text)),
            Err(AssignError::Immutable) => Err(assignment_to_constant(text)),
            Err(AssignError::Undefined) => Err(unresolvable_reference(text)),
        }
    }

    fn pooled(&self, id: RefId) -> Result<Reference, EvalError> {
        self.references
            .get(id)
            .cloned()
            .ok_or_else(invalid_assignment_target)
    }

    /// Read through a pooled reference.
    pub fn get_value(&self, id: RefId) -> EvalResult {
        match self.pooled(id)? {
            Reference::Binding { name, scope } => scope
                .borrow()
                .get_own(name)
                .ok_or_else(|| unresolvable_reference(self.interner.lookup(name))),
            Reference::Unresolvable { name } => {
                Err(unresolvable_reference(self.interner.lookup(name)))
            }
            Reference::Property { base, key } => get_property(&base, &key),
        }
    }

    /// Write through a pooled reference.
    pub fn put_value(&mut self, id: RefId, value: Value) -> Result<(), EvalError> {
        match self.pooled(id)? {
            Reference::Binding { name, scope } => {
                let written = scope.borrow_mut().set_own(name, value);
                self.binding_written(written, name)
            }
            Reference::Unresolvable { name } if self.strict => {
                Err(unresolvable_reference(self.interner.lookup(name)))
            }
            Reference::Unresolvable { name } => {
                let written = self.env.define_or_assign(name, value);
                self.binding_written(written, name)
            }
            Reference::Property { base, key } => put_property(&base, &key, value, self.strict),
        }
    }

    /// Write `value` to a destructuring element target.
    pub fn assign_to_target(&mut self, target: &AssignTarget, value: Value) -> Result<(), EvalError> {
        match target {
            AssignTarget::Identifier(name) => {
                self.check_reserved(*name)?;
                let reference = self.identifier_reference(*name);
                let mut scope = self.acquire_reference(reference);
                let id = scope.id();
                scope.put_value(id, value)
            }
            AssignTarget::Member(member) => {
                let (base, key) = self.eval_member_parts(member)?;
                put_property(&base, &key, value, self.strict)
                    .map_err(|err| err.with_span(member.span))
            }
            AssignTarget::Pattern(pattern) => self.assign_pattern(pattern, value),
            AssignTarget::Invalid(target) => {
                self.evaluate(target)?;
                Err(invalid_assignment_target())
            }
        }
    }

    /// Hand a pattern to the destructuring collaborator.
    pub fn assign_pattern(&mut self, pattern: &PatternNode, value: Value) -> Result<(), EvalError> {
        let assigner = self.destructuring.clone();
        assigner.assign_pattern(self, pattern, value)
    }
}

impl ReferenceScope<'_, '_> {
    /// Apply `op` to the guarded reference with `rhs` as the right operand.
    fn apply(&mut self, op: AssignOp, rhs: &Node) -> EvalResult {
        let id = self.id();
        match op {
            AssignOp::Assign => {
                let value = self.evaluate(rhs)?;
                self.put_value(id, value.clone())?;
                Ok(value)
            }
            AssignOp::AndAssign | AssignOp::OrAssign | AssignOp::NullishAssign => {
                let current = self.get_value(id)?;
                let keep = match op {
                    AssignOp::AndAssign => !to_boolean(&current),
                    AssignOp::OrAssign => to_boolean(&current),
                    _ => !current.is_nullish(),
                };
                if keep {
                    return Ok(current);
                }
                let value = self.evaluate(rhs)?;
                self.put_value(id, value.clone())?;
                Ok(value)
            }
            compound => {
                let Some(bop) = compound.binary_op() else {
                    return Err(invalid_assignment_target());
                };
                let current = self.get_value(id)?;
                let value = self.evaluate(rhs)?;
                self.stats.compound_assignments += 1;
                let result = evaluator_for(bop)(self.interop.as_deref(), &current, &value)?;
                self.put_value(id, result.clone())?;
                Ok(result)
            }
        }
    }
}
