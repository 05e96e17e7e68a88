use smallvec::SmallVec;

use ecma_value::{not_a_function, EvalResult, Value};

use crate::interpreter::Interpreter;
use crate::node::{CallNode, Node};

/// Arguments are evaluated into a small inline buffer.
type Args = SmallVec<[Value; 4]>;

impl Interpreter<'_> {
    /// `callee(args...)`. A member callee supplies `this`.
    pub(crate) fn eval_call(&mut self, call: &CallNode) -> EvalResult {
        let (this, callee) = match &call.callee {
            Node::Member(member) => {
                let (base, key) = self.eval_member_parts(member)?;
                let callee = super::get_property(&base, &key).map_err(|e| e.with_span(member.span))?;
                (base, callee)
            }
            other => (Value::Undefined, self.evaluate(other)?),
        };

        let args = call
            .args
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<Args, _>>()?;

        match &callee {
            Value::Object(obj) if obj.is_callable() => obj
                .call(&this, &args)
                .map_err(|e| e.with_span(call.span)),
            _ => Err(not_a_function(&callee).with_span(call.span)),
        }
    }
}
