//! Evaluation of non-operator nodes: member access and calls.
//!
//! Operator and assignment nodes need these to produce their operands and
//! to address property targets.

mod call;
mod member;

pub use member::{get_property, put_property};
