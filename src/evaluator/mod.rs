//! Evaluation of analyzed programs.
//!
//! Piecewise guards and ternaries are lazy, `and`/`or` are not. `head` and `tail`
//! are dispatched natively by name.

pub mod builtins;
pub mod equality;
pub mod evaluator;
pub mod value;
