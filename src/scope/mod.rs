//! Name resolution shared by the checker and the evaluator.
//!
//! A [`scope::ScopeStack`] owns every scope; passes borrow it mutably and thread it
//! through their recursion instead of keeping any global state.

pub mod scope;
pub mod symbol;
