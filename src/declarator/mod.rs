//! Global declaration pass: one walk over the top-level functions before any
//! type checking.

pub mod declarator;
