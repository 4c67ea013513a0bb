//! Static analysis.
//!
//! Runs after the declaration pass has filled the global scope. Function
//! signatures are resolved on demand and memoized on their global symbols, so
//! mutually recursive functions need no forward declarations. The checker:
//!
//! - Infers a type for every expression
//! - Checks each body against its declared return type
//! - Checks call arity and (shallowly) argument types
//! - Requires piecewise and ternary branches to agree
//!
//! The first violation aborts analysis.

pub mod type_checker;

#[cfg(test)]
mod tests;
