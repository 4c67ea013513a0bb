//! The static type model.
//!
//! Types are structural: two types are the same when they have the same shape.
//! Three comparisons are offered, matching the three places the checker compares
//! types (outer tag only, full structure, and list concatenation).

pub mod types;
