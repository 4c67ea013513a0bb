//! Error types and error handling for the interpreter.
//!
//! This module defines the error types used by every phase. It includes:
//!
//! - Error structures with optional source position information
//! - Variants for lexing, parsing, analysis and evaluation failures
//! - Error formatting and suggestion tips for the CLI

pub mod errors;

#[cfg(test)]
mod tests;
