//! Lexical analysis module.
//!
//! Converts source text into a stream of tokens for the parser:
//!
//! - Tokenization using an ordered table of anchored regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - Line/column tracking for diagnostics
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
