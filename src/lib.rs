#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod config;
pub mod declarator;
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod pipeline;
pub mod scope;
pub mod type_checker;
pub mod types;

extern crate regex;

/// A 1-based line and column in a named source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    let index = (line as usize).checked_sub(1)?;
    source.lines().nth(index)
}

/// Renders a diagnostic with the offending line and a caret under the column.
///
/// `sources` pairs each file name with its text; the file is looked up by the
/// error position's file name.
pub fn display_error(error: &Error, sources: &[(String, String)]) -> String {
    /*
        Error: TypeMismatch (tip)
        types in expression are mismatched: ...
        -> main.df:20:9
           |
        20 | fn f() -> real = true;
           | ----------------^
    */

    let mut output = match error.get_tip() {
        ErrorTip::None => format!("Error: {}\n", error.get_error_name()),
        tip => format!("Error: {} ({})\n", error.get_error_name(), tip),
    };
    output.push_str(&format!("{}\n", error.kind()));

    let Some(position) = error.get_position() else {
        return output;
    };
    output.push_str(&format!(
        "-> {}:{}:{}\n",
        position.file, position.line, position.column
    ));

    let line_text = sources
        .iter()
        .find(|(name, _)| name.as_str() == position.file.as_str())
        .and_then(|(_, source)| get_line_at_position(source, position.line));
    let Some(line_text) = line_text else {
        return output;
    };

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = (position.column as usize).saturating_sub(removed_whitespace).max(1);
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}
