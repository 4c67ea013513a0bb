//! Source text to value: lex, parse, declare, analyze, evaluate.

use std::rc::Rc;

use tracing::{debug, info};

use crate::{
    ast::ast::Program,
    config::Config,
    declarator::declarator::declare_globals,
    errors::errors::{Error, ErrorImpl},
    evaluator::{evaluator::evaluate, value::Value},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub const PRELUDE: &str = include_str!("../std/prelude.df");
pub const PRELUDE_FILE: &str = "<prelude>";

pub fn parse_source(source: &str, file: &str) -> Result<Program, Error> {
    let tokens = tokenize(source, Some(file.to_string()))?;
    debug!(file, tokens = tokens.len(), "tokenized");
    parse(tokens, Rc::new(file.to_string()))
}

/// Parses each `(file name, text)` pair and concatenates the declarations in order.
pub fn parse_sources(sources: &[(String, String)]) -> Result<Program, Error> {
    let mut parsed = sources
        .iter()
        .map(|(file, source)| parse_source(source, file));

    let mut program = match parsed.next() {
        Some(program) => program?,
        None => return parse_source("", PRELUDE_FILE),
    };
    for next in parsed {
        program.extend(next?);
    }

    Ok(program)
}

/// The `(file name, text)` list for one source, preceded by the prelude when enabled.
pub fn with_prelude(source: &str, file: &str, config: &Config) -> Vec<(String, String)> {
    let mut sources = vec![];
    if config.prelude {
        sources.push((PRELUDE_FILE.to_string(), PRELUDE.to_string()));
    }
    sources.push((file.to_string(), source.to_string()));
    sources
}

/// Declares, analyzes and evaluates a parsed program, starting at `config.entry`.
#[tracing::instrument(level = "debug", skip_all, fields(entry = %config.entry))]
pub fn run_program(program: &Program, config: &Config) -> Result<Value, Error> {
    let mut scopes = declare_globals(program)?;

    type_check(program, &mut scopes)?;
    info!(functions = scopes.global().len(), "type checked");

    let entry = scopes
        .global()
        .get(&config.entry)
        .and_then(|symbol| symbol.declaration.clone())
        .ok_or_else(|| {
            Error::without_position(ErrorImpl::MissingEntryFunction {
                name: config.entry.clone(),
            })
        })?;

    evaluate(&entry, &mut scopes, config.list_equality)
}

pub fn run_source(source: &str, file: &str, config: &Config) -> Result<Value, Error> {
    let program = parse_sources(&with_prelude(source, file, config))?;
    run_program(&program, config)
}
