use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::Error,
    scope::{scope::ScopeStack, symbol::Symbol},
};

/// Registers every top-level function in a fresh global scope.
///
/// Each symbol starts out `Unresolved`; its type is filled in lazily by the checker.
/// A name declared twice fails with `DuplicateIdentifier` before any checking runs.
#[tracing::instrument(level = "debug", skip_all, fields(count = program.declarations.len()))]
pub fn declare_globals(program: &Program) -> Result<ScopeStack, Error> {
    let mut scopes = ScopeStack::new();

    for declaration in &program.declarations {
        scopes
            .global_mut()
            .declare(Symbol::function(Rc::clone(declaration)), &declaration.span.start)?;
        debug!(function = %declaration.name, "declared global");
    }

    debug!("global symbol table created");
    Ok(scopes)
}
