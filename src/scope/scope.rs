use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::symbol::Symbol;

/// A single level of the scope stack.
///
/// Symbols are kept in insertion order; the checker and the evaluator both read a
/// call frame back in that order to line parameters up with arguments.
#[derive(Debug, Default, Clone)]
pub struct Scope {
    symbols: Vec<Symbol>,
    lookup: HashMap<String, usize>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn declare(&mut self, symbol: Symbol, position: &Position) -> Result<(), Error> {
        if self.lookup.contains_key(&symbol.name) {
            return Err(Error::new(
                ErrorImpl::DuplicateIdentifier {
                    identifier: symbol.name,
                },
                position.clone(),
            ));
        }

        self.lookup.insert(symbol.name.clone(), self.symbols.len());
        self.symbols.push(symbol);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.lookup.get(name).map(|&index| &self.symbols[index])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.lookup.get(name).map(|&index| &mut self.symbols[index])
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn symbols_mut(&mut self) -> impl Iterator<Item = &mut Symbol> {
        self.symbols.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Local scopes set aside while a function frame is active.
#[must_use = "suspended scopes must be handed back to `leave_frame`"]
#[derive(Debug)]
pub struct SuspendedScopes(Vec<Scope>);

/// The scope stack. Index 0 is the global scope and is never popped.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        ScopeStack::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![Scope::new()],
        }
    }

    pub fn global(&self) -> &Scope {
        &self.scopes[0]
    }

    pub fn global_mut(&mut self) -> &mut Scope {
        &mut self.scopes[0]
    }

    pub fn current(&self) -> &Scope {
        &self.scopes[self.scopes.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn push(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Declares into the innermost scope only.
    pub fn declare(&mut self, symbol: Symbol, position: &Position) -> Result<(), Error> {
        self.current_mut().declare(symbol, position)
    }

    /// Searches innermost to outermost.
    pub fn resolve(&self, name: &str, position: &Position) -> Result<&Symbol, Error> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnknownIdentifier {
                        identifier: name.to_string(),
                    },
                    position.clone(),
                )
            })
    }

    /// Opens a function frame layered directly on the global scope. Whatever local
    /// scopes were active (the caller's) are hidden until `leave_frame`.
    pub fn enter_frame(&mut self) -> SuspendedScopes {
        let locals = self.scopes.split_off(1);
        self.push();
        SuspendedScopes(locals)
    }

    /// Drops the frame (and anything pushed above it) and restores the caller's scopes.
    pub fn leave_frame(&mut self, suspended: SuspendedScopes) {
        self.scopes.truncate(1);
        self.scopes.extend(suspended.0);
    }
}
