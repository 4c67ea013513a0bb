use std::rc::Rc;

use crate::{ast::declarations::FnDecl, evaluator::value::Value, types::types::Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Parameter,
    Function,
}

/// A named entry in a scope.
///
/// `ty` starts as [`Type::Unresolved`] for functions and is written exactly once by
/// the checker. `value` is only ever set on parameter symbols of a call frame.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub kind: SymbolKind,
    pub declaration: Option<Rc<FnDecl>>,
    pub value: Option<Value>,
}

impl Symbol {
    pub fn function(declaration: Rc<FnDecl>) -> Self {
        Symbol {
            name: declaration.name.clone(),
            ty: Type::Unresolved,
            kind: SymbolKind::Function,
            declaration: Some(declaration),
            value: None,
        }
    }

    pub fn parameter(name: String, ty: Type) -> Self {
        Symbol {
            name,
            ty,
            kind: SymbolKind::Parameter,
            declaration: None,
            value: None,
        }
    }
}
