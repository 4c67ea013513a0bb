use std::rc::Rc;

use crate::Span;

use super::declarations::FnDecl;

/// Program
///
/// The flat list of top-level function declarations, in source order. Declarations
/// are reference counted so symbols and runtime function values can point at them
/// without cloning bodies.
#[derive(Debug, Clone)]
pub struct Program {
    pub declarations: Vec<Rc<FnDecl>>,
    pub span: Span,
}

impl Program {
    pub fn new(declarations: Vec<FnDecl>, span: Span) -> Self {
        Program {
            declarations: declarations.into_iter().map(Rc::new).collect(),
            span,
        }
    }

    /// First declaration with the given name, in source order.
    pub fn find_function(&self, name: &str) -> Option<&Rc<FnDecl>> {
        self.declarations.iter().find(|decl| decl.name == name)
    }

    /// Appends another program's declarations after this one's, the way source
    /// files are concatenated before parsing.
    pub fn extend(&mut self, other: Program) {
        self.declarations.extend(other.declarations);
        self.span.end = other.span.end;
    }
}
