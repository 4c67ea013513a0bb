use crate::Span;

use super::{expressions::Expr, types::TypeAnnotation};

/// Function Declaration
///
/// `fn name(params) -> return_type body`
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub name: String,
    pub parameters: Vec<Param>,
    pub return_type: TypeAnnotation,
    pub body: FunctionBody,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub annotation: TypeAnnotation,
    pub span: Span,
}

/// Function Body
///
/// Either a single expression (`= expr;`) or a piecewise block.
#[derive(Debug, Clone)]
pub enum FunctionBody {
    Inline(Expr),
    Piecewise(PiecewiseBody),
}

impl FunctionBody {
    pub fn span(&self) -> &Span {
        match self {
            FunctionBody::Inline(expr) => &expr.span,
            FunctionBody::Piecewise(piecewise) => &piecewise.span,
        }
    }
}

/// Piecewise Body
///
/// Guarded branches tried in order, followed by the mandatory `else` branch.
#[derive(Debug, Clone)]
pub struct PiecewiseBody {
    pub branches: Vec<PiecewiseBranch>,
    pub otherwise: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct PiecewiseBranch {
    pub guard: Expr,
    pub action: Expr,
    pub span: Span,
}
