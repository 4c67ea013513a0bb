//! Type annotations as written in source.
//!
//! Annotations are syntax; [`TypeAnnotation::to_type`] lowers them into the
//! static [`Type`] model used by the checker and the evaluator.

use crate::{
    types::types::{Parameter, Type},
    Span,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Bool,
    Real,
    Int,
    String,
}

impl PrimitiveType {
    pub fn from_name(name: &str) -> Option<PrimitiveType> {
        match name {
            "bool" => Some(PrimitiveType::Bool),
            "real" => Some(PrimitiveType::Real),
            "int" => Some(PrimitiveType::Int),
            "string" => Some(PrimitiveType::String),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum TypeAnnotation {
    Primitive(PrimitiveType, Span),
    /// `[T]`
    List(Box<TypeAnnotation>, Span),
    /// `(T1, T2) -> T`
    Function {
        inputs: Vec<TypeAnnotation>,
        output: Box<TypeAnnotation>,
        span: Span,
    },
}

impl TypeAnnotation {
    pub fn span(&self) -> &Span {
        match self {
            TypeAnnotation::Primitive(_, span) | TypeAnnotation::List(_, span) => span,
            TypeAnnotation::Function { span, .. } => span,
        }
    }

    pub fn to_type(&self) -> Type {
        match self {
            TypeAnnotation::Primitive(PrimitiveType::Bool, _) => Type::Boolean,
            TypeAnnotation::Primitive(PrimitiveType::Real, _) => Type::Real,
            TypeAnnotation::Primitive(PrimitiveType::Int, _) => Type::Integer,
            TypeAnnotation::Primitive(PrimitiveType::String, _) => Type::String,
            TypeAnnotation::List(element, _) => Type::list(element.to_type()),
            TypeAnnotation::Function { inputs, output, .. } => Type::function(
                inputs
                    .iter()
                    .map(|input| Parameter {
                        name: String::new(),
                        ty: input.to_type(),
                    })
                    .collect(),
                output.to_type(),
            ),
        }
    }
}
