use std::{fmt::Display, rc::Rc};

use crate::{ast::declarations::FnDecl, types::types::Type};

/// A runtime value. Every number is a `Real`; there is no integer value.
#[derive(Debug, Clone)]
pub enum Value {
    Boolean(bool),
    Real(f64),
    String(String),
    /// Lists are immutable and shared; `tail` of an empty list returns the same allocation.
    List(Rc<Vec<Value>>),
    Function(Rc<FnDecl>),
    /// A static type standing in for an identifier argument with nothing bound at runtime.
    Type(Type),
}

impl Value {
    pub fn list(elements: Vec<Value>) -> Self {
        Value::List(Rc::new(elements))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "bool",
            Value::Real(_) => "real",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Type(_) => "type",
        }
    }
}

/// Deep comparison for host code and tests. The language's `==` has its own rules,
/// see [`crate::evaluator::equality`].
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(left), Value::Boolean(right)) => left == right,
            (Value::Real(left), Value::Real(right)) => left == right,
            (Value::String(left), Value::String(right)) => left == right,
            (Value::List(left), Value::List(right)) => left == right,
            (Value::Function(left), Value::Function(right)) => Rc::ptr_eq(left, right),
            (Value::Type(left), Value::Type(right)) => left == right,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Real(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value),
            Value::List(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Value::Function(declaration) => write!(f, "<fn {}>", declaration.name),
            Value::Type(ty) => write!(f, "<type {}>", ty),
        }
    }
}
