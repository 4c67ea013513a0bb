use std::{fmt::Display, mem};

/// A static type.
///
/// `Unresolved` doubles as the "not yet checked" marker on function symbols and as
/// the bottom element type of an empty list literal. The derived `PartialEq` is exact
/// (parameter names included); the checker uses [`Type::structurally_equals`] and
/// [`Type::same_kind`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Boolean,
    Real,
    Integer,
    String,
    List(Box<Type>),
    Function(FunctionType),
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub parameters: Vec<Parameter>,
    pub output: Box<Type>,
}

/// A formal parameter. Types written as `(real) -> real` carry empty names.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
}

impl FunctionType {
    pub fn new(parameters: Vec<Parameter>, output: Type) -> Self {
        FunctionType {
            parameters,
            output: Box::new(output),
        }
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl Type {
    pub fn list(element: Type) -> Self {
        Type::List(Box::new(element))
    }

    pub fn function(parameters: Vec<Parameter>, output: Type) -> Self {
        Type::Function(FunctionType::new(parameters, output))
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Type::Unresolved)
    }

    pub fn element(&self) -> Option<&Type> {
        match self {
            Type::List(element) => Some(element),
            _ => None,
        }
    }

    /// Outer-tag comparison only. Used for call arguments and `==` operands, so a
    /// `[real]` parameter accepts any list and `(real) -> bool` accepts any function.
    pub fn same_kind(&self, other: &Type) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    /// Full recursive comparison. An unresolved list element is bottom and matches
    /// any element type; parameter names are ignored.
    pub fn structurally_equals(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::List(left), Type::List(right)) => {
                !left.is_resolved() || !right.is_resolved() || left.structurally_equals(right)
            }
            (Type::Function(left), Type::Function(right)) => {
                left.arity() == right.arity()
                    && left
                        .parameters
                        .iter()
                        .zip(right.parameters.iter())
                        .all(|(l, r)| l.ty.structurally_equals(&r.ty))
                    && left.output.structurally_equals(&right.output)
            }
            _ => self.same_kind(other),
        }
    }

    /// The common type of two structurally equal types, keeping whichever side is
    /// more resolved at each list element, so `[?]` and `[real]` join to `[real]`.
    /// `None` when they disagree.
    pub fn join(&self, other: &Type) -> Option<Type> {
        match (self, other) {
            (Type::List(left), Type::List(right)) => match (left.is_resolved(), right.is_resolved()) {
                (false, _) => Some(other.clone()),
                (_, false) => Some(self.clone()),
                _ => left.join(right).map(Type::list),
            },
            _ if self.structurally_equals(other) => Some(self.clone()),
            _ => None,
        }
    }

    /// Result type of concatenating two lists, or `None` when either side is not a
    /// list or the element types disagree. Bottom adopts the other side's element.
    pub fn unify_lists(&self, other: &Type) -> Option<Type> {
        self.element()?;
        other.element()?;
        self.join(other)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Boolean => write!(f, "bool"),
            Type::Real => write!(f, "real"),
            Type::Integer => write!(f, "int"),
            Type::String => write!(f, "string"),
            Type::List(element) => write!(f, "[{}]", element),
            Type::Function(function) => {
                write!(f, "(")?;
                for (i, parameter) in function.parameters.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", parameter.ty)?;
                }
                write!(f, ") -> {}", function.output)
            }
            Type::Unresolved => write!(f, "?"),
        }
    }
}
