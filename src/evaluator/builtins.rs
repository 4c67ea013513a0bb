use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::value::Value;

/// List primitives run natively. A call to a function with one of these names
/// never evaluates the declared body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Head,
    Tail,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Builtin> {
        match name {
            "head" => Some(Builtin::Head),
            "tail" => Some(Builtin::Tail),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Head => "head",
            Builtin::Tail => "tail",
        }
    }

    pub fn apply(self, arguments: &[Value], position: &Position) -> Result<Value, Error> {
        let list = match arguments.first() {
            Some(Value::List(list)) => list,
            other => {
                return Err(Error::new(
                    ErrorImpl::RuntimeTypeFault {
                        expected: String::from("list"),
                        found: other.map_or("nothing", Value::kind_name).to_string(),
                    },
                    position.clone(),
                ))
            }
        };

        match self {
            Builtin::Head => list.first().cloned().ok_or_else(|| {
                Error::new(
                    ErrorImpl::EmptyList {
                        function: self.name().to_string(),
                    },
                    position.clone(),
                )
            }),
            Builtin::Tail if list.is_empty() => Ok(Value::List(Rc::clone(list))),
            Builtin::Tail => Ok(Value::list(list[1..].to_vec())),
        }
    }
}
