//! The `==` operator.
//!
//! Values of different kinds are never equal. Scalars compare by value. Lists must
//! have the same length and pairwise equal elements; with
//! [`ListEquality::IdentityChecked`] a nested list element additionally has to be
//! the very same allocation as its counterpart, so `[[1]] == [[1]]` is false while
//! comparing a list against itself is true. A NaN list element equals another NaN,
//! although `NaN == NaN` on bare reals is false.

use std::rc::Rc;

use crate::{
    config::ListEquality,
    errors::{errors::Error, errors::ErrorImpl},
    Position,
};

use super::value::Value;

pub fn values_equal(
    left: &Value,
    right: &Value,
    mode: ListEquality,
    position: &Position,
) -> Result<bool, Error> {
    match (left, right) {
        (Value::List(left), Value::List(right)) => Ok(lists_equal(left, right, mode)),
        (Value::Function(_), Value::Function(_)) | (Value::Type(_), Value::Type(_)) => {
            Err(Error::new(
                ErrorImpl::UnsupportedEquality {
                    kind: left.kind_name().to_string(),
                },
                position.clone(),
            ))
        }
        _ => Ok(scalars_equal(left, right)),
    }
}

fn lists_equal(left: &Rc<Vec<Value>>, right: &Rc<Vec<Value>>, mode: ListEquality) -> bool {
    if left.len() != right.len() {
        return false;
    }

    left.iter().zip(right.iter()).all(|pair| match pair {
        (Value::List(l), Value::List(r)) => {
            lists_equal(l, r, mode) && (mode == ListEquality::Structural || Rc::ptr_eq(l, r))
        }
        (Value::Function(l), Value::Function(r)) => Rc::ptr_eq(l, r),
        (Value::Type(l), Value::Type(r)) => l == r,
        (Value::Real(l), Value::Real(r)) => l == r || (l.is_nan() && r.is_nan()),
        (l, r) => scalars_equal(l, r),
    })
}

fn scalars_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Boolean(l), Value::Boolean(r)) => l == r,
        (Value::Real(l), Value::Real(r)) => l == r,
        (Value::String(l), Value::String(r)) => l == r,
        _ => false,
    }
}
