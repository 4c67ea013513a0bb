use std::{collections::HashMap, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::{
        declarations::{FnDecl, FunctionBody},
        expressions::{BinaryOp, Expr, ExprKind, UnaryOp},
    },
    config::ListEquality,
    errors::errors::{Error, ErrorImpl},
    scope::{scope::ScopeStack, symbol::Symbol},
};

use super::{builtins::Builtin, equality::values_equal, value::Value};

/// Tree-walking interpreter over an analyzed program.
///
/// Each call opens a frame layered directly on the global scope, binds the
/// argument values to the parameter symbols in order, and evaluates the body.
#[derive(Debug)]
pub struct Evaluator<'a> {
    pub scopes: &'a mut ScopeStack,
    list_equality: ListEquality,
    calls: HashMap<String, usize>,
}

impl<'a> Evaluator<'a> {
    pub fn new(scopes: &'a mut ScopeStack, list_equality: ListEquality) -> Self {
        Evaluator {
            scopes,
            list_equality,
            calls: HashMap::new(),
        }
    }

    /// Completed argument bindings for `name`, counting built-ins.
    pub fn call_count(&self, name: &str) -> usize {
        self.calls.get(name).copied().unwrap_or(0)
    }
}

fn fault(expected: &str, found: &Value, expr: &Expr) -> Error {
    Error::new(
        ErrorImpl::RuntimeTypeFault {
            expected: expected.to_string(),
            found: found.kind_name().to_string(),
        },
        expr.span.start.clone(),
    )
}

fn evaluate_bool(evaluator: &mut Evaluator, expr: &Expr) -> Result<bool, Error> {
    match evaluate_expr(evaluator, expr)? {
        Value::Boolean(value) => Ok(value),
        other => Err(fault("bool", &other, expr)),
    }
}

fn evaluate_real(evaluator: &mut Evaluator, expr: &Expr) -> Result<f64, Error> {
    match evaluate_expr(evaluator, expr)? {
        Value::Real(value) => Ok(value),
        other => Err(fault("real", &other, expr)),
    }
}

fn evaluate_list(evaluator: &mut Evaluator, expr: &Expr) -> Result<Rc<Vec<Value>>, Error> {
    match evaluate_expr(evaluator, expr)? {
        Value::List(elements) => Ok(elements),
        other => Err(fault("list", &other, expr)),
    }
}

pub fn evaluate_expr(evaluator: &mut Evaluator, expr: &Expr) -> Result<Value, Error> {
    match &expr.kind {
        ExprKind::Bool(value) => Ok(Value::Boolean(*value)),
        ExprKind::Number(value) => Ok(Value::Real(*value)),
        ExprKind::String(value) => Ok(Value::String(value.clone())),
        ExprKind::Identifier(name) => {
            let symbol = evaluator.scopes.resolve(name, &expr.span.start)?;
            match (&symbol.value, &symbol.declaration) {
                (Some(value), _) => Ok(value.clone()),
                (None, Some(declaration)) => Ok(Value::Function(Rc::clone(declaration))),
                (None, None) => Err(Error::new(
                    ErrorImpl::UnboundIdentifier {
                        identifier: name.clone(),
                    },
                    expr.span.start.clone(),
                )),
            }
        }
        ExprKind::Call { callee, arguments } => evaluate_call(evaluator, callee, arguments, expr),
        ExprKind::Unary { operator, operand } => match operator {
            UnaryOp::Not => Ok(Value::Boolean(!evaluate_bool(evaluator, operand)?)),
            UnaryOp::Negate => Ok(Value::Real(-evaluate_real(evaluator, operand)?)),
        },
        ExprKind::Binary {
            operator,
            left,
            right,
        } => evaluate_binary(evaluator, *operator, left, right, expr),
        ExprKind::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            if evaluate_bool(evaluator, condition)? {
                evaluate_expr(evaluator, then_branch)
            } else {
                evaluate_expr(evaluator, else_branch)
            }
        }
        ExprKind::List(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(evaluate_expr(evaluator, element)?);
            }
            Ok(Value::list(values))
        }
    }
}

fn evaluate_binary(
    evaluator: &mut Evaluator,
    operator: BinaryOp,
    left: &Expr,
    right: &Expr,
    expr: &Expr,
) -> Result<Value, Error> {
    match operator {
        // Both operands are always evaluated.
        BinaryOp::And => {
            let left = evaluate_bool(evaluator, left)?;
            let right = evaluate_bool(evaluator, right)?;
            Ok(Value::Boolean(left && right))
        }
        BinaryOp::Or => {
            let left = evaluate_bool(evaluator, left)?;
            let right = evaluate_bool(evaluator, right)?;
            Ok(Value::Boolean(left || right))
        }
        BinaryOp::Equals => {
            let left = evaluate_expr(evaluator, left)?;
            let right = evaluate_expr(evaluator, right)?;
            values_equal(&left, &right, evaluator.list_equality, &expr.span.start).map(Value::Boolean)
        }
        BinaryOp::Concat => {
            let left = evaluate_list(evaluator, left)?;
            let right = evaluate_list(evaluator, right)?;
            let mut elements = Vec::with_capacity(left.len() + right.len());
            elements.extend(left.iter().cloned());
            elements.extend(right.iter().cloned());
            Ok(Value::list(elements))
        }
        BinaryOp::Less | BinaryOp::LessEquals | BinaryOp::Greater | BinaryOp::GreaterEquals => {
            let left = evaluate_real(evaluator, left)?;
            let right = evaluate_real(evaluator, right)?;
            Ok(Value::Boolean(match operator {
                BinaryOp::Less => left < right,
                BinaryOp::LessEquals => left <= right,
                BinaryOp::Greater => left > right,
                _ => left >= right,
            }))
        }
        BinaryOp::Add
        | BinaryOp::Subtract
        | BinaryOp::Multiply
        | BinaryOp::Divide
        | BinaryOp::Modulo
        | BinaryOp::Power => {
            let left = evaluate_real(evaluator, left)?;
            let right = evaluate_real(evaluator, right)?;
            Ok(Value::Real(match operator {
                BinaryOp::Add => left + right,
                BinaryOp::Subtract => left - right,
                BinaryOp::Multiply => left * right,
                BinaryOp::Divide => left / right,
                BinaryOp::Modulo => left % right,
                _ => left.powf(right),
            }))
        }
    }
}

/// An identifier argument that names neither a bound value nor a declaration
/// (a function-typed parameter) is passed as its static type.
fn evaluate_argument(evaluator: &mut Evaluator, argument: &Expr) -> Result<Value, Error> {
    if let ExprKind::Identifier(name) = &argument.kind {
        let symbol = evaluator.scopes.resolve(name, &argument.span.start)?;
        if symbol.value.is_none() && symbol.declaration.is_none() {
            return Ok(Value::Type(symbol.ty.clone()));
        }
    }
    evaluate_expr(evaluator, argument)
}

fn evaluate_call(
    evaluator: &mut Evaluator,
    callee: &str,
    arguments: &[Expr],
    expr: &Expr,
) -> Result<Value, Error> {
    let declaration = {
        let symbol = evaluator.scopes.resolve(callee, &expr.span.start)?;
        match &symbol.declaration {
            Some(declaration) => Rc::clone(declaration),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnboundFunctionParameter {
                        identifier: callee.to_string(),
                    },
                    expr.span.start.clone(),
                ))
            }
        }
    };

    let mut values = Vec::with_capacity(arguments.len());
    for argument in arguments {
        values.push(evaluate_argument(evaluator, argument)?);
    }

    *evaluator.calls.entry(callee.to_string()).or_default() += 1;
    trace!(function = callee, arguments = values.len(), "call");

    let suspended = evaluator.scopes.enter_frame();
    let result = evaluate_frame(evaluator, &declaration, values, expr);
    evaluator.scopes.leave_frame(suspended);
    result
}

/// Declares the parameters in the current frame and binds `values` to them in order.
fn bind_parameters(evaluator: &mut Evaluator, declaration: &FnDecl, values: &[Value]) -> Result<(), Error> {
    for param in &declaration.parameters {
        evaluator.scopes.declare(
            Symbol::parameter(param.name.clone(), param.annotation.to_type()),
            &param.span.start,
        )?;
    }

    for (symbol, value) in evaluator.scopes.current_mut().symbols_mut().zip(values) {
        // Function references stay unbound; calling such a parameter is a fault.
        if !matches!(value, Value::Function(_)) {
            symbol.value = Some(value.clone());
        }
    }

    Ok(())
}

fn evaluate_frame(
    evaluator: &mut Evaluator,
    declaration: &FnDecl,
    values: Vec<Value>,
    call: &Expr,
) -> Result<Value, Error> {
    bind_parameters(evaluator, declaration, &values)?;

    match Builtin::from_name(&declaration.name) {
        Some(builtin) => builtin.apply(&values, &call.span.start),
        None => evaluate_body(evaluator, &declaration.body),
    }
}

pub fn evaluate_body(evaluator: &mut Evaluator, body: &FunctionBody) -> Result<Value, Error> {
    match body {
        FunctionBody::Inline(expr) => evaluate_expr(evaluator, expr),
        FunctionBody::Piecewise(piecewise) => {
            for branch in &piecewise.branches {
                if evaluate_bool(evaluator, &branch.guard)? {
                    return evaluate_expr(evaluator, &branch.action);
                }
            }
            evaluate_expr(evaluator, &piecewise.otherwise)
        }
    }
}

/// Runs the entry function's body in a fresh frame. Its parameters, if any, are
/// declared without values.
pub fn evaluate_entry(evaluator: &mut Evaluator, entry: &FnDecl) -> Result<Value, Error> {
    let suspended = evaluator.scopes.enter_frame();
    let result = bind_parameters(evaluator, entry, &[]).and_then(|_| evaluate_body(evaluator, &entry.body));
    evaluator.scopes.leave_frame(suspended);
    result
}

/// Evaluates `entry` against an analyzed global scope.
#[tracing::instrument(level = "debug", skip_all, fields(entry = %entry.name))]
pub fn evaluate(
    entry: &FnDecl,
    scopes: &mut ScopeStack,
    list_equality: ListEquality,
) -> Result<Value, Error> {
    let mut evaluator = Evaluator::new(scopes, list_equality);
    let value = evaluate_entry(&mut evaluator, entry)?;
    debug!(result = %value, "evaluation complete");
    Ok(value)
}
