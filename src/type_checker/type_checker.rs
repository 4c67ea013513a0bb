use std::{collections::HashMap, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::Program,
        declarations::{FnDecl, FunctionBody, PiecewiseBody},
        expressions::{BinaryOp, Expr, ExprKind, UnaryOp},
    },
    errors::errors::{Error, ErrorImpl},
    scope::{scope::ScopeStack, symbol::Symbol},
    types::types::{FunctionType, Parameter, Type},
};

/// Lazy, memoizing static analysis over the global symbol table.
///
/// A function is resolved the first time it is reached, either from the top-level
/// walk or from a call site. Its `Function` type is written onto the global symbol
/// before the body is visited, so recursive calls see the signature and stop there.
#[derive(Debug)]
pub struct TypeChecker<'a> {
    pub scopes: &'a mut ScopeStack,
    resolutions: HashMap<String, usize>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(scopes: &'a mut ScopeStack) -> Self {
        TypeChecker {
            scopes,
            resolutions: HashMap::new(),
        }
    }

    /// How many times a function's body has been analyzed. Always 0 or 1.
    pub fn resolution_count(&self, name: &str) -> usize {
        self.resolutions.get(name).copied().unwrap_or(0)
    }

    fn record_resolution(&mut self, name: &str) {
        *self.resolutions.entry(name.to_string()).or_default() += 1;
    }
}

fn mismatch(expected: &Type, received: &Type, expr: &Expr) -> Error {
    Error::new(
        ErrorImpl::TypeMismatch {
            expected: expected.to_string(),
            received: received.to_string(),
        },
        expr.span.start.clone(),
    )
}

/// Checks `expr` and requires the exact primitive `expected`.
fn expect_type(type_checker: &mut TypeChecker, expr: &Expr, expected: Type) -> Result<(), Error> {
    let received = type_check_expr(type_checker, expr)?;
    if received.same_kind(&expected) {
        Ok(())
    } else {
        Err(mismatch(&expected, &received, expr))
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &Expr) -> Result<Type, Error> {
    match &expr.kind {
        ExprKind::Bool(_) => Ok(Type::Boolean),
        ExprKind::Number(_) => Ok(Type::Real),
        ExprKind::String(_) => Ok(Type::String),
        ExprKind::Identifier(name) => Ok(type_checker
            .scopes
            .resolve(name, &expr.span.start)?
            .ty
            .clone()),
        ExprKind::Call { callee, arguments } => type_check_call(type_checker, callee, arguments, expr),
        ExprKind::Unary { operator, operand } => match operator {
            UnaryOp::Not => {
                expect_type(type_checker, operand, Type::Boolean)?;
                Ok(Type::Boolean)
            }
            UnaryOp::Negate => {
                expect_type(type_checker, operand, Type::Real)?;
                Ok(Type::Real)
            }
        },
        ExprKind::Binary {
            operator,
            left,
            right,
        } => type_check_binary(type_checker, *operator, left, right),
        ExprKind::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            expect_type(type_checker, condition, Type::Boolean)?;
            let then_type = type_check_expr(type_checker, then_branch)?;
            let else_type = type_check_expr(type_checker, else_branch)?;
            then_type
                .join(&else_type)
                .ok_or_else(|| mismatch(&then_type, &else_type, else_branch))
        }
        ExprKind::List(elements) => {
            let Some((first, rest)) = elements.split_first() else {
                return Ok(Type::list(Type::Unresolved));
            };

            let mut element_type = type_check_expr(type_checker, first)?;
            for element in rest {
                let ty = type_check_expr(type_checker, element)?;
                element_type = element_type
                    .join(&ty)
                    .ok_or_else(|| mismatch(&element_type, &ty, element))?;
            }
            Ok(Type::list(element_type))
        }
    }
}

fn type_check_binary(
    type_checker: &mut TypeChecker,
    operator: BinaryOp,
    left: &Expr,
    right: &Expr,
) -> Result<Type, Error> {
    match operator {
        BinaryOp::Or | BinaryOp::And => {
            expect_type(type_checker, left, Type::Boolean)?;
            expect_type(type_checker, right, Type::Boolean)?;
            Ok(Type::Boolean)
        }
        BinaryOp::Add
        | BinaryOp::Subtract
        | BinaryOp::Multiply
        | BinaryOp::Divide
        | BinaryOp::Modulo
        | BinaryOp::Power => {
            expect_type(type_checker, left, Type::Real)?;
            expect_type(type_checker, right, Type::Real)?;
            Ok(Type::Real)
        }
        BinaryOp::Less | BinaryOp::LessEquals | BinaryOp::Greater | BinaryOp::GreaterEquals => {
            expect_type(type_checker, left, Type::Real)?;
            expect_type(type_checker, right, Type::Real)?;
            Ok(Type::Boolean)
        }
        BinaryOp::Equals => {
            let left_type = type_check_expr(type_checker, left)?;
            let right_type = type_check_expr(type_checker, right)?;
            if !left_type.same_kind(&right_type) {
                return Err(mismatch(&left_type, &right_type, right));
            }
            Ok(Type::Boolean)
        }
        BinaryOp::Concat => {
            let left_type = type_check_expr(type_checker, left)?;
            if left_type.element().is_none() {
                return Err(mismatch(&Type::list(Type::Unresolved), &left_type, left));
            }
            let right_type = type_check_expr(type_checker, right)?;
            left_type
                .unify_lists(&right_type)
                .ok_or_else(|| mismatch(&left_type, &right_type, right))
        }
    }
}

fn type_check_call(
    type_checker: &mut TypeChecker,
    callee: &str,
    arguments: &[Expr],
    expr: &Expr,
) -> Result<Type, Error> {
    let position = &expr.span.start;

    let pending = {
        let symbol = type_checker.scopes.resolve(callee, position)?;
        if symbol.ty.is_resolved() {
            None
        } else {
            symbol.declaration.clone()
        }
    };
    if let Some(declaration) = pending {
        type_check_fn_decl(type_checker, &declaration)?;
    }

    let function = match &type_checker.scopes.resolve(callee, position)?.ty {
        Type::Function(function) => function.clone(),
        other => {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: String::from("function"),
                    received: other.to_string(),
                },
                position.clone(),
            ))
        }
    };

    let mut argument_types = Vec::with_capacity(arguments.len());
    for argument in arguments {
        argument_types.push(type_check_expr(type_checker, argument)?);
    }

    if argument_types.len() != function.arity() {
        return Err(Error::new(
            ErrorImpl::ArityMismatch {
                function: callee.to_string(),
                expected: function.arity(),
                received: argument_types.len(),
            },
            position.clone(),
        ));
    }

    // Shallow: `[real]` accepts any list, `(real) -> real` any function.
    for (index, (parameter, received)) in function.parameters.iter().zip(&argument_types).enumerate() {
        if !parameter.ty.same_kind(received) {
            return Err(Error::new(
                ErrorImpl::ArgumentTypeMismatch {
                    function: callee.to_string(),
                    index,
                    expected: parameter.ty.to_string(),
                    received: received.to_string(),
                },
                arguments[index].span.start.clone(),
            ));
        }
    }

    Ok(*function.output)
}

/// Every branch must agree with every other. The result is their join, so an empty
/// list branch takes its element type from the others.
fn type_check_piecewise(type_checker: &mut TypeChecker, body: &PiecewiseBody) -> Result<Type, Error> {
    let mut branch_types = Vec::with_capacity(body.branches.len() + 1);

    for branch in &body.branches {
        expect_type(type_checker, &branch.guard, Type::Boolean)?;
        branch_types.push((type_check_expr(type_checker, &branch.action)?, &branch.action));
    }
    branch_types.push((type_check_expr(type_checker, &body.otherwise)?, &body.otherwise));

    let mut result = branch_types[0].0.clone();
    for (ty, action) in &branch_types[1..] {
        result = result.join(ty).ok_or_else(|| mismatch(&result, ty, action))?;
    }

    Ok(result)
}

pub fn type_check_body(type_checker: &mut TypeChecker, body: &FunctionBody) -> Result<Type, Error> {
    match body {
        FunctionBody::Inline(expr) => type_check_expr(type_checker, expr),
        FunctionBody::Piecewise(piecewise) => type_check_piecewise(type_checker, piecewise),
    }
}

/// Resolves a function once. Later visits, including recursive ones, return at the
/// memo check.
pub fn type_check_fn_decl(type_checker: &mut TypeChecker, declaration: &Rc<FnDecl>) -> Result<(), Error> {
    let resolved = type_checker
        .scopes
        .global()
        .get(&declaration.name)
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownIdentifier {
                    identifier: declaration.name.clone(),
                },
                declaration.span.start.clone(),
            )
        })?
        .ty
        .is_resolved();
    if resolved {
        trace!(function = %declaration.name, "already resolved");
        return Ok(());
    }

    let suspended = type_checker.scopes.enter_frame();
    let result = type_check_fn_frame(type_checker, declaration);
    type_checker.scopes.leave_frame(suspended);
    result
}

fn type_check_fn_frame(type_checker: &mut TypeChecker, declaration: &FnDecl) -> Result<(), Error> {
    for param in &declaration.parameters {
        type_checker.scopes.declare(
            Symbol::parameter(param.name.clone(), param.annotation.to_type()),
            &param.span.start,
        )?;
    }

    let parameters = type_checker
        .scopes
        .current()
        .symbols()
        .map(|symbol| Parameter {
            name: symbol.name.clone(),
            ty: symbol.ty.clone(),
        })
        .collect();
    let function = FunctionType::new(parameters, declaration.return_type.to_type());
    let output = (*function.output).clone();

    debug!(function = %declaration.name, signature = %Type::Function(function.clone()), "resolved signature");
    if let Some(symbol) = type_checker.scopes.global_mut().get_mut(&declaration.name) {
        symbol.ty = Type::Function(function);
    }
    type_checker.record_resolution(&declaration.name);

    let body = type_check_body(type_checker, &declaration.body)?;
    if !body.structurally_equals(&output) {
        return Err(Error::new(
            ErrorImpl::TypeMismatch {
                expected: output.to_string(),
                received: body.to_string(),
            },
            declaration.body.span().start.clone(),
        ));
    }

    Ok(())
}

/// Visits every top-level function in declaration order.
#[tracing::instrument(level = "debug", skip_all, fields(count = program.declarations.len()))]
pub fn type_check_program(type_checker: &mut TypeChecker, program: &Program) -> Result<(), Error> {
    for declaration in &program.declarations {
        type_check_fn_decl(type_checker, declaration)?;
    }
    debug!("analysis complete");
    Ok(())
}

/// Analyzes `program` against the global scope built by the declaration pass. On
/// success every function symbol carries its `Function` type.
pub fn type_check(program: &Program, scopes: &mut ScopeStack) -> Result<(), Error> {
    let mut type_checker = TypeChecker::new(scopes);
    type_check_program(&mut type_checker, program)
}
