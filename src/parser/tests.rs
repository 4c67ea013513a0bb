//! Unit tests for the parser module.
//!
//! Precedence is checked by printing expressions fully parenthesized.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    ast::{
        ast::Program,
        declarations::FunctionBody,
        expressions::{Expr, ExprKind, UnaryOp},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    types::types::Type,
};

use super::parser::parse;

fn try_parse(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source, Some("test.df".to_string())).unwrap();
    parse(tokens, Rc::new("test.df".to_string()))
}

fn render(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Bool(value) => value.to_string(),
        ExprKind::Number(value) => value.to_string(),
        ExprKind::String(value) => format!("{:?}", value),
        ExprKind::Identifier(name) => name.clone(),
        ExprKind::Call { callee, arguments } => format!(
            "{}({})",
            callee,
            arguments.iter().map(render).collect::<Vec<_>>().join(", ")
        ),
        ExprKind::Unary { operator, operand } => match operator {
            UnaryOp::Negate => format!("(-{})", render(operand)),
            UnaryOp::Not => format!("(not {})", render(operand)),
        },
        ExprKind::Binary {
            operator,
            left,
            right,
        } => format!("({} {} {})", render(left), operator, render(right)),
        ExprKind::Ternary {
            condition,
            then_branch,
            else_branch,
        } => format!(
            "(if {} then {} else {})",
            render(condition),
            render(then_branch),
            render(else_branch)
        ),
        ExprKind::List(elements) => format!(
            "[{}]",
            elements.iter().map(render).collect::<Vec<_>>().join(", ")
        ),
    }
}

/// Parses `fn t() -> real = <expr>;` and renders the body.
fn expr(source: &str) -> String {
    let program = try_parse(&format!("fn t() -> real = {};", source)).unwrap();
    match &program.declarations[0].body {
        FunctionBody::Inline(expr) => render(expr),
        FunctionBody::Piecewise(_) => panic!("expected an inline body"),
    }
}

#[test]
fn test_parse_inline_declaration() {
    let program = try_parse("fn add(a: real, b: [string]) -> bool = true;").unwrap();
    let decl = &program.declarations[0];

    assert_eq!(decl.name, "add");
    assert_eq!(decl.parameters.len(), 2);
    assert_eq!(decl.parameters[0].name, "a");
    assert_eq!(decl.parameters[0].annotation.to_type(), Type::Real);
    assert_eq!(decl.parameters[1].annotation.to_type(), Type::list(Type::String));
    assert_eq!(decl.return_type.to_type(), Type::Boolean);
    assert!(matches!(decl.body, FunctionBody::Inline(_)));
}

#[test]
fn test_parse_function_typed_parameter() {
    let program = try_parse("fn apply(g: (real, int) -> [real]) -> real = 1;").unwrap();
    let ty = program.declarations[0].parameters[0].annotation.to_type();

    assert_eq!(ty.to_string(), "(real, int) -> [real]");
}

#[test]
fn test_parse_piecewise_declaration() {
    let program = try_parse(
        "fn sign(x: real) -> real {
            x < 0 => -1,
            x == 0 => 0,
            else => 1
        }
        fn main() -> real = sign(2);",
    )
    .unwrap();

    assert_eq!(program.declarations.len(), 2);
    let FunctionBody::Piecewise(body) = &program.declarations[0].body else {
        panic!("expected a piecewise body");
    };
    assert_eq!(body.branches.len(), 2);
    assert_eq!(render(&body.branches[0].guard), "(x < 0)");
    assert_eq!(render(&body.branches[1].action), "0");
    assert_eq!(render(&body.otherwise), "1");
}

#[test]
fn test_parse_piecewise_requires_else() {
    let error = try_parse("fn f(x: real) -> real { x > 0 => 1, }").unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::UnexpectedTokenDetailed { .. }));
}

#[test]
fn test_parse_unknown_type() {
    let error = try_parse("fn f(x: float) -> real = x;").unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::UnknownType {
            type_: "float".to_string()
        }
    );
}

#[test]
fn test_parse_missing_semicolon() {
    assert!(try_parse("fn f() -> real = 1 fn g() -> real = 2;").is_err());
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(expr("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(expr("1 - 2 - 3"), "((1 - 2) - 3)");
    assert_eq!(expr("(1 + 2) % 3"), "((1 + 2) % 3)");
    assert_eq!(expr("2 ^ 3 ^ 2"), "(2 ^ (3 ^ 2))");
    assert_eq!(expr("2 * 3 ^ 2"), "(2 * (3 ^ 2))");
}

#[test]
fn test_logical_and_comparison_precedence() {
    assert_eq!(expr("a or b and c"), "(a or (b and c))");
    assert_eq!(expr("x + 1 < y and not z"), "(((x + 1) < y) and (not z))");
    assert_eq!(expr("a == b or c"), "((a == b) or c)");
}

#[test]
fn test_concat_precedence() {
    assert_eq!(expr("xs ++ [1 + 2] == ys"), "((xs ++ [(1 + 2)]) == ys)");
}

#[test]
fn test_prefix_minus() {
    assert_eq!(expr("-x + 1"), "((-x) + 1)");
    assert_eq!(expr("a - -b"), "(a - (-b))");
}

#[test]
fn test_calls_lists_and_ternaries() {
    assert_eq!(expr("f(1, g(x), [])"), "f(1, g(x), [])");
    assert_eq!(expr("[1, \"a\", true]"), "[1, \"a\", true]");
    assert_eq!(
        expr("if x > 0 then f(x) else -1"),
        "(if (x > 0) then f(x) else (-1))"
    );
}

#[test]
fn test_call_requires_named_callee() {
    let error = try_parse("fn f() -> real = g(1)(2);").unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::UnexpectedTokenDetailed { .. }));
}
