use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::{
    ast::{ast::Program, declarations::FunctionBody},
    declarator::declarator::declare_globals,
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    scope::{scope::ScopeStack, symbol::Symbol},
    types::types::{Parameter, Type},
};

use super::type_checker::{type_check, type_check_body, type_check_expr, type_check_program, TypeChecker};

fn program(source: &str) -> Program {
    let tokens = tokenize(source, Some("test.df".to_string())).unwrap();
    parse(tokens, Rc::new("test.df".to_string())).unwrap()
}

fn check(source: &str) -> Result<ScopeStack, Error> {
    let program = program(source);
    let mut scopes = declare_globals(&program)?;
    type_check(&program, &mut scopes)?;
    Ok(scopes)
}

fn check_err(source: &str) -> ErrorImpl {
    check(source).unwrap_err().kind().clone()
}

fn type_of(scopes: &ScopeStack, name: &str) -> Type {
    scopes.global().get(name).unwrap().ty.clone()
}

/// Type of the first declaration's body, with its parameters in scope.
fn body_type(source: &str) -> Result<Type, Error> {
    let program = program(source);
    let mut scopes = declare_globals(&program)?;
    let declaration = &program.declarations[0];

    scopes.push();
    for param in &declaration.parameters {
        scopes.declare(
            Symbol::parameter(param.name.clone(), param.annotation.to_type()),
            &param.span.start,
        )?;
    }

    let mut type_checker = TypeChecker::new(&mut scopes);
    type_check_body(&mut type_checker, &declaration.body)
}

#[test]
fn test_resolves_signatures() {
    let scopes = check("fn add(a: real, b: real) -> real = a + b;").unwrap();

    assert_eq!(
        type_of(&scopes, "add"),
        Type::function(
            vec![
                Parameter {
                    name: "a".to_string(),
                    ty: Type::Real
                },
                Parameter {
                    name: "b".to_string(),
                    ty: Type::Real
                },
            ],
            Type::Real
        )
    );
    assert_eq!(scopes.depth(), 1);
}

#[test]
fn test_recursive_function_resolves_once() {
    let program = program(
        "fn fact(n: real) -> real { n <= 1 => 1, else => n * fact(n - 1) }
         fn main() -> real = fact(5) + fact(3);",
    );
    let mut scopes = declare_globals(&program).unwrap();
    let mut type_checker = TypeChecker::new(&mut scopes);

    type_check_program(&mut type_checker, &program).unwrap();

    assert_eq!(type_checker.resolution_count("fact"), 1);
    assert_eq!(type_checker.resolution_count("main"), 1);
    assert_eq!(type_checker.resolution_count("missing"), 0);
}

#[test]
fn test_mutual_recursion_without_forward_declarations() {
    let scopes = check(
        "fn main() -> bool = even(4);
         fn even(n: real) -> bool { n == 0 => true, else => odd(n - 1) }
         fn odd(n: real) -> bool { n == 0 => false, else => even(n - 1) }",
    )
    .unwrap();

    for name in ["main", "even", "odd"] {
        assert!(type_of(&scopes, name).is_resolved(), "{name} left unresolved");
    }
}

#[test]
fn test_list_arguments_are_checked_shallowly() {
    check("fn f(xs: [real]) -> real = 1; fn main() -> real = f([]);").unwrap();
    check("fn f(xs: [real]) -> real = 1; fn main() -> real = f([\"a\"]);").unwrap();
}

#[test]
fn test_argument_kind_mismatch() {
    assert_eq!(
        check_err("fn f(x: real) -> real = x; fn main() -> real = f(true);"),
        ErrorImpl::ArgumentTypeMismatch {
            function: "f".to_string(),
            index: 0,
            expected: "real".to_string(),
            received: "bool".to_string(),
        }
    );
}

#[test]
fn test_arity_mismatch() {
    assert_eq!(
        check_err("fn f(x: real) -> real = x; fn main() -> real = f(1, 2);"),
        ErrorImpl::ArityMismatch {
            function: "f".to_string(),
            expected: 1,
            received: 2,
        }
    );
}

#[test]
fn test_body_must_match_return_type() {
    let error = check("fn f() -> real =\n  true;").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::TypeMismatch {
            expected: "real".to_string(),
            received: "bool".to_string(),
        }
    );
    assert_eq!(error.get_position().unwrap().line, 2);
}

#[test]
fn test_empty_list_matches_any_list_return() {
    check("fn f() -> [real] = [];").unwrap();
    check("fn f() -> [[string]] = [[], [\"a\"]];").unwrap();
}

#[test]
fn test_list_elements_must_agree() {
    assert_eq!(
        check_err("fn f() -> [real] = [1, true];"),
        ErrorImpl::TypeMismatch {
            expected: "real".to_string(),
            received: "bool".to_string(),
        }
    );
    assert!(matches!(
        check_err("fn f() -> [[real]] = [[1], [\"a\"]];"),
        ErrorImpl::TypeMismatch { .. }
    ));
    assert_eq!(
        check_err("fn f() -> [[real]] = [[], [1], [\"a\"]];"),
        ErrorImpl::TypeMismatch {
            expected: "[real]".to_string(),
            received: "[string]".to_string(),
        }
    );
    assert_eq!(
        body_type("fn f() -> [[real]] = [[], [1]];").unwrap(),
        Type::list(Type::list(Type::Real))
    );
}

#[test]
fn test_concatenation() {
    let program = program("fn f() -> [real] = [1.0, 2.0] ++ [3.0];");
    let mut scopes = declare_globals(&program).unwrap();
    let FunctionBody::Inline(expr) = &program.declarations[0].body else {
        panic!("expected an inline body");
    };
    let mut type_checker = TypeChecker::new(&mut scopes);
    assert_eq!(type_check_expr(&mut type_checker, expr).unwrap(), Type::list(Type::Real));

    assert_eq!(
        body_type("fn g() -> [real] = [] ++ [];").unwrap(),
        Type::list(Type::Unresolved)
    );
    assert_eq!(
        body_type("fn g() -> [real] = [] ++ [2];").unwrap(),
        Type::list(Type::Real)
    );

    assert!(matches!(
        check_err("fn f() -> [real] = [1] ++ [\"a\"];"),
        ErrorImpl::TypeMismatch { .. }
    ));
    assert!(matches!(
        check_err("fn f() -> [real] = 1 ++ [2];"),
        ErrorImpl::TypeMismatch { .. }
    ));
}

#[test]
fn test_piecewise_guards_and_branches() {
    assert_eq!(
        check_err("fn f(x: real) -> real { x => 1, else => 2 }"),
        ErrorImpl::TypeMismatch {
            expected: "bool".to_string(),
            received: "real".to_string(),
        }
    );
    assert_eq!(
        check_err("fn f(x: real) -> real { x > 1 => 1, else => \"two\" }"),
        ErrorImpl::TypeMismatch {
            expected: "real".to_string(),
            received: "string".to_string(),
        }
    );
}

#[test]
fn test_piecewise_branches_agree_pairwise() {
    // `[]` fits both neighbours, but `[1]` and `["a"]` disagree with each other.
    assert_eq!(
        check_err("fn f(c: real) -> [real] { c == 0 => [], c == 1 => [1], else => [\"a\"] }"),
        ErrorImpl::TypeMismatch {
            expected: "[real]".to_string(),
            received: "[string]".to_string(),
        }
    );
    assert_eq!(
        check_err("fn f(c: real) -> [string] { c == 0 => [], else => [1] }"),
        ErrorImpl::TypeMismatch {
            expected: "[string]".to_string(),
            received: "[real]".to_string(),
        }
    );
}

#[test]
fn test_piecewise_result_takes_the_resolved_branch() {
    assert_eq!(
        body_type("fn f(c: real) -> [real] { c == 0 => [], else => [1] }").unwrap(),
        Type::list(Type::Real)
    );
    assert_eq!(
        body_type("fn f(c: real) -> [real] { c == 0 => [1], c == 1 => [], else => [] }").unwrap(),
        Type::list(Type::Real)
    );
}

#[test]
fn test_ternary() {
    check("fn f(x: real) -> string = if x > 0 then \"pos\" else \"neg\";").unwrap();
    assert!(matches!(
        check_err("fn f(x: real) -> real = if x then 1 else 2;"),
        ErrorImpl::TypeMismatch { .. }
    ));
    assert!(matches!(
        check_err("fn f(x: real) -> real = if x > 0 then 1 else false;"),
        ErrorImpl::TypeMismatch { .. }
    ));
    assert_eq!(
        body_type("fn f(c: bool) -> [real] = if c then [] else [1];").unwrap(),
        Type::list(Type::Real)
    );
}

#[test]
fn test_operators() {
    check("fn f(a: bool, b: bool) -> bool = not a and b or a == b;").unwrap();
    check("fn f(x: real) -> bool = -x ^ 2 % 3 >= x / 2 - 1;").unwrap();

    assert!(matches!(check_err("fn f() -> real = 1 + true;"), ErrorImpl::TypeMismatch { .. }));
    assert!(matches!(check_err("fn f() -> bool = not 1;"), ErrorImpl::TypeMismatch { .. }));
    assert!(matches!(check_err("fn f() -> bool = 1 == \"1\";"), ErrorImpl::TypeMismatch { .. }));
}

#[test]
fn test_unknown_identifier() {
    assert_eq!(
        check_err("fn f() -> real = y;"),
        ErrorImpl::UnknownIdentifier {
            identifier: "y".to_string()
        }
    );
    assert_eq!(
        check_err("fn f() -> real = g(1);"),
        ErrorImpl::UnknownIdentifier {
            identifier: "g".to_string()
        }
    );
}

#[test]
fn test_callee_cannot_see_caller_parameters() {
    assert_eq!(
        check_err("fn main(x: real) -> real = helper(); fn helper() -> real = x;"),
        ErrorImpl::UnknownIdentifier {
            identifier: "x".to_string()
        }
    );
}

#[test]
fn test_duplicate_parameter() {
    assert_eq!(
        check_err("fn f(x: real, x: real) -> real = x;"),
        ErrorImpl::DuplicateIdentifier {
            identifier: "x".to_string()
        }
    );
}

#[test]
fn test_calling_a_non_function() {
    assert_eq!(
        check_err("fn f(x: real) -> real = x(1);"),
        ErrorImpl::TypeMismatch {
            expected: "function".to_string(),
            received: "real".to_string(),
        }
    );
}

#[test]
fn test_function_typed_parameter_call_checks() {
    check("fn apply(g: (real) -> real, x: real) -> real = g(x);").unwrap();
}
