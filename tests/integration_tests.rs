//! End-to-end tests: source text through parsing, declaration, analysis and
//! evaluation, with the prelude loaded.

use dfunc::{
    config::{Config, ListEquality},
    errors::errors::ErrorImpl,
    evaluator::value::Value,
    pipeline::{parse_sources, run_program, run_source},
};
use pretty_assertions::assert_eq;

fn run(source: &str) -> Result<Value, dfunc::errors::errors::Error> {
    run_source(source, "main.df", &Config::default())
}

fn output(source: &str) -> String {
    run(source).unwrap().to_string()
}

#[test]
fn test_concatenation_program() {
    assert_eq!(output("fn main() -> [real] = [1.0, 2.0] ++ [3.0];"), "[1,2,3]");
}

#[test]
fn test_recursive_list_functions() {
    let source = "
        fn length(xs: [real]) -> real {
            xs == [] => 0,
            else => 1 + length(tail(xs))
        }

        fn sum(xs: [real]) -> real {
            length(xs) == 0 => 0,
            else => head(xs) + sum(tail(xs))
        }

        fn main() -> real = sum([1, 2, 3, 4]) * length([5, 6]);
    ";
    assert_eq!(output(source), "20");
}

#[test]
fn test_map_style_recursion_builds_lists() {
    let source = "
        fn double_all(xs: [real]) -> [real] {
            xs == [] => [],
            else => [head(xs) * 2] ++ double_all(tail(xs))
        }

        fn main() -> [real] = double_all([1, 2.5, 3]);
    ";
    assert_eq!(output(source), "[2,5,6]");
}

#[test]
fn test_fibonacci() {
    let source = "
        fn fib(n: real) -> real { n < 2 => n, else => fib(n - 1) + fib(n - 2) }
        fn main() -> real = fib(15);
    ";
    assert_eq!(run(source).unwrap(), Value::Real(610.0));
}

#[test]
fn test_declaration_order_is_irrelevant() {
    let source = "
        fn main() -> string = describe(is_even(10));
        fn describe(b: bool) -> string = if b then \"even\" else \"odd\";
        fn is_even(n: real) -> bool { n == 0 => true, n == 1 => false, else => is_even(n - 2) }
    ";
    assert_eq!(output(source), "even");
}

#[test]
fn test_duplicate_function_is_reported_first() {
    let error = run("fn f() -> real = 1; fn f() -> bool = 2; fn main() -> real = f();").unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::DuplicateIdentifier {
            identifier: "f".to_string()
        }
    );
}

#[test]
fn test_redefining_a_prelude_function_is_a_duplicate() {
    let error = run("fn head(xs: [real]) -> real = 0; fn main() -> real = 1;").unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::DuplicateIdentifier { .. }));
}

#[test]
fn test_type_errors_stop_before_evaluation() {
    // `main` would fault on an empty list if it ran.
    let error = run("fn main() -> real = head([]) + bad(); fn bad() -> real = true;").unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::TypeMismatch {
            expected: "real".to_string(),
            received: "bool".to_string(),
        }
    );
}

#[test]
fn test_runtime_empty_list_fault() {
    let error = run("fn main() -> real = head(tail([1]));").unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::EmptyList {
            function: "head".to_string()
        }
    );
    assert_eq!(error.get_position().unwrap().file.as_str(), "main.df");
}

#[test]
fn test_list_equality_is_configurable() {
    let source = "fn main() -> bool = [[1, 2], [3]] == [[1, 2], [3]];";

    assert_eq!(run(source).unwrap(), Value::Boolean(false));

    let structural = Config {
        list_equality: ListEquality::Structural,
        ..Config::default()
    };
    assert_eq!(run_source(source, "main.df", &structural).unwrap(), Value::Boolean(true));
}

#[test]
fn test_multiple_files_share_one_global_scope() {
    let sources = vec![
        ("lib.df".to_string(), "fn square(x: real) -> real = x * x;".to_string()),
        ("main.df".to_string(), "fn main() -> real = square(7);".to_string()),
    ];
    let program = parse_sources(&sources).unwrap();
    let config = Config {
        prelude: false,
        ..Config::default()
    };

    assert_eq!(run_program(&program, &config).unwrap(), Value::Real(49.0));
}

#[test]
fn test_entry_function_parameters_are_unbound() {
    let error = run("fn main(x: real) -> real = x;").unwrap_err();
    assert_eq!(
        error.kind(),
        &ErrorImpl::UnboundIdentifier {
            identifier: "x".to_string()
        }
    );
    assert!(error.is_internal());
}

#[test]
fn test_strings_and_booleans() {
    assert_eq!(output("fn main() -> bool = \"abc\" == \"abc\" and not false;"), "true");
    assert_eq!(output("fn main() -> string = \"line\\tbreak\";"), "line\tbreak");
    assert_eq!(output("fn main() -> [string] = [\"a\", \"b\"];"), "[a,b]");
}
