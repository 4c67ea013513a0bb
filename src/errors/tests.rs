//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn position() -> Position {
    Position::new(3, 7, Rc::new("test.df".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnknownIdentifier {
            identifier: "x".to_string(),
        },
        position(),
    );

    let position = error.get_position().unwrap();
    assert_eq!(position.line, 3);
    assert_eq!(position.column, 7);
}

#[test]
fn test_error_without_position() {
    let error = Error::without_position(ErrorImpl::MissingEntryFunction {
        name: "main".to_string(),
    });

    assert!(error.get_position().is_none());
    assert_eq!(error.get_error_name(), "MissingEntryFunction");
}

#[test]
fn test_display_includes_line_and_column() {
    let error = Error::new(
        ErrorImpl::DuplicateIdentifier {
            identifier: "f".to_string(),
        },
        position(),
    );

    assert_eq!(
        error.to_string(),
        "DuplicateIdentifier @ line 3:7: identifier \"f\" is already defined in this scope"
    );
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            expected: "real".to_string(),
            received: "bool".to_string(),
        },
        position(),
    );

    assert_eq!(error.get_error_name(), "TypeMismatch");
    assert!(!error.is_internal());
}

#[test]
fn test_arity_and_argument_errors() {
    let arity = Error::new(
        ErrorImpl::ArityMismatch {
            function: "f".to_string(),
            expected: 2,
            received: 1,
        },
        position(),
    );
    let argument = Error::new(
        ErrorImpl::ArgumentTypeMismatch {
            function: "f".to_string(),
            index: 0,
            expected: "real".to_string(),
            received: "string".to_string(),
        },
        position(),
    );

    assert_eq!(arity.get_error_name(), "ArityMismatch");
    assert_eq!(argument.get_error_name(), "ArgumentTypeMismatch");
    assert_eq!(
        argument.get_tip().to_string(),
        "Argument 1 of `f` should be `real`, received `string`"
    );
}

#[test]
fn test_internal_faults() {
    let fault = Error::without_position(ErrorImpl::RuntimeTypeFault {
        expected: "bool".to_string(),
        found: "real".to_string(),
    });
    let empty = Error::without_position(ErrorImpl::EmptyList {
        function: "head".to_string(),
    });

    assert!(fault.is_internal());
    assert!(!empty.is_internal());
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
