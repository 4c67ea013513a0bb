use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position: Some(position),
        }
    }

    /// Errors raised away from any AST node (e.g. a missing entry function).
    pub fn without_position(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            position: None,
        }
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// True for faults that can only be reached if the analyzer let an ill-typed
    /// program through. These are assertion failures, not user diagnostics.
    pub fn is_internal(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::RuntimeTypeFault { .. }
                | ErrorImpl::UnboundFunctionParameter { .. }
                | ErrorImpl::UnboundIdentifier { .. }
                | ErrorImpl::UnsupportedEquality { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::DuplicateIdentifier { .. } => "DuplicateIdentifier",
            ErrorImpl::UnknownIdentifier { .. } => "UnknownIdentifier",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::ArgumentTypeMismatch { .. } => "ArgumentTypeMismatch",
            ErrorImpl::EmptyList { .. } => "EmptyList",
            ErrorImpl::MissingEntryFunction { .. } => "MissingEntryFunction",
            ErrorImpl::RuntimeTypeFault { .. } => "RuntimeTypeFault",
            ErrorImpl::UnboundFunctionParameter { .. } => "UnboundFunctionParameter",
            ErrorImpl::UnboundIdentifier { .. } => "UnboundIdentifier",
            ErrorImpl::UnsupportedEquality { .. } => "UnsupportedEquality",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::UnknownType { type_ } => ErrorTip::Suggestion(format!(
                "Unknown type `{}`, expected one of bool, real, int, string",
                type_
            )),
            ErrorImpl::DuplicateIdentifier { identifier } => ErrorTip::Suggestion(format!(
                "Identifier `{}` is already defined in this scope",
                identifier
            )),
            ErrorImpl::UnknownIdentifier { identifier } => ErrorTip::Suggestion(format!(
                "Identifier `{}` is not declared in this scope",
                identifier
            )),
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArityMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::ArgumentTypeMismatch {
                function,
                index,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "Argument {} of `{}` should be `{}`, received `{}`",
                index + 1,
                function,
                expected,
                received
            )),
            ErrorImpl::EmptyList { function } => {
                ErrorTip::Suggestion(format!("`{}` was applied to an empty list", function))
            }
            ErrorImpl::MissingEntryFunction { name } => ErrorTip::Suggestion(format!(
                "Declare a function named `{}` or choose another entry with --entry",
                name
            )),
            ErrorImpl::RuntimeTypeFault { .. }
            | ErrorImpl::UnboundFunctionParameter { .. }
            | ErrorImpl::UnboundIdentifier { .. }
            | ErrorImpl::UnsupportedEquality { .. } => ErrorTip::Suggestion(String::from(
                "This is an interpreter bug: the program passed type checking",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(position) => write!(
                f,
                "{} @ line {}:{}: {}",
                self.get_error_name(),
                position.line,
                position.column,
                self.internal_error
            ),
            None => write!(f, "{}: {}", self.get_error_name(), self.internal_error),
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("identifier {identifier:?} is already defined in this scope")]
    DuplicateIdentifier { identifier: String },
    #[error("identifier {identifier:?} is not declared in this scope")]
    UnknownIdentifier { identifier: String },
    #[error("types in expression are mismatched: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("{function:?} expects {expected} arguments, received {received}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {index} of {function:?} does not match parameter: expected {expected}, received {received}")]
    ArgumentTypeMismatch {
        function: String,
        index: usize,
        expected: String,
        received: String,
    },
    #[error("{function:?} applied to an empty list")]
    EmptyList { function: String },
    #[error("no function named {name:?} in the program")]
    MissingEntryFunction { name: String },
    #[error("runtime value has the wrong shape: expected {expected}, found {found}")]
    RuntimeTypeFault { expected: String, found: String },
    #[error("function-typed parameter {identifier:?} is not bound to a declaration")]
    UnboundFunctionParameter { identifier: String },
    #[error("identifier {identifier:?} has no runtime value")]
    UnboundIdentifier { identifier: String },
    #[error("values of kind {kind} cannot be compared")]
    UnsupportedEquality { kind: String },
}
