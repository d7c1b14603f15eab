use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Error, Debug, Clone)]
#[error("{internal_error} at position {}", .position.0)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// True when the source text itself could not be split into tokens.
    pub fn is_lex_error(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::UnexpectedCharacter { .. })
    }

    pub fn is_parse_error(&self) -> bool {
        !self.is_lex_error()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { .. } => "UnexpectedCharacter",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnknownOperator { .. } => "UnknownOperator",
            ErrorImpl::TrailingInput { .. } => "TrailingInput",
            ErrorImpl::UnclosedGroup { .. } => "UnclosedGroup",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedCharacter { character } => {
                ErrorTip::Suggestion(format!("Unexpected character `{}`", character))
            }
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected a value or a prefix operator",
                token
            )),
            ErrorImpl::UnknownOperator { operator } => ErrorTip::Suggestion(format!(
                "Operator `{}` is not defined by the grammar",
                operator
            )),
            ErrorImpl::TrailingInput { token } => ErrorTip::Suggestion(format!(
                "Unexpected `{}` after the end of the expression",
                token
            )),
            ErrorImpl::UnclosedGroup { token } => ErrorTip::Suggestion(format!(
                "Expected `)` but found `{}`",
                token
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Expression nests deeper than {} levels",
                limit
            )),
        }
    }
}

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
    #[error("unexpected character: {character:?}")]
    UnexpectedCharacter { character: char },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unknown operator: {operator:?}")]
    UnknownOperator { operator: String },
    #[error("trailing input: {token:?}")]
    TrailingInput { token: String },
    #[error("unclosed group, found: {token:?}")]
    UnclosedGroup { token: String },
    #[error("expression nested more than {limit} levels deep")]
    NestingTooDeep { limit: usize },
}
