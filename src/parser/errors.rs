use crate::lexer::LexError;
use crate::parser::UnaryOp;
use thiserror::Error;

/// Parser error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// `found` is the lexeme seen where `expected` should have been
    #[error("Missing {expected}.")]
    Missing { expected: &'static str, found: String },

    /// A token the scanner could not form, or a constant that does not fit
    #[error("Unrecognized Input Pattern")]
    UnrecognizedInput {
        lexeme: String,
        cause: Option<LexError>,
    },

    #[error("Undeclared Variable: {0}")]
    UndeclaredVariable(String),

    #[error("Variable Redefinition: {0}")]
    Redeclared(String),

    #[error("Illegal use of sign '{op}' before identifier {name}")]
    SignedIdentifier { op: UnaryOp, name: String },

    #[error("Illegal use of sign '{0}' before a string constant")]
    SignedString(UnaryOp),

    #[error("Illegal use of 'not' before a numeric constant")]
    NotOnNumber,

    #[error("Illegal use of sign '{0}' before a boolean constant")]
    SignedBoolean(UnaryOp),

    /// Coarse message added by an enclosing rule after a nested failure
    #[error("{0}")]
    Context(&'static str),

    #[error("Nesting depth exceeds the limit of {0}")]
    NestingTooDeep(usize),
}

impl ParseError {
    pub(crate) fn missing(expected: &'static str, found: &str) -> Self {
        ParseError::Missing {
            expected,
            found: found.to_string(),
        }
    }

    /// Raw lexeme printed after the message for malformed tokens
    #[must_use]
    pub fn offending_lexeme(&self) -> Option<&str> {
        match self {
            ParseError::UnrecognizedInput { lexeme, .. } => Some(lexeme),
            _ => None,
        }
    }
}
