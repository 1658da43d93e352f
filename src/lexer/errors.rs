use thiserror::Error;

/// Why the scanner produced an error item
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated comment")]
    UnterminatedComment,

    #[error("malformed real constant")]
    MalformedReal,

    #[error("unrecognized character '{0}'")]
    UnrecognizedChar(char),
}
