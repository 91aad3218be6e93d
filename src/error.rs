use thiserror::Error;

/// Failures produced while decoding the text maze format.
///
/// A failed decode never leaves a half-built grid behind; the caller keeps
/// whatever grid it had before the load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("no maze body lines found")]
    MissingBody,
    #[error("maze body has {0} lines, expected an odd count of at least 3")]
    TruncatedBody(usize),
    #[error("first body line contains no horizontal wall characters")]
    MissingColumns,
    #[error("body line {line} is {found} characters wide, expected {expected}")]
    RaggedLine {
        line: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("maze file i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid maze file: {0}")]
    Parse(#[from] ParseError),
    #[error("start and end cells must both be set before solving")]
    MissingEndpoints,
}

pub type Result<T> = std::result::Result<T, Error>;
