use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("invalid board: {0}")]
    InvalidBoard(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported board input: {0}")]
    UnsupportedInputType(String),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
