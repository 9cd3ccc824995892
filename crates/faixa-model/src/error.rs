use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid A1 range '{0}'")]
    InvalidRange(String),
    #[error("ranges are 1-based, got row {row} column {column}")]
    ZeroOrigin { row: usize, column: usize },
    #[error("unknown output schema '{0}' (expected full or legacy)")]
    UnknownSchema(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
