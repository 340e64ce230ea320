use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("{name} {value} isn't greater than or equal to 1")]
    InvalidArgument { name: &'static str, value: usize },

    #[error("index {index} is out of range for history of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("column {column} doesn't exist, there are {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("expected {expected} columns, found {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    #[error("failed to parse '{field}' as a number: {source}")]
    ParseValue {
        field: String,
        source: std::num::ParseFloatError,
    },
}
