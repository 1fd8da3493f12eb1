//! Error types for date-math operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DateMathError {
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    #[error("Malformed operation token: {0}")]
    MalformedToken(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, DateMathError>;
