//! # datemath
//!
//! Bidirectional conversion between compact date-math expressions
//! (`now-1d/y`, `now+60s/h`) and absolute civil timestamps.
//!
//! An expression anchors on the literal `now`, which stands for a
//! caller-supplied reference timestamp, and chains offset and rounding
//! operations onto it. [`parse`] resolves an expression against a reference;
//! [`stringify`] runs the inverse direction, reconstructing a shorthand
//! expression from the difference between two timestamps.
//!
//! All functions are pure, with no clock access and no shared state. The
//! caller provides the reference time, keeping every call deterministic and
//! safe to issue concurrently. Timestamps are
//! [`chrono::NaiveDateTime`] values, so the result inherits whatever zone
//! semantics the reference carried.
//!
//! ## Modules
//!
//! - [`grammar`]: expression acceptance check and operation extraction
//! - [`engine`]: ordered application of operations to the reference
//! - [`round`]: round-to-nearest calendar boundaries
//! - [`stringify`]: timestamp difference back to shorthand
//! - [`expr`]: unit, operator, and operation vocabulary
//! - [`error`]: error types

pub mod engine;
pub mod error;
pub mod expr;
pub mod grammar;
pub mod round;
pub mod stringify;

pub use engine::{apply, parse};
pub use error::DateMathError;
pub use expr::{Operation, Operator, Unit};
pub use grammar::{extract_operations, validate, EXPRESSION_GRAMMAR};
pub use round::round_to_nearest;
pub use stringify::stringify;
