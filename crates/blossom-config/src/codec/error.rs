//! Errors raised while reading or converting JSON5.

use std::fmt::Display;
use thiserror::Error;

/// A JSON5 syntax error or a serde conversion failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Json5Error {
    /// The text is not valid JSON5.
    #[error("{message} at line {line} column {column}")]
    Syntax {
        /// What the reader expected or found.
        message: String,
        /// One-based line of the offending character.
        line: usize,
        /// One-based column of the offending character.
        column: usize,
    },

    /// A value did not fit the target type, or could not be represented.
    #[error("{0}")]
    Message(String),
}

impl serde::ser::Error for Json5Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}

impl serde::de::Error for Json5Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Message(msg.to_string())
    }
}
