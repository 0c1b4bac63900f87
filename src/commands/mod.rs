//! Command interpretation module
//!
//! Turns free-form chat text into a karma command: a normalized counter key
//! and the operation to apply to it. Everything in here is a pure function
//! of its input, so it needs no synchronization.

mod key;
mod parser;

pub use key::normalize;
pub use parser::{extract_amount, parse, parse_strict};

use thiserror::Error;

/// Operation requested on a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Add `amount` to the counter
    Increase(i64),
    /// Subtract `amount` from the counter
    Decrease(i64),
    /// Read the counter without touching it
    Query,
}

impl Operation {
    /// Whether applying this operation changes the counter.
    ///
    /// An increase or decrease of zero is a no-op and is treated as a query.
    pub fn is_mutation(&self) -> bool {
        match self {
            Operation::Increase(amount) | Operation::Decrease(amount) => *amount > 0,
            Operation::Query => false,
        }
    }
}

/// A parsed karma command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KarmaCommand {
    /// Normalized counter key
    pub key: String,

    /// Operation to apply
    pub operation: Operation,
}

impl KarmaCommand {
    /// Create a new command
    pub fn new(key: impl Into<String>, operation: Operation) -> Self {
        KarmaCommand {
            key: key.into(),
            operation,
        }
    }
}

/// Errors raised while interpreting command text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text has no second token to extract a target from
    #[error("could not identify the target of the command")]
    MissingPhrase,

    /// A `+=` / `-=` multiplier holds no usable number (strict parsing only)
    #[error("invalid amount in '{0}'")]
    InvalidAmount(String),
}
