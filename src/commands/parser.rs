//! Karma command parser
//!
//! Syntax: `<trigger> <phrase> [...]`
//!
//! The phrase carries both the target and the operation:
//! - `name++` / `name--` add or remove one point
//! - `name+=N` / `name-=N` add or remove N points
//! - anything else is a query

use super::{normalize, KarmaCommand, Operation, ParseError};

/// Parse command text, degrading malformed multipliers to an amount of 0
///
/// `name+=abc` parses as `Increase(0)`, which callers treat as a query.
pub fn parse(text: &str) -> Result<KarmaCommand, ParseError> {
    let phrase = phrase(text)?;
    let operation = match operation_kind(phrase) {
        Kind::IncreaseOne => Operation::Increase(1),
        Kind::IncreaseBy => Operation::Increase(extract_amount(phrase)),
        Kind::DecreaseOne => Operation::Decrease(1),
        Kind::DecreaseBy => Operation::Decrease(extract_amount(phrase)),
        Kind::Query => Operation::Query,
    };

    Ok(KarmaCommand::new(normalize(phrase), operation))
}

/// Parse command text, rejecting `+=` / `-=` multipliers that hold no number
pub fn parse_strict(text: &str) -> Result<KarmaCommand, ParseError> {
    let phrase = phrase(text)?;
    let strict_amount = || {
        multiplier(phrase).ok_or_else(|| ParseError::InvalidAmount(phrase.to_string()))
    };

    let operation = match operation_kind(phrase) {
        Kind::IncreaseOne => Operation::Increase(1),
        Kind::IncreaseBy => Operation::Increase(strict_amount()?),
        Kind::DecreaseOne => Operation::Decrease(1),
        Kind::DecreaseBy => Operation::Decrease(strict_amount()?),
        Kind::Query => Operation::Query,
    };

    Ok(KarmaCommand::new(normalize(phrase), operation))
}

/// Extract the multiplier of a `+=` / `-=` phrase
///
/// Takes the segment after the first `=` (up to any following `=`), keeps
/// only its digits and parses them. Returns 0 when nothing usable is left.
pub fn extract_amount(phrase: &str) -> i64 {
    multiplier(phrase).unwrap_or(0)
}

fn multiplier(phrase: &str) -> Option<i64> {
    let segment = phrase.split('=').nth(1)?;
    let digits: String = segment.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().ok()
}

/// The token the command is extracted from (index 1; index 0 is the trigger)
fn phrase(text: &str) -> Result<&str, ParseError> {
    match text.split_whitespace().nth(1) {
        Some(phrase) if !phrase.is_empty() => Ok(phrase),
        _ => Err(ParseError::MissingPhrase),
    }
}

enum Kind {
    IncreaseOne,
    IncreaseBy,
    DecreaseOne,
    DecreaseBy,
    Query,
}

/// First match wins, in this exact order
fn operation_kind(phrase: &str) -> Kind {
    if phrase.contains("++") {
        Kind::IncreaseOne
    } else if phrase.contains("+=") {
        Kind::IncreaseBy
    } else if phrase.contains("--") {
        Kind::DecreaseOne
    } else if phrase.contains("-=") {
        Kind::DecreaseBy
    } else {
        Kind::Query
    }
}
