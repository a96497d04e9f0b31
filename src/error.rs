//! Errors reported by the strict parsing entry points.

use crate::dms::{Axis, Unit};
use thiserror::Error;

/// Reason a coordinate was rejected by strict parsing.
///
/// The `Display` output is the human-readable reason; [`ParseError::offending_token`] gives the
/// piece of input that triggered it, when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no coordinate value found")]
    Empty,

    #[error("unexpected character `{token}` at byte {offset}")]
    InvalidCharacter { token: String, offset: usize },

    #[error("expected {expected} coordinate value(s), found {found}")]
    MissingValue { expected: usize, found: usize },

    #[error("unexpected extra value `{0}`")]
    TrailingValue(String),

    #[error("`{0}` does not contain a number")]
    NoValue(String),

    #[error("`{0}` mixes numbers with and without a degree, minute or second mark")]
    StrayNumber(String),

    #[error("{unit} given more than once in `{token}`")]
    DuplicateUnit { unit: Unit, token: String },

    #[error("`{0}` carries cardinal letters for both latitude and longitude")]
    MixedCardinal(String),

    #[error("both `{first}` and `{second}` are tagged as {axis}")]
    AmbiguousCardinal {
        axis: Axis,
        first: String,
        second: String,
    },

    #[error("`{token}` was given as {expected} but is tagged for the other axis")]
    AxisMismatch { expected: Axis, token: String },

    #[error("`{0}` is not a finite number")]
    NonFinite(String),
}

impl ParseError {
    /// The piece of input responsible for the error.
    pub fn offending_token(&self) -> Option<&str> {
        use ParseError::*;

        let token = match self {
            Empty | MissingValue { .. } => return None,
            InvalidCharacter { token, .. } => token,
            TrailingValue(token) | NoValue(token) | StrayNumber(token) => token,
            DuplicateUnit { token, .. } | AxisMismatch { token, .. } => token,
            MixedCardinal(token) | NonFinite(token) => token,
            AmbiguousCardinal { second, .. } => second,
        };
        Some(token.as_str())
    }
}
