//! Extraction of coordinates written in decimal degrees.

use crate::{error::ParseError, parse, sanitize};
use nom::combinator::map_res;
use tracing::debug;

fn number(i: parse::Input) -> parse::Result<f64> {
    map_res(parse::signed_decimal, |s: &str| s.parse::<f64>())(i)
}

/// Every decimal number in the text, left to right. A typographic minus counts as a sign.
pub fn numbers(text: &str) -> Vec<f64> {
    parse::scan_all(&sanitize::normalize_minus(text), number)
}

/// Latitude and longitude from the first two numbers in the text. Missing values are `0`.
pub fn extract(text: &str) -> [f64; 2] {
    extract_values(&numbers(text))
}

/// Latitude and longitude from a positional container; missing values are `0` and anything
/// past the second value is ignored.
pub fn extract_values(values: &[f64]) -> [f64; 2] {
    if values.len() < 2 {
        debug!(found = values.len(), "padding decimal degrees with zero");
    }
    let mut pair = [0.; 2];
    for (slot, value) in pair.iter_mut().zip(values) {
        *slot = *value;
    }
    pair
}

/// Exactly `expected` numbers, with nothing but separators around them.
pub fn extract_strict(text: &str, expected: usize) -> Result<Vec<f64>, ParseError> {
    sanitize::check(text)?;

    let text = sanitize::normalize_minus(text);
    let found = parse::scan_all(&text, parse::signed_decimal);
    if found.is_empty() {
        return Err(ParseError::Empty);
    }
    if let Some(extra) = found.get(expected) {
        return Err(ParseError::TrailingValue(extra.to_string()));
    }
    if found.len() < expected {
        return Err(ParseError::MissingValue {
            expected,
            found: found.len(),
        });
    }

    found
        .into_iter()
        .map(|token| match token.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ParseError::NonFinite(token.to_string())),
        })
        .collect()
}
