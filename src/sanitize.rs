//! Normalization of raw coordinate text and notation detection.
//!
//! After sanitization the text only contains ASCII digits, `.`, `,`, `-`, whitespace and the
//! letters `d`, `m`, `c`, `n`, `s`, `e`, `w`. The second mark becomes `c` rather than `s` so that
//! it cannot be confused with the south cardinal letter; the DMS extractor turns it back into
//! `s` once cardinal letters have been consumed.

use crate::error::ParseError;

/// The notation a piece of coordinate text is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Decimal degrees.
    Dd,
    /// Degrees, minutes and seconds.
    Dms,
}

/// Map a single character into the sanitized alphabet, or drop it.
fn normalize_char(c: char) -> Option<char> {
    match c {
        '°' | 'º' => Some('d'),
        '\'' | '′' => Some('m'),
        '"' | '″' => Some('c'),
        '−' => Some('-'),
        '0'..='9' | '.' | ',' | '-' => Some(c),
        c if c.is_whitespace() => Some(c),
        c => match c.to_ascii_lowercase() {
            l @ 'd' | l @ 'm' | l @ 'c' | l @ 'n' | l @ 's' | l @ 'e' | l @ 'w' => Some(l),
            _ => None,
        },
    }
}

/// Lower-case the text, map the degree/minute/second marks and drop everything outside of the
/// sanitized alphabet.
pub fn sanitize(text: &str) -> String {
    text.chars().filter_map(normalize_char).collect()
}

/// Replace the typographic minus sign with `-`, keeping every other character.
pub fn normalize_minus(text: &str) -> String {
    text.replace('−', "-")
}

/// Fail on the first character that `sanitize` would silently drop.
pub fn check(text: &str) -> Result<(), ParseError> {
    match text.char_indices().find(|(_, c)| normalize_char(*c).is_none()) {
        Some((offset, c)) => Err(ParseError::InvalidCharacter {
            token: c.to_string(),
            offset,
        }),
        None => Ok(()),
    }
}

/// Decide between DD and DMS from sanitized text.
///
/// Any unit letter (`d`, `m`, `s`) selects DMS. Cardinal letters select it as well, since only
/// the DMS extractor knows how to turn them into a sign.
pub fn detect(sanitized: &str) -> Notation {
    if sanitized.contains(&['d', 'm', 's', 'n', 'e', 'w'][..]) {
        Notation::Dms
    } else {
        Notation::Dd
    }
}
