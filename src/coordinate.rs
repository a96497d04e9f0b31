//! The coordinate value and the parsing pipeline that builds it.

use crate::{
    dd, dms,
    dms::Axis,
    error::ParseError,
    format::{self, FormatKind, FormatOptions},
    sanitize::{self, Notation},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{debug, trace};

/// The shapes of input a [`Coordinate`] can be built from.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateInput {
    /// Latitude and longitude in one piece of text, DD or DMS.
    RawText(String),
    /// Up to two numbers, latitude first.
    Values(Vec<f64>),
    /// Latitude and longitude as numbers.
    Pair(f64, f64),
    /// Latitude and longitude as separate pieces of text, each DD or DMS.
    PointPair(String, String),
}

impl From<&str> for CoordinateInput {
    fn from(text: &str) -> Self {
        CoordinateInput::RawText(text.to_string())
    }
}

impl From<String> for CoordinateInput {
    fn from(text: String) -> Self {
        CoordinateInput::RawText(text)
    }
}

impl From<(f64, f64)> for CoordinateInput {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        CoordinateInput::Pair(latitude, longitude)
    }
}

impl From<[f64; 2]> for CoordinateInput {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        CoordinateInput::Pair(latitude, longitude)
    }
}

impl From<Vec<f64>> for CoordinateInput {
    fn from(values: Vec<f64>) -> Self {
        CoordinateInput::Values(values)
    }
}

impl From<&[f64]> for CoordinateInput {
    fn from(values: &[f64]) -> Self {
        CoordinateInput::Values(values.to_vec())
    }
}

impl From<(&str, &str)> for CoordinateInput {
    fn from((latitude, longitude): (&str, &str)) -> Self {
        CoordinateInput::PointPair(latitude.to_string(), longitude.to_string())
    }
}

impl From<(String, String)> for CoordinateInput {
    fn from((latitude, longitude): (String, String)) -> Self {
        CoordinateInput::PointPair(latitude, longitude)
    }
}

/// A latitude/longitude pair in signed decimal degrees; north and east are positive.
///
/// Both values are always finite. They are fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// Run text through notation detection and the matching extractor.
fn extract(text: &str) -> Vec<f64> {
    let notation = sanitize::detect(&sanitize::sanitize(text));
    trace!(text, ?notation, "extracting coordinate values");
    match notation {
        Notation::Dd => dd::extract(text).to_vec(),
        Notation::Dms => dms::extract(text),
    }
}

fn extract_strict(text: &str, expected: usize) -> Result<Vec<(Axis, f64)>, ParseError> {
    match sanitize::detect(&sanitize::sanitize(text)) {
        Notation::Dd => Ok(dd::extract_strict(text, expected)?
            .into_iter()
            .map(|value| (Axis::Unclassified, value))
            .collect()),
        Notation::Dms => dms::extract_strict(text, expected),
    }
}

/// Parse one point of a two-argument input, checking it is not tagged for the other axis.
fn extract_point_strict(text: &str, expected: Axis) -> Result<f64, ParseError> {
    let (axis, value) = extract_strict(text, 1)?[0];
    if axis != Axis::Unclassified && axis != expected {
        return Err(ParseError::AxisMismatch {
            expected,
            token: text.to_string(),
        });
    }
    Ok(value)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        debug!(value, "replacing non-finite value with zero");
        0.
    }
}

impl Coordinate {
    /// Build a coordinate from any supported input, never failing. Whatever cannot be read
    /// becomes `0.0`.
    pub fn new(input: impl Into<CoordinateInput>) -> Self {
        let input = input.into();
        trace!(?input, "parsing coordinate");

        let (latitude, longitude) = match &input {
            CoordinateInput::RawText(text) => {
                let values = extract(text);
                let pair = dd::extract_values(&values);
                (pair[0], pair[1])
            }
            CoordinateInput::Values(values) => {
                let pair = dd::extract_values(values);
                (pair[0], pair[1])
            }
            CoordinateInput::Pair(latitude, longitude) => (*latitude, *longitude),
            CoordinateInput::PointPair(latitude, longitude) => {
                let first = |text: &str| extract(text).first().copied().unwrap_or_default();
                (first(latitude.as_str()), first(longitude.as_str()))
            }
        };

        Coordinate {
            latitude: finite_or_zero(latitude),
            longitude: finite_or_zero(longitude),
        }
    }

    /// Build a coordinate, rejecting input that `new` would have to guess about: missing or
    /// extra values, unknown characters, conflicting cardinal letters and non-finite numbers.
    pub fn parse_strict(input: impl Into<CoordinateInput>) -> Result<Self, ParseError> {
        let (latitude, longitude) = match input.into() {
            CoordinateInput::RawText(text) => {
                let values = extract_strict(&text, 2)?;
                (values[0].1, values[1].1)
            }
            CoordinateInput::Values(values) => match values.as_slice() {
                [latitude, longitude] => (*latitude, *longitude),
                [_, _, extra, ..] => return Err(ParseError::TrailingValue(extra.to_string())),
                _ => {
                    return Err(ParseError::MissingValue {
                        expected: 2,
                        found: values.len(),
                    })
                }
            },
            CoordinateInput::Pair(latitude, longitude) => (latitude, longitude),
            CoordinateInput::PointPair(latitude, longitude) => (
                extract_point_strict(&latitude, Axis::Latitude)?,
                extract_point_strict(&longitude, Axis::Longitude)?,
            ),
        };

        for value in [latitude, longitude].iter() {
            if !value.is_finite() {
                return Err(ParseError::NonFinite(value.to_string()));
            }
        }
        Ok(Coordinate {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Render as DD or DMS. `decimals` defaults to 6 for DD and to 3 (of a second) for DMS.
    pub fn format(&self, kind: impl Into<FormatKind>, decimals: Option<u32>) -> String {
        self.format_with(&FormatOptions::new(kind, decimals))
    }

    pub fn format_with(&self, options: &FormatOptions) -> String {
        format::render(self.latitude, self.longitude, options)
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Coordinate {
            latitude: 0.,
            longitude: 0.,
        }
    }
}

/// Decimal degrees, six places unless the formatter asks for a precision: `{:.2}`.
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let decimals = f.precision().map(|p| p as u32);
        f.write_str(&self.format(FormatKind::Dd, decimals))
    }
}

/// Strict parsing of a single piece of text.
impl FromStr for Coordinate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Coordinate::parse_strict(s)
    }
}
