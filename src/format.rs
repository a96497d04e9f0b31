//! Rendering coordinates as DD or DMS text.

use crate::dms::Dms;
use serde::{Deserialize, Serialize};

/// Output notation. Parsing a kind never fails: anything other than `dms` (in any case) means
/// decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormatKind {
    Dd,
    Dms,
}

impl FormatKind {
    /// Decimal places used when none are requested: six for DD, three (of a second) for DMS.
    pub fn default_decimals(self) -> u32 {
        match self {
            FormatKind::Dd => 6,
            FormatKind::Dms => 3,
        }
    }
}

impl Default for FormatKind {
    fn default() -> Self {
        FormatKind::Dd
    }
}

impl From<&str> for FormatKind {
    fn from(kind: &str) -> Self {
        if kind.trim().eq_ignore_ascii_case("dms") {
            FormatKind::Dms
        } else {
            FormatKind::Dd
        }
    }
}

impl From<String> for FormatKind {
    fn from(kind: String) -> Self {
        FormatKind::from(kind.as_str())
    }
}

impl From<FormatKind> for String {
    fn from(kind: FormatKind) -> Self {
        match kind {
            FormatKind::Dd => "dd".to_string(),
            FormatKind::Dms => "dms".to_string(),
        }
    }
}

/// How a coordinate should be rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    pub kind: FormatKind,
    /// Overrides `FormatKind::default_decimals`.
    pub decimals: Option<u32>,
}

impl FormatOptions {
    pub fn new(kind: impl Into<FormatKind>, decimals: Option<u32>) -> Self {
        FormatOptions {
            kind: kind.into(),
            decimals,
        }
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
            .unwrap_or_else(|| self.kind.default_decimals())
    }
}

/// Round half away from zero to `decimals` places. Values that cannot be scaled without
/// overflowing, or precision beyond what an `f64` holds, are returned unchanged.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if decimals > 15 {
        return value;
    }
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// `"<lat>, <lon>"` with both values rounded.
pub fn dd(latitude: f64, longitude: f64, decimals: u32) -> String {
    format!(
        "{}, {}",
        round_to(latitude, decimals),
        round_to(longitude, decimals)
    )
}

/// `"<lat>N|S <lon>E|W"` with seconds rounded.
pub fn dms(latitude: f64, longitude: f64, decimals: u32) -> String {
    let lat_hemisphere = if latitude < 0. { 'S' } else { 'N' };
    let lon_hemisphere = if longitude < 0. { 'W' } else { 'E' };
    format!(
        "{}{} {}{}",
        Dms::from_decimal(latitude, decimals),
        lat_hemisphere,
        Dms::from_decimal(longitude, decimals),
        lon_hemisphere
    )
}

pub fn render(latitude: f64, longitude: f64, options: &FormatOptions) -> String {
    match options.kind {
        FormatKind::Dd => dd(latitude, longitude, options.decimals()),
        FormatKind::Dms => dms(latitude, longitude, options.decimals()),
    }
}
