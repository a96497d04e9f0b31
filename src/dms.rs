//! Extraction of coordinates written in degrees, minutes and seconds.
//!
//! Sanitized text is processed in two passes. [`tokenize`] splits it into point tokens, then
//! [`classify`] decides for each token which axis it belongs to (from its cardinal letter, if it
//! has one) and decodes its unit-tagged numbers. [`order`] finally puts latitude first.

use crate::{error::ParseError, format, parse, sanitize};
use derive_try_from_primitive::TryFromPrimitive;
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, one_of},
    combinator::{map, map_res},
    error::context,
    sequence::pair,
};
use std::{convert::TryFrom, fmt};
use tracing::{debug, trace};

/// Unit mark attached to a number inside a point. The discriminant is the sanitized letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum Unit {
    Degrees = 0x64, // 'd'
    Minutes = 0x6d, // 'm'
    Seconds = 0x73, // 's'
}

impl Unit {
    pub fn parse(i: parse::Input) -> parse::Result<Self> {
        use nom::error::ErrorKind;

        let parser = map_res(one_of("dms"), |c: char| {
            Self::try_from(c as u8).map_err(|_| ErrorKind::Alt)
        });
        context("Unit", parser)(i)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Unit::Degrees => "degrees",
            Unit::Minutes => "minutes",
            Unit::Seconds => "seconds",
        };
        f.write_str(name)
    }
}

/// The axis a point was assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
    /// No cardinal letter; the axis follows from the point's position.
    Unclassified,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
            Axis::Unclassified => "unclassified",
        };
        f.write_str(name)
    }
}

/// An unsigned angle split into whole degrees, whole minutes and fractional seconds.
///
/// Degrees and minutes are floored but kept as `f64`, so angles beyond the range of any integer
/// type survive unclamped.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    pub fn to_decimal(&self) -> f64 {
        self.degrees + (self.minutes * 60. + self.seconds) / 3600.
    }

    /// Split the absolute value of a decimal angle, rounding the seconds to `decimals` places.
    /// Seconds that round up to a full minute carry over, as do minutes into degrees.
    pub fn from_decimal(value: f64, decimals: u32) -> Self {
        let value = value.abs();
        let mut degrees = value.trunc();
        let total = value.fract() * 3600.;
        let mut minutes = (total / 60.).floor();
        let mut seconds = format::round_to((total - minutes * 60.).max(0.), decimals);

        if seconds >= 60. {
            seconds = format::round_to(seconds - 60., decimals);
            minutes += 1.;
        }
        if minutes >= 60. {
            minutes -= 60.;
            degrees += 1.;
        }

        Dms {
            degrees,
            minutes,
            seconds,
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}°{}'{}\"", self.degrees, self.minutes, self.seconds)
    }
}

/// One coordinate component after classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// The sanitized token the point was read from.
    pub token: String,
    pub axis: Axis,
    pub negative: bool,
    /// Set when the token has letters for both axes; the latitude letter won.
    pub mixed_cardinals: bool,
    /// Unit-tagged numbers, if there were any.
    pub dms: Option<Dms>,
    /// Numbers without a unit mark.
    pub bare: Vec<f64>,
    pub duplicate_unit: Option<Unit>,
}

impl Point {
    /// Signed decimal degrees. Unit-tagged numbers take precedence; failing those, the first
    /// plain number is read as decimal degrees.
    pub fn value(&self) -> Option<f64> {
        let magnitude = match (self.dms, self.bare.first()) {
            (Some(dms), _) => dms.to_decimal(),
            (None, Some(&value)) => value,
            (None, None) => return None,
        };
        Some(if self.negative { -magnitude } else { magnitude })
    }

    /// Like `value`, but reject anything the lenient reading would have to guess about.
    pub fn validate(&self) -> Result<f64, ParseError> {
        if self.mixed_cardinals {
            return Err(ParseError::MixedCardinal(self.token.clone()));
        }
        if let Some(unit) = self.duplicate_unit {
            return Err(ParseError::DuplicateUnit {
                unit,
                token: self.token.clone(),
            });
        }
        if (self.dms.is_some() && !self.bare.is_empty()) || self.bare.len() > 1 {
            return Err(ParseError::StrayNumber(self.token.clone()));
        }

        let value = self
            .value()
            .ok_or_else(|| ParseError::NoValue(self.token.clone()))?;
        if !value.is_finite() {
            return Err(ParseError::NonFinite(self.token.clone()));
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Piece {
    Tagged(f64, Unit),
    Bare(f64),
}

fn number(i: parse::Input) -> parse::Result<f64> {
    map_res(parse::unsigned_decimal, |s: &str| s.parse::<f64>())(i)
}

fn piece(i: parse::Input) -> parse::Result<Piece> {
    let tagged = map(pair(number, Unit::parse), |(value, unit)| {
        Piece::Tagged(value, unit)
    });
    context("DMS component", alt((tagged, map(number, Piece::Bare))))(i)
}

fn is_point_char(c: char) -> bool {
    matches!(
        c,
        '0'..='9' | '.' | '-' | 'd' | 'm' | 'c' | 'n' | 's' | 'e' | 'w'
    )
}

fn point_run(i: parse::Input) -> parse::Result<&str> {
    context("Point", take_while1(is_point_char))(i)
}

fn has_cardinal(token: &str) -> bool {
    token.contains(&['n', 's', 'e', 'w'][..])
}

fn unit_rank(c: char) -> Option<u8> {
    match c {
        'd' => Some(0),
        'm' => Some(1),
        'c' => Some(2),
        _ => None,
    }
}

/// Whether `run` carries on the angle in `previous`, as `12m` does after `49d`.
fn continues(previous: &str, run: &str) -> bool {
    if has_cardinal(previous) || !run.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    let last = previous.chars().last().and_then(unit_rank);
    let first = run
        .chars()
        .find(|c| !(c.is_ascii_digit() || *c == '.'))
        .and_then(unit_rank);
    match (last, first) {
        (Some(last), Some(first)) => first > last,
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment<'a> {
    Run(&'a str),
    Comma,
}

fn segment(i: parse::Input) -> parse::Result<Segment> {
    alt((map(point_run, Segment::Run), map(char(','), |_| Segment::Comma)))(i)
}

/// Split sanitized text into point tokens, in input order.
///
/// Runs are normally separated by whitespace or commas, with two exceptions so that spaced-out
/// input such as `49d 12m n, 16d 36m e` or `n 49d e 16d` stays readable. Both only apply when
/// nothing but whitespace lies between the two runs; a comma always ends a point.
///
/// * a single character without a digit (a detached `n`, a lone `-` or `d`) joins the previous
///   point, or prefixes the next one if the previous point already has a cardinal letter;
/// * a run starting with a smaller unit than the one the previous point ended on joins it.
///
/// Longer runs without a digit are leftovers of words (`de` from `Latitude`) and are skipped.
/// A word that sanitizes to a single cardinal letter, such as `Lon` becoming `n`, is still read
/// as that letter.
pub fn tokenize(sanitized: &str) -> Vec<String> {
    let mut points: Vec<String> = Vec::new();
    let mut pending = String::new();
    let mut after_comma = false;

    for found in parse::scan_all(sanitized, segment) {
        let run = match found {
            Segment::Run(run) => run,
            Segment::Comma => {
                after_comma = true;
                continue;
            }
        };

        let has_digit = run.chars().any(|c| c.is_ascii_digit());
        if !has_digit && run.chars().count() > 1 {
            debug!(run, "skipping letters without a number");
            continue;
        }

        let joins_previous = match points.last() {
            Some(last) if pending.is_empty() && !after_comma => {
                if has_digit {
                    continues(last, run)
                } else {
                    !has_cardinal(last)
                }
            }
            _ => false,
        };
        after_comma = false;

        if joins_previous {
            if let Some(last) = points.last_mut() {
                last.push_str(run);
            }
        } else if has_digit {
            points.push(format!("{}{}", pending, run));
            pending.clear();
        } else {
            pending.push_str(run);
        }
    }

    trace!(?points, "tokenized DMS points");
    points
}

/// Assign a token to an axis and decode its numbers.
pub fn classify(token: &str) -> Point {
    let latitude = token.contains(&['n', 's'][..]);
    let longitude = token.contains(&['e', 'w'][..]);

    // Cardinal letters override any minus sign
    let (axis, negative) = if latitude {
        (Axis::Latitude, token.contains('s'))
    } else if longitude {
        (Axis::Longitude, token.contains('w'))
    } else {
        (Axis::Unclassified, token.starts_with('-'))
    };

    // With the cardinal letters gone, the second placeholder can become a unit again
    let body: String = token
        .chars()
        .filter_map(|c| match c {
            'n' | 's' | 'e' | 'w' | '-' => None,
            'c' => Some('s'),
            c => Some(c),
        })
        .collect();

    let mut dms: Option<Dms> = None;
    let mut bare = Vec::new();
    let mut seen = Vec::new();
    let mut duplicate_unit = None;

    for found in parse::scan_all(&body, piece) {
        match found {
            Piece::Tagged(value, unit) => {
                if seen.contains(&unit) {
                    duplicate_unit.get_or_insert(unit);
                } else {
                    seen.push(unit);
                }

                let triple = dms.get_or_insert_with(Dms::default);
                match unit {
                    Unit::Degrees => triple.degrees = value.floor(),
                    Unit::Minutes => triple.minutes = value.floor(),
                    Unit::Seconds => triple.seconds = value,
                }
            }
            Piece::Bare(value) => bare.push(value),
        }
    }

    Point {
        token: token.to_string(),
        axis,
        negative,
        mixed_cardinals: latitude && longitude,
        dms,
        bare,
        duplicate_unit,
    }
}

/// Put latitude-tagged points first, longitude-tagged points next and untagged points last.
///
/// When nothing was tagged as latitude, the first untagged point takes its place, so plain
/// `lat lon` input keeps its conventional order.
pub fn order(points: Vec<Point>) -> Vec<Point> {
    let (mut latitudes, rest): (Vec<_>, Vec<_>) = points
        .into_iter()
        .partition(|p| p.axis == Axis::Latitude);
    let (longitudes, mut unassigned): (Vec<_>, Vec<_>) =
        rest.into_iter().partition(|p| p.axis == Axis::Longitude);

    if latitudes.is_empty() && !unassigned.is_empty() {
        latitudes.push(unassigned.remove(0));
    }

    latitudes
        .into_iter()
        .chain(longitudes)
        .chain(unassigned)
        .collect()
}

/// Read up to two signed decimal-degree values, latitude first. Never fails; points without a
/// number are dropped.
pub fn extract(text: &str) -> Vec<f64> {
    let sanitized = sanitize::sanitize(text);
    let points: Vec<Point> = tokenize(&sanitized)
        .iter()
        .take(2)
        .map(|token| classify(token))
        .collect();

    order(points)
        .into_iter()
        .filter_map(|point| {
            let value = point.value();
            if value.is_none() {
                debug!(token = %point.token, "dropping point without a numeric value");
            }
            value
        })
        .collect()
}

/// Read exactly `expected` points, latitude first, rejecting anything ambiguous.
///
/// Each value comes with the axis its cardinal letter named, or `Axis::Unclassified`.
pub fn extract_strict(text: &str, expected: usize) -> Result<Vec<(Axis, f64)>, ParseError> {
    sanitize::check(text)?;

    let sanitized = sanitize::sanitize(text);
    let tokens = tokenize(&sanitized);
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    if let Some(extra) = tokens.get(expected) {
        return Err(ParseError::TrailingValue(extra.clone()));
    }

    let points: Vec<Point> = tokens.iter().map(|token| classify(token)).collect();
    for (n, point) in points.iter().enumerate() {
        if point.axis == Axis::Unclassified {
            continue;
        }
        if let Some(other) = points[n + 1..].iter().find(|p| p.axis == point.axis) {
            return Err(ParseError::AmbiguousCardinal {
                axis: point.axis,
                first: point.token.clone(),
                second: other.token.clone(),
            });
        }
    }

    let values = order(points)
        .iter()
        .map(|point| point.validate().map(|value| (point.axis, value)))
        .collect::<Result<Vec<_>, ParseError>>()?;

    if values.len() < expected {
        return Err(ParseError::MissingValue {
            expected,
            found: values.len(),
        });
    }
    Ok(values)
}

#[cfg(test)]
mod test {
    use super::{classify, extract, extract_strict, order, tokenize, Axis, Dms, Unit};
    use crate::{error::ParseError, sanitize::sanitize};
    use std::convert::TryFrom;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "{} is not close to {}",
            actual,
            expected
        );
    }

    const BRNO_LAT: f64 = 49. + (12. * 60. + 8.8) / 3600.;
    const BRNO_LON: f64 = 16. + (36. * 60. + 54.2) / 3600.;

    #[test]
    fn test_unit_from_letter() {
        assert_eq!(Unit::try_from(b'd'), Ok(Unit::Degrees));
        assert_eq!(Unit::try_from(b'm'), Ok(Unit::Minutes));
        assert_eq!(Unit::try_from(b's'), Ok(Unit::Seconds));
        assert!(Unit::try_from(b'c').is_err());

        let (rest, unit) = Unit::parse("m8.8s").unwrap();
        assert_eq!(unit, Unit::Minutes);
        assert_eq!(rest, "8.8s");
        assert!(Unit::parse("n").is_err());
    }

    #[test]
    fn test_dms_conversion() {
        let dms = Dms {
            degrees: 49.,
            minutes: 12.,
            seconds: 8.8,
        };
        assert_close(dms.to_decimal(), BRNO_LAT);

        let dms = Dms::from_decimal(-16.615052, 3);
        assert_eq!(dms.degrees, 16.);
        assert_eq!(dms.minutes, 36.);
        assert_eq!(dms.to_string(), "16°36'54.187\"");

        // 59.99996 seconds round up into the next degree
        let dms = Dms::from_decimal(10.99999999, 3);
        assert_eq!(dms.to_string(), "11°0'0\"");

        // Far outside any integer range
        let dms = Dms::from_decimal(1e20, 3);
        assert_eq!(dms.to_string(), "100000000000000000000°0'0\"");
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize(&sanitize("49°12'8.8\"N 16°36'54.2\"E")),
            vec!["49d12m8.8cn", "16d36m54.2ce"]
        );
        assert_eq!(
            tokenize(&sanitize("49°12'8.8\", 16°36'54.2\"")),
            vec!["49d12m8.8c", "16d36m54.2c"]
        );

        // Detached cardinal letters, trailing and leading
        assert_eq!(
            tokenize(&sanitize("49° 12' N, 16° 36' E")),
            vec!["49d12mn", "16d36me"]
        );
        assert_eq!(
            tokenize(&sanitize("49°N 16°E")),
            vec!["49dn", "16de"]
        );
        assert_eq!(
            tokenize(&sanitize("N 49.5, E 16.5")),
            vec!["n49.5", "e16.5"]
        );
        assert_eq!(tokenize(&sanitize("- 49d, 16d")), vec!["-49d", "16d"]);
        assert_eq!(
            tokenize(&sanitize("49° 12' 8.8\" 16° 36' 54.2\"")),
            vec!["49d12m8.8c", "16d36m54.2c"]
        );
        assert_eq!(tokenize("49.5 16.5"), vec!["49.5", "16.5"]);

        // Units only join across whitespace
        assert_eq!(tokenize(&sanitize("10°, 30'")), vec!["10d", "30m"]);
        assert_eq!(tokenize(&sanitize("10°,30'")), vec!["10d", "30m"]);
        assert_eq!(tokenize(&sanitize("49° 12', N 16°")), vec!["49d12m", "n16d"]);
        assert_eq!(tokenize(&sanitize("49 °, 16 °")), vec!["49d", "16d"]);

        // Word leftovers are not cardinal letters
        assert_eq!(
            tokenize(&sanitize("Latitude: 49.2, Longitude: 16.6")),
            vec!["49.2", "16.6"]
        );
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_classify() {
        let point = classify("49d12m8.8cn");
        assert_eq!(point.axis, Axis::Latitude);
        assert!(!point.negative);
        assert_eq!(
            point.dms,
            Some(Dms {
                degrees: 49.,
                minutes: 12.,
                seconds: 8.8
            })
        );
        assert_close(point.value().unwrap(), BRNO_LAT);

        // The cardinal letter wins over the minus sign
        let point = classify("-16d36m54.2ce");
        assert_eq!(point.axis, Axis::Longitude);
        assert!(!point.negative);

        let point = classify("16d36m54.2cw");
        assert_close(point.value().unwrap(), -BRNO_LON);

        let point = classify("49.0s");
        assert_eq!(point.axis, Axis::Latitude);
        assert_eq!(point.dms, None);
        assert_eq!(point.value(), Some(-49.));

        // Degrees and minutes are floored, seconds are kept whole
        let point = classify("-10.9d30.5m15.25c");
        assert_eq!(point.axis, Axis::Unclassified);
        assert!(point.negative);
        assert_eq!(
            point.dms,
            Some(Dms {
                degrees: 10.,
                minutes: 30.,
                seconds: 15.25
            })
        );
        assert_close(point.value().unwrap(), -(10. + (30. * 60. + 15.25) / 3600.));

        let point = classify("12m13m");
        assert_eq!(point.duplicate_unit, Some(Unit::Minutes));
        assert_eq!(point.value(), Some(13. / 60.));

        let point = classify("49dne");
        assert_eq!(point.axis, Axis::Latitude);
        assert!(point.mixed_cardinals);

        let digits = "99999999999999999999999";
        let point = classify(&format!("{}dn", digits));
        assert_eq!(point.value(), digits.parse::<f64>().ok());
    }

    #[test]
    fn test_order() {
        let ordered = order(vec![classify("16de"), classify("49dn")]);
        assert_eq!(ordered[0].token, "49dn");
        assert_eq!(ordered[1].token, "16de");

        // An untagged point becomes the latitude when nothing else claims it
        let ordered = order(vec![classify("16dw"), classify("49d")]);
        assert_eq!(ordered[0].token, "49d");
        assert_eq!(ordered[1].token, "16dw");

        let ordered = order(vec![classify("49dn"), classify("16d")]);
        assert_eq!(ordered[0].token, "49dn");
        assert_eq!(ordered[1].token, "16d");

        let ordered = order(vec![classify("49d"), classify("16d")]);
        assert_eq!(ordered[0].token, "49d");
        assert_eq!(ordered[1].token, "16d");
    }

    #[test]
    fn test_extract() {
        let values = extract("49°12'8.8\"N 16°36'54.2\"E");
        assert_eq!(values.len(), 2);
        assert_close(values[0], BRNO_LAT);
        assert_close(values[1], BRNO_LON);

        let values = extract("16°36'54.2\"E, 49°12'8.8\"N");
        assert_close(values[0], BRNO_LAT);
        assert_close(values[1], BRNO_LON);

        let values = extract("-49°12'08.8\" -16°36'54.2\"");
        assert_close(values[0], -BRNO_LAT);
        assert_close(values[1], -BRNO_LON);

        let values = extract("49°12'8.8\"S 16°36'54.2\"W 1°2'3\"N");
        assert_eq!(values.len(), 2);
        assert_close(values[0], -BRNO_LAT);
        assert_close(values[1], -BRNO_LON);

        // All-zero points are still points
        assert_eq!(extract("0° 16°"), vec![0., 16.]);
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_extract_strict() {
        let values = extract_strict("16°36'54.2\"W 49°12'8.8\"N", 2).unwrap();
        assert_eq!(values[0].0, Axis::Latitude);
        assert_close(values[0].1, BRNO_LAT);
        assert_eq!(values[1].0, Axis::Longitude);
        assert_close(values[1].1, -BRNO_LON);

        assert_eq!(extract_strict("", 2), Err(ParseError::Empty));
        assert_eq!(
            extract_strict("49°N", 2),
            Err(ParseError::MissingValue {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            extract_strict("49°N 16°E 3°E", 2),
            Err(ParseError::TrailingValue("3de".to_string()))
        );
        assert_eq!(
            extract_strict("49°N 16°N", 2),
            Err(ParseError::AmbiguousCardinal {
                axis: Axis::Latitude,
                first: "49dn".to_string(),
                second: "16dn".to_string(),
            })
        );
        assert_eq!(
            extract_strict("49°12'13'N 16°E", 2),
            Err(ParseError::DuplicateUnit {
                unit: Unit::Minutes,
                token: "49d12m13mn".to_string(),
            })
        );
        assert_eq!(
            extract_strict("49°12'8.8N 16°E", 2),
            Err(ParseError::StrayNumber("49d12m8.8n".to_string()))
        );
        assert_eq!(
            extract_strict("49°NE 16°E", 2),
            Err(ParseError::MixedCardinal("49dne".to_string()))
        );
        assert_eq!(
            extract_strict("999999999999999999999999°N 16°E", 2)
                .map(|values| values[0].1),
            Ok("9".repeat(24).parse::<f64>().unwrap())
        );
        let huge = format!("{}°N 16°E", "9".repeat(400));
        assert_eq!(
            extract_strict(&huge, 2),
            Err(ParseError::NonFinite(format!("{}dn", "9".repeat(400))))
        );
        assert_eq!(
            extract_strict("49°N; 16°E", 2),
            Err(ParseError::InvalidCharacter {
                token: ";".to_string(),
                offset: 5,
            })
        );
    }
}
