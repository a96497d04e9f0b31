#![forbid(unsafe_code)]
//! Parsing of geographic coordinates written in decimal degrees (DD) or degrees, minutes and
//! seconds (DMS), and rendering them back into either notation.
//!
//! ```
//! use geocoords::Coordinate;
//!
//! let c = Coordinate::new("49°12'8.8\"N 16°36'54.2\"E");
//! assert_eq!(c.format("dd", Some(6)), "49.202444, 16.615056");
//! assert_eq!(c.format("dms", Some(1)), "49°12'8.8\"N 16°36'54.2\"E");
//! ```

pub mod coordinate;
pub mod dd;
pub mod dms;
pub mod error;
pub mod format;
pub mod parse;
pub mod sanitize;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use coordinate::{Coordinate, CoordinateInput};
pub use error::ParseError;
pub use format::{FormatKind, FormatOptions};
