//! WebAssembly bindings for the `geocoords` crate.

use crate::{Coordinate, FormatOptions};
use wasm_bindgen::prelude::*;

/// Strictly parse a coordinate and return it as a `{latitude, longitude}` object.
#[wasm_bindgen]
pub fn parse_coordinates(text: &str) -> Result<JsValue, JsValue> {
    match Coordinate::parse_strict(text) {
        Ok(coordinate) => match JsValue::from_serde(&coordinate) {
            Ok(v) => Ok(v),
            Err(_) => Err(JsValue::from_str("Unable to convert result to JSON!")),
        },
        Err(e) => {
            let msg = match e.offending_token() {
                Some(token) => format!("Unable to parse coordinates: {} (at `{}`)", e, token),
                None => format!("Unable to parse coordinates: {}", e),
            };
            Err(JsValue::from_str(&msg))
        }
    }
}

/// Leniently parse a coordinate and render it as `dd` or `dms`.
#[wasm_bindgen]
pub fn format_coordinates(text: &str, kind: &str, decimals: Option<u32>) -> String {
    Coordinate::new(text).format_with(&FormatOptions::new(kind, decimals))
}
