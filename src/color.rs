//! Stroke color parsing and canonical formatting.
//!
//! Accepts the forms a palette swatch or a native color picker hands us:
//! `#rgb`, `#rrggbb`, and `rgb(r, g, b)`. Everything is normalized to
//! lowercase `#rrggbb` on the way out.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a color string is not well-formed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The value matched none of the accepted notations.
    #[error("unrecognized color notation: {0:?}")]
    Notation(String),
    /// A hex digit or decimal channel could not be parsed.
    #[error("invalid color channel {channel:?} in {raw:?}")]
    Channel { raw: String, channel: String },
}

/// An opaque sRGB stroke color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(raw, hex);
        }
        let lower = trimmed.to_ascii_lowercase();
        if let Some(body) = lower.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
            return parse_rgb_fn(raw, body);
        }
        Err(ColorError::Notation(raw.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

fn parse_hex(raw: &str, hex: &str) -> Result<Color, ColorError> {
    if !hex.is_ascii() {
        return Err(ColorError::Notation(raw.to_string()));
    }
    let channel = |digits: &str| {
        let bad = || ColorError::Channel { raw: raw.to_string(), channel: digits.to_string() };
        // from_str_radix tolerates a leading sign; a color channel must not.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        u8::from_str_radix(digits, 16).map_err(|_| bad())
    };
    match hex.len() {
        3 => Ok(Color::rgb(
            channel(hex[0..1].repeat(2).as_str())?,
            channel(hex[1..2].repeat(2).as_str())?,
            channel(hex[2..3].repeat(2).as_str())?,
        )),
        6 => Ok(Color::rgb(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => Err(ColorError::Notation(raw.to_string())),
    }
}

fn parse_rgb_fn(raw: &str, body: &str) -> Result<Color, ColorError> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(ColorError::Notation(raw.to_string()));
    };
    let channel = |digits: &str| {
        digits
            .parse::<u8>()
            .map_err(|_| ColorError::Channel { raw: raw.to_string(), channel: digits.to_string() })
    };
    Ok(Color::rgb(channel(*r)?, channel(*g)?, channel(*b)?))
}
