#![forbid(unsafe_code)]

//! Value types for text and color styling.
//!
//! These describe *what* the engine should draw; actual font rasterization
//! and shader parameter binding happen behind the visual traits in
//! `padmenu-widgets`.

use std::error::Error;
use std::fmt;

/// Normalized RGBA color, each channel in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Construct from explicit channels.
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string.
    ///
    /// Without an alpha component the color is fully opaque.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |i: usize| -> Result<f32, ColorParseError> {
            let pair = digits
                .get(i * 2..i * 2 + 2)
                .ok_or_else(|| ColorParseError::new(hex))?;
            let byte =
                u8::from_str_radix(pair, 16).map_err(|_| ColorParseError::new(hex))?;
            Ok(f32::from(byte) / 255.0)
        };
        match digits.len() {
            6 => Ok(Self::rgba(channel(0)?, channel(1)?, channel(2)?, 1.0)),
            8 => Ok(Self::rgba(channel(0)?, channel(1)?, channel(2)?, channel(3)?)),
            _ => Err(ColorParseError::new(hex)),
        }
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }
}

/// Error for a hex string that is not a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    input: String,
}

impl ColorParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color literal: {:?}", self.input)
    }
}

impl Error for ColorParseError {}

/// Font selection and fill color for menu text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font family name, resolved by the engine's font backend.
    pub family: String,
    /// Point size.
    pub size_pt: f32,
    /// Fill color.
    pub color: Color,
}

impl TextStyle {
    /// Create a text style.
    #[must_use]
    pub fn new(family: impl Into<String>, size_pt: f32, color: Color) -> Self {
        Self {
            family: family.into(),
            size_pt,
            color,
        }
    }
}
