//! RGB color decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors decoding a hex color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("expected 6 hex digits, found {0} characters in {1:?}")]
    WrongLength(usize, String),
    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

/// An 8-bit RGB color, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// An 8-bit RGBA color, serialized as `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgb {
    /// Decodes `#rrggbb` (the `#` is optional).
    ///
    /// ```
    /// use map_types::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#00c864"), Ok(Rgb(0, 200, 100)));
    /// ```
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(input.to_string()));
        }
        if hex.len() != 6 {
            return Err(ColorError::WrongLength(hex.len(), input.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ColorError::InvalidDigit(input.to_string()))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba {
        Rgba(self.0, self.1, self.2, alpha)
    }

    /// Encodes as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Rgba {
    /// Drops the alpha channel.
    pub fn rgb(self) -> Rgb {
        Rgb(self.0, self.1, self.2)
    }
}
