use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::PosterError;

/// Straight-alpha text color, written as a hex string in poster documents.
///
/// Accepted forms are `#RGB`, `#RRGGBB` and `#RRGGBBAA` (case-insensitive, `#` optional).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl TextColor {
    /// Opaque black, the studio's initial text color.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Swatches offered by the studio color picker.
    pub const PRESETS: [Self; 8] = [
        Self::rgb(0x00, 0x00, 0x00),
        Self::rgb(0xFF, 0xFF, 0xFF),
        Self::rgb(0xF4, 0x72, 0xB6),
        Self::rgb(0x34, 0xD3, 0x99),
        Self::rgb(0x8B, 0x5C, 0xF6),
        Self::rgb(0xFB, 0xBF, 0x24),
        Self::rgb(0x1F, 0x29, 0x37),
        Self::rgb(0xDC, 0x26, 0x26),
    ];

    /// Opaque color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse a hex color string.
    pub fn parse_hex(s: &str) -> Result<Self, PosterError> {
        parse_hex(s).map_err(PosterError::validation)
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for TextColor {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl Serialize for TextColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TextColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(s: &str) -> Result<TextColor, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        3 => {
            // #RGB expands each nibble: "f80" -> "ff8800".
            let mut out = [0u8; 3];
            for (i, ch) in s.chars().enumerate() {
                let nibble = ch
                    .to_digit(16)
                    .ok_or_else(|| format!("invalid hex digit '{ch}'"))? as u8;
                out[i] = nibble * 17;
            }
            Ok(TextColor::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(TextColor::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(TextColor {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}
