//! RGB colors on the normalized 0-1 scale used by the document APIs.

use serde::{Deserialize, Serialize};

/// An opaque RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub red: f32,
    /// Green channel
    pub green: f32,
    /// Blue channel
    pub blue: f32,
}

/// Named colors accepted in markup, as hex triples.
const PALETTE: &[(&str, &str)] = &[
    ("red", "#FF0000"),
    ("green", "#008000"),
    ("blue", "#0000FF"),
    ("black", "#000000"),
    ("white", "#FFFFFF"),
    ("yellow", "#FFFF00"),
    ("purple", "#800080"),
    ("orange", "#FFA500"),
    ("gray", "#808080"),
    ("grey", "#808080"),
];

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
    };

    /// Pure black.
    pub const BLACK: Rgb = Rgb {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
    };

    /// Create a color from 8-bit channels.
    pub fn from_bytes(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
        }
    }

    /// Parse a `#RRGGBB` string (the `#` is optional).
    ///
    /// Returns `None` for anything that is not exactly six hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::from_bytes(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Look up a palette color by name (case-insensitive).
    pub fn named(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        PALETTE
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, hex)| Self::from_hex(hex))
    }

    /// Parse a palette name or a hex string.
    ///
    /// Unparseable values yield `None`; callers omit the color rather
    /// than fail.
    pub fn parse(value: &str) -> Option<Self> {
        let parsed = Self::named(value).or_else(|| Self::from_hex(value));
        if parsed.is_none() {
            log::warn!("ignoring unparseable color '{}'", value);
        }
        parsed
    }

    /// Hex representation (`#RRGGBB`).
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            byte(self.red),
            byte(self.green),
            byte(self.blue)
        )
    }
}
