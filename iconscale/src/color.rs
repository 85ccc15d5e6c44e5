use crate::ScaleError;
use image::Rgba;
use serde::{Deserialize, Deserializer};

/// An 8 bit RGBA color.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// `#0A1D47`, the launcher background used when nothing else is known.
    pub const NAVY: Self = Self::rgb(10, 29, 71);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba([color.r, color.g, color.b, color.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Color {
    type Err = ScaleError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        let invalid = || ScaleError::InvalidColor(color.to_string());
        let hex = color.trim().trim_start_matches('#');
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { u8::MAX };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = String::deserialize(deserializer)?;
        color.parse().map_err(serde::de::Error::custom)
    }
}

/// What fills the canvas around the scaled artwork.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Background {
    Color(Color),
    /// Fully transparent canvas, the source alpha is preserved.
    Transparent,
}

impl Background {
    pub fn pixel(self) -> Rgba<u8> {
        match self {
            Self::Color(color) => color.into(),
            Self::Transparent => Rgba([0, 0, 0, 0]),
        }
    }

    pub fn is_opaque(self) -> bool {
        matches!(self, Self::Color(color) if color.is_opaque())
    }
}

impl From<Color> for Background {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}
