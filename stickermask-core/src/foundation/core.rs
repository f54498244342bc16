use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{MaskError, MaskResult};

/// Width and height of a mask grid (and of the RGBA image it belongs to).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    /// Cells per row.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
}

impl GridDims {
    /// Build dimensions, rejecting empty grids.
    pub fn new(width: u32, height: u32) -> MaskResult<Self> {
        let dims = Self { width, height };
        dims.cell_count()?;
        Ok(dims)
    }

    /// Build dimensions from host-style signed integers.
    pub fn from_signed(width: i32, height: i32) -> MaskResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(MaskError::invalid_params(format!(
                "width and height must be > 0 (got {width}x{height})"
            )));
        }
        Self::new(width.unsigned_abs(), height.unsigned_abs())
    }

    /// Number of mask cells (`width * height`).
    ///
    /// Fails for zero-sized grids and for sizes that overflow `usize`.
    pub fn cell_count(self) -> MaskResult<usize> {
        if self.width == 0 || self.height == 0 {
            return Err(MaskError::invalid_params(format!(
                "width and height must be > 0 (got {}x{})",
                self.width, self.height
            )));
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| MaskError::invalid_params("grid size overflow"))
    }

    /// Number of RGBA bytes (`width * height * 4`).
    pub fn rgba_len(self) -> MaskResult<usize> {
        self.cell_count()?
            .checked_mul(4)
            .ok_or_else(|| MaskError::invalid_params("rgba buffer size overflow"))
    }

    pub(crate) fn w(self) -> usize {
        self.width as usize
    }

    pub(crate) fn h(self) -> usize {
        self.height as usize
    }
}

/// Solid outline color. Border pixels are always written fully opaque.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct BorderColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl BorderColor {
    /// Build a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque white, the usual sticker outline.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
}

impl Default for BorderColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for BorderColor {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map_err(MaskError::validation)
    }
}

impl<'de> Deserialize<'de> for BorderColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbObj { r: u8, g: u8, b: u8 },
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbObj { r, g, b } => Ok(Self::rgb(r, g, b)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                _ => Err(serde::de::Error::custom(
                    "border color array must have len 3 ([r,g,b])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<BorderColor, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err("border color must be #RRGGBB (case-insensitive)".to_owned());
    }
    Ok(BorderColor::rgb(
        hex_byte(&s[0..2])?,
        hex_byte(&s[2..4])?,
        hex_byte(&s[4..6])?,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
