use serde::{Deserialize, Serialize};

use crate::foundation::core::{BorderColor, GridDims};
use crate::foundation::error::MaskResult;

/// Center of the classification deadband. Also the foreground test for expansion.
pub const THRESHOLD: f64 = 0.5;
/// Mask values strictly below this are background (or border).
pub const THRESHOLD_LOW: f64 = THRESHOLD - 0.05;
/// Mask values strictly above this are foreground.
pub const THRESHOLD_HIGH: f64 = THRESHOLD + 0.05;

const BAND_WIDTH: f64 = 0.1;
// Affine form of `(m - THRESHOLD_LOW) / BAND_WIDTH * 255`. Both constants are exact in f64, so
// the band edges and midpoint land on 0, 127.5 and 255 without rounding drift.
const ALPHA_SCALE: f64 = 255.0 / BAND_WIDTH;
const ALPHA_OFFSET: f64 = THRESHOLD_LOW * ALPHA_SCALE;

/// Per-call compositing switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeParams {
    /// Paint border pixels where the expanded mask covers background.
    pub add_border: bool,
    /// RGB written to border pixels.
    pub border_color: BorderColor,
}

/// Classification of one pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// `m > THRESHOLD_HIGH`: keep RGB, alpha 255.
    Foreground,
    /// Background covered by the expanded mask: border RGB, alpha 255.
    Border,
    /// `m < THRESHOLD_LOW`: keep RGB, alpha 0.
    Background,
    /// Deadband: keep RGB, linear alpha.
    Transition(u8),
}

/// Alpha for a value inside the transition band, clamped to `0..=255`.
pub fn transition_alpha(m: f64) -> u8 {
    (m * ALPHA_SCALE - ALPHA_OFFSET).round().clamp(0.0, 255.0) as u8
}

/// Classify a mask value `m` given the expanded-mask value `e` at the same cell.
pub fn classify(m: f64, e: f64, add_border: bool) -> Band {
    if m > THRESHOLD_HIGH {
        Band::Foreground
    } else if m < THRESHOLD_LOW {
        if add_border && e > THRESHOLD {
            Band::Border
        } else {
            Band::Background
        }
    } else {
        Band::Transition(transition_alpha(m))
    }
}

pub(crate) fn check_composite(
    pixels: &[u8],
    mask: &[f64],
    expanded: Option<&[f64]>,
    dims: GridDims,
) -> MaskResult<()> {
    let cells = dims.cell_count()?;
    super::check_len("mask", mask.len(), cells)?;
    super::check_len("pixels", pixels.len(), dims.rgba_len()?)?;
    if let Some(e) = expanded {
        super::check_len("expanded mask", e.len(), cells)?;
    }
    Ok(())
}

/// Composite a run of pixels. `pixels` holds four bytes per `mask` cell.
pub(crate) fn composite_span(
    pixels: &mut [u8],
    mask: &[f64],
    expanded: Option<&[f64]>,
    params: &CompositeParams,
) {
    debug_assert_eq!(pixels.len(), mask.len() * 4);
    for (i, (px, &m)) in pixels.chunks_exact_mut(4).zip(mask).enumerate() {
        let e = expanded.map_or(m, |e| e[i]);
        match classify(m, e, params.add_border) {
            Band::Foreground => px[3] = 255,
            Band::Border => {
                let c = params.border_color;
                px.copy_from_slice(&[c.r, c.g, c.b, 255]);
            }
            Band::Background => px[3] = 0,
            Band::Transition(a) => px[3] = a,
        }
    }
}

pub(crate) fn composite_scalar(
    pixels: &mut [u8],
    mask: &[f64],
    expanded: Option<&[f64]>,
    dims: GridDims,
    params: &CompositeParams,
) -> MaskResult<()> {
    check_composite(pixels, mask, expanded, dims)?;
    composite_span(pixels, mask, expanded, params);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/composite.rs"]
mod tests;
