//! Host-shaped entry points that report a [`StatusCode`] instead of a `Result`.
//!
//! Buffers are `Option`s so that a missing buffer is an `InvalidParams` status rather than
//! something the caller has to rule out up front. Dimensions and radii are signed so that
//! negative values coming from a host can be rejected here.

use crate::backend::{KernelBackend, ScalarBackend};
use crate::foundation::core::{BorderColor, GridDims};
use crate::foundation::error::{MaskError, MaskResult, StatusCode};
use crate::kernels::composite::CompositeParams;
use crate::kernels::expand::ExpandStrategy;

fn required<T>(buf: Option<T>, what: &str) -> MaskResult<T> {
    buf.ok_or_else(|| MaskError::invalid_params(format!("{what} buffer is missing")))
}

fn non_negative(value: i32, what: &str) -> MaskResult<u32> {
    u32::try_from(value)
        .map_err(|_| MaskError::invalid_params(format!("{what} must be >= 0 (got {value})")))
}

fn report(result: MaskResult<()>, op: &'static str) -> StatusCode {
    if let Err(err) = &result {
        tracing::debug!(op, error = %err, "mask kernel failed");
    }
    StatusCode::of(&result)
}

/// Composite `mask` into `pixels` in place.
///
/// `_border_width` is accepted for signature parity with the other operations; the outline
/// radius is whatever produced `expanded_mask`.
#[allow(clippy::too_many_arguments)]
pub fn composite_mask(
    pixels: Option<&mut [u8]>,
    mask: Option<&[f64]>,
    width: i32,
    height: i32,
    add_border: bool,
    border_color: BorderColor,
    _border_width: i32,
    expanded_mask: Option<&[f64]>,
) -> StatusCode {
    let run = || -> MaskResult<()> {
        let pixels = required(pixels, "pixels")?;
        let mask = required(mask, "mask")?;
        let dims = GridDims::from_signed(width, height)?;
        let params = CompositeParams {
            add_border,
            border_color,
        };
        ScalarBackend::default().composite(pixels, mask, expanded_mask, dims, &params)
    };
    report(run(), "composite")
}

/// Box-smooth `mask` into `output`. `kernel_size` must be positive.
pub fn smooth_mask(
    mask: Option<&[f64]>,
    output: Option<&mut [f64]>,
    width: i32,
    height: i32,
    kernel_size: i32,
) -> StatusCode {
    let run = || -> MaskResult<()> {
        let mask = required(mask, "mask")?;
        let output = required(output, "output")?;
        let dims = GridDims::from_signed(width, height)?;
        if kernel_size <= 0 {
            return Err(MaskError::invalid_params(format!(
                "kernel_size must be > 0 (got {kernel_size})"
            )));
        }
        ScalarBackend::default().smooth(mask, output, dims, kernel_size.unsigned_abs())
    };
    report(run(), "smooth")
}

/// Dilate the thresholded `mask` by `border_width` into `output` (exact disk).
pub fn expand_mask(
    mask: Option<&[f64]>,
    output: Option<&mut [f64]>,
    width: i32,
    height: i32,
    border_width: i32,
) -> StatusCode {
    let run = || -> MaskResult<()> {
        let mask = required(mask, "mask")?;
        let output = required(output, "output")?;
        let dims = GridDims::from_signed(width, height)?;
        let border_width = non_negative(border_width, "border_width")?;
        ScalarBackend::default().expand(mask, output, dims, border_width, ExpandStrategy::Disk)
    };
    report(run(), "expand")
}

#[cfg(test)]
#[path = "../tests/unit/status.rs"]
mod tests;
