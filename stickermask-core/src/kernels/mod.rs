pub(crate) mod composite;
pub(crate) mod expand;
pub(crate) mod smooth;

use crate::backend::{KernelBackend, ScalarBackend};
use crate::foundation::core::GridDims;
use crate::foundation::error::{MaskError, MaskResult};
use composite::CompositeParams;
use expand::ExpandStrategy;

pub(crate) fn check_len(what: &str, len: usize, expected: usize) -> MaskResult<()> {
    if len != expected {
        return Err(MaskError::invalid_params(format!(
            "{what} buffer has {len} elements, expected {expected}"
        )));
    }
    Ok(())
}

/// Classify every pixel by its mask value and write alpha (and border color) in place.
///
/// Foreground and transition pixels keep their RGB. Only border pixels have RGB overwritten.
/// When `expanded` is `None`, the border test uses the raw mask value.
///
/// Runs on the scalar reference backend; see [`KernelBackend`] for other backends.
pub fn composite_mask(
    pixels: &mut [u8],
    mask: &[f64],
    expanded: Option<&[f64]>,
    dims: GridDims,
    params: &CompositeParams,
) -> MaskResult<()> {
    ScalarBackend::default().composite(pixels, mask, expanded, dims, params)
}

/// Two-pass box mean of window `kernel_size` into `out`. `kernel_size <= 1` copies.
pub fn smooth_mask(
    mask: &[f64],
    out: &mut [f64],
    dims: GridDims,
    kernel_size: u32,
) -> MaskResult<()> {
    ScalarBackend::default().smooth(mask, out, dims, kernel_size)
}

/// Binary dilation of `mask > 0.5` by `border_width` into `out` (exact disk).
pub fn expand_mask(
    mask: &[f64],
    out: &mut [f64],
    dims: GridDims,
    border_width: u32,
) -> MaskResult<()> {
    ScalarBackend::default().expand(mask, out, dims, border_width, ExpandStrategy::Disk)
}
