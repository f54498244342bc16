use crate::foundation::core::GridDims;
use crate::foundation::error::{MaskError, MaskResult};
use crate::foundation::scratch::ScratchGrid;

pub(crate) fn check_smooth(
    mask: &[f64],
    out: &[f64],
    dims: GridDims,
    kernel_size: u32,
) -> MaskResult<()> {
    let cells = dims.cell_count()?;
    super::check_len("mask", mask.len(), cells)?;
    super::check_len("output", out.len(), cells)?;
    if kernel_size == 0 {
        return Err(MaskError::invalid_params("kernel_size must be > 0"));
    }
    Ok(())
}

pub(crate) fn half_window(kernel_size: u32) -> usize {
    (kernel_size / 2) as usize
}

/// Box mean of `samples`, clamped to their own min and max so rounding in the division can
/// never leave the sampled range. NaN samples propagate.
fn window_mean<'a>(samples: impl IntoIterator<Item = &'a f64>) -> f64 {
    let (sum, n, lo, hi) = samples.into_iter().fold(
        (0.0, 0usize, f64::INFINITY, f64::NEG_INFINITY),
        |(sum, n, lo, hi), &v| (sum + v, n + 1, lo.min(v), hi.max(v)),
    );
    let mean = sum / n as f64;
    if mean < lo {
        lo
    } else if mean > hi {
        hi
    } else {
        mean
    }
}

/// Mean of `src[x-half..=x+half]` clipped to the row, for every `x`.
///
/// Edge cells divide by the number of in-bounds samples, not by the full window.
pub(crate) fn horizontal_row(src: &[f64], dst: &mut [f64], half: usize) {
    let last = src.len() - 1;
    for (x, d) in dst.iter_mut().enumerate() {
        let lo = x.saturating_sub(half);
        let hi = (x + half).min(last);
        *d = window_mean(&src[lo..=hi]);
    }
}

/// Vertical mean for output row `y`, reading the full horizontal-pass grid `src`.
pub(crate) fn vertical_row(src: &[f64], dst: &mut [f64], y: usize, dims: GridDims, half: usize) {
    let w = dims.w();
    let lo = y.saturating_sub(half);
    let hi = (y + half).min(dims.h() - 1);

    let window = &src[lo * w..(hi + 1) * w];
    for (x, d) in dst.iter_mut().enumerate() {
        *d = window_mean(window.iter().skip(x).step_by(w));
    }
}

pub(crate) fn smooth_scalar(
    mask: &[f64],
    out: &mut [f64],
    dims: GridDims,
    kernel_size: u32,
    max_scratch_bytes: usize,
) -> MaskResult<()> {
    check_smooth(mask, out, dims, kernel_size)?;
    if kernel_size <= 1 {
        out.copy_from_slice(mask);
        return Ok(());
    }

    let mut tmp = ScratchGrid::try_new(mask.len(), max_scratch_bytes)?;
    let half = half_window(kernel_size);
    let w = dims.w();

    for (src, dst) in mask.chunks_exact(w).zip(tmp.as_mut_slice().chunks_exact_mut(w)) {
        horizontal_row(src, dst, half);
    }
    for (y, dst) in out.chunks_exact_mut(w).enumerate() {
        vertical_row(tmp.as_slice(), dst, y, dims, half);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/smooth.rs"]
mod tests;
