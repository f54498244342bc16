use serde::{Deserialize, Serialize};

use crate::foundation::core::GridDims;
use crate::foundation::error::MaskResult;
use crate::foundation::scratch::ScratchGrid;
use crate::kernels::composite::THRESHOLD;

/// Default radius cutoff for [`ExpandStrategy::Hybrid`].
pub const HYBRID_DISK_MAX_RADIUS: u32 = 3;

/// How a mask is dilated by `border_width`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpandStrategy {
    /// Exact dilation by the discrete Euclidean disk `dx² + dy² <= r²`, for every radius.
    #[default]
    Disk,
    /// Disk dilation up to `disk_max_radius`, then `border_width` rounds of 8-connected growth.
    ///
    /// Growth approximates the disk with a square (Chebyshev) footprint, so results differ
    /// from [`ExpandStrategy::Disk`] above the cutoff.
    Hybrid {
        /// Largest radius still handled by the exact disk.
        disk_max_radius: u32,
    },
}

impl ExpandStrategy {
    /// Hybrid strategy with the default cutoff.
    pub fn hybrid() -> Self {
        Self::Hybrid {
            disk_max_radius: HYBRID_DISK_MAX_RADIUS,
        }
    }

    pub(crate) fn uses_growth(self, border_width: u32) -> bool {
        match self {
            Self::Disk => false,
            Self::Hybrid { disk_max_radius } => border_width > disk_max_radius,
        }
    }
}

pub(crate) fn check_expand(mask: &[f64], out: &[f64], dims: GridDims) -> MaskResult<()> {
    let cells = dims.cell_count()?;
    super::check_len("mask", mask.len(), cells)?;
    super::check_len("output", out.len(), cells)?;
    Ok(())
}

fn is_foreground(v: f64) -> bool {
    v > THRESHOLD
}

fn binary(set: bool) -> f64 {
    if set { 1.0 } else { 0.0 }
}

/// Offsets `(dx, dy)` with `dx² + dy² <= radius²`, row-major. Shifts that cannot land inside a
/// `dims` grid are left out.
pub(crate) fn disk_offsets(radius: u32, dims: GridDims) -> Vec<(isize, isize)> {
    let r2 = u128::from(radius).pow(2);
    let rx = (radius as usize).min(dims.w() - 1) as isize;
    let ry = (radius as usize).min(dims.h() - 1) as isize;
    let mut offsets = Vec::with_capacity(((2 * rx + 1) * (2 * ry + 1)) as usize);
    for dy in -ry..=ry {
        for dx in -rx..=rx {
            let d2 = (dx.unsigned_abs() as u128).pow(2) + (dy.unsigned_abs() as u128).pow(2);
            if d2 <= r2 {
                offsets.push((dx, dy));
            }
        }
    }
    offsets
}

/// Radius clipped to `width + height`. Every pair of cells is closer than that, so larger radii
/// produce the same grid.
pub(crate) fn effective_radius(border_width: u32, dims: GridDims) -> u32 {
    border_width.min(dims.width.saturating_add(dims.height))
}

fn shifted(p: usize, d: isize, len: usize) -> Option<usize> {
    p.checked_add_signed(d).filter(|&q| q < len)
}

pub(crate) fn threshold_into(mask: &[f64], out: &mut [f64]) {
    for (o, &m) in out.iter_mut().zip(mask) {
        *o = binary(is_foreground(m));
    }
}

/// Stamp the disk around every foreground cell. `out` must be zeroed.
pub(crate) fn disk_scatter(
    mask: &[f64],
    out: &mut [f64],
    dims: GridDims,
    offsets: &[(isize, isize)],
) {
    let (w, h) = (dims.w(), dims.h());
    for (i, _) in mask.iter().enumerate().filter(|(_, m)| is_foreground(**m)) {
        let (x, y) = (i % w, i / w);
        for &(dx, dy) in offsets {
            if let (Some(nx), Some(ny)) = (shifted(x, dx, w), shifted(y, dy, h)) {
                out[ny * w + nx] = 1.0;
            }
        }
    }
}

/// Row `y` of the disk dilation, computed by looking for a foreground cell inside the disk
/// centered on each output cell. Matches [`disk_scatter`] because the disk is symmetric.
pub(crate) fn disk_gather_row(
    mask: &[f64],
    out_row: &mut [f64],
    y: usize,
    dims: GridDims,
    offsets: &[(isize, isize)],
) {
    let (w, h) = (dims.w(), dims.h());
    for (x, o) in out_row.iter_mut().enumerate() {
        let hit = offsets.iter().any(|&(dx, dy)| {
            match (shifted(x, dx, w), shifted(y, dy, h)) {
                (Some(sx), Some(sy)) => is_foreground(mask[sy * w + sx]),
                _ => false,
            }
        });
        *o = binary(hit);
    }
}

/// One round of 8-connected growth for row `y`: an empty cell becomes set when any in-bounds
/// neighbor was set in `prev`. `out_row` must already hold row `y` of `prev`.
pub(crate) fn grow_row(prev: &[f64], out_row: &mut [f64], y: usize, dims: GridDims) {
    let (w, h) = (dims.w(), dims.h());
    for (x, o) in out_row.iter_mut().enumerate() {
        if prev[y * w + x] != 0.0 {
            continue;
        }
        let touched = (-1isize..=1)
            .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
            .filter(|&d| d != (0, 0))
            .any(|(dx, dy)| match (shifted(x, dx, w), shifted(y, dy, h)) {
                (Some(nx), Some(ny)) => prev[ny * w + nx] > 0.0,
                _ => false,
            });
        if touched {
            *o = 1.0;
        }
    }
}

pub(crate) fn expand_scalar(
    mask: &[f64],
    out: &mut [f64],
    dims: GridDims,
    border_width: u32,
    strategy: ExpandStrategy,
    max_scratch_bytes: usize,
) -> MaskResult<()> {
    check_expand(mask, out, dims)?;

    if border_width == 0 {
        threshold_into(mask, out);
        return Ok(());
    }

    let radius = effective_radius(border_width, dims);
    if strategy.uses_growth(border_width) {
        let mut prev = ScratchGrid::try_new(out.len(), max_scratch_bytes)?;
        threshold_into(mask, out);
        for _ in 0..radius {
            prev.as_mut_slice().copy_from_slice(out);
            for (y, row) in out.chunks_exact_mut(dims.w()).enumerate() {
                grow_row(prev.as_slice(), row, y, dims);
            }
        }
        return Ok(());
    }

    out.fill(0.0);
    disk_scatter(mask, out, dims, &disk_offsets(radius, dims));
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/expand.rs"]
mod tests;
