use crate::foundation::error::{MaskError, MaskResult};

/// Alignment requested for scratch grids (16 KiB pages).
pub const SCRATCH_ALIGN_BYTES: usize = 16 * 1024;

const CELL_BYTES: usize = std::mem::size_of::<f64>();
const ALIGN_SLACK_CELLS: usize = SCRATCH_ALIGN_BYTES / CELL_BYTES;

/// Call-local `f64` scratch grid whose visible window starts on a page boundary.
///
/// The backing allocation is over-sized by one page and the window is offset to the first
/// aligned cell. When the allocator cannot place an aligned window inside the slack, the window
/// starts at offset zero instead. The grid is released on drop, so every exit path of the
/// owning kernel frees it exactly once.
pub(crate) struct ScratchGrid {
    storage: Vec<f64>,
    offset: usize,
    len: usize,
}

impl ScratchGrid {
    /// Allocate `len` zeroed cells, failing with [`MaskError::Memory`] when the request is
    /// larger than `max_bytes` or the allocator refuses it.
    pub(crate) fn try_new(len: usize, max_bytes: usize) -> MaskResult<Self> {
        let total = len
            .checked_add(ALIGN_SLACK_CELLS)
            .ok_or_else(|| MaskError::memory("scratch grid size overflow"))?;
        let bytes = total
            .checked_mul(CELL_BYTES)
            .ok_or_else(|| MaskError::memory("scratch grid size overflow"))?;
        if bytes > max_bytes {
            return Err(MaskError::memory(format!(
                "scratch request of {bytes} bytes exceeds limit of {max_bytes} bytes"
            )));
        }

        let mut storage = Vec::<f64>::new();
        storage
            .try_reserve_exact(total)
            .map_err(|e| MaskError::memory(format!("scratch allocation failed: {e}")))?;
        storage.resize(total, 0.0);

        let offset = match storage.as_ptr().align_offset(SCRATCH_ALIGN_BYTES) {
            off if off <= ALIGN_SLACK_CELLS => off,
            _ => {
                tracing::debug!(len, "scratch grid alignment unavailable, using heap offset 0");
                0
            }
        };

        Ok(Self {
            storage,
            offset,
            len,
        })
    }

    pub(crate) fn as_slice(&self) -> &[f64] {
        &self.storage[self.offset..self.offset + self.len]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.storage[self.offset..self.offset + self.len]
    }

    #[cfg(test)]
    pub(crate) fn is_page_aligned(&self) -> bool {
        (self.as_slice().as_ptr() as usize).is_multiple_of(SCRATCH_ALIGN_BYTES)
    }
}

/// Allocate a zeroed grid for pipeline intermediates, reporting failure instead of aborting.
pub(crate) fn alloc_grid(len: usize, max_bytes: usize) -> MaskResult<Vec<f64>> {
    let bytes = len
        .checked_mul(CELL_BYTES)
        .ok_or_else(|| MaskError::memory("mask grid size overflow"))?;
    if bytes > max_bytes {
        return Err(MaskError::memory(format!(
            "mask grid of {bytes} bytes exceeds limit of {max_bytes} bytes"
        )));
    }

    let mut grid = Vec::<f64>::new();
    grid.try_reserve_exact(len)
        .map_err(|e| MaskError::memory(format!("mask grid allocation failed: {e}")))?;
    grid.resize(len, 0.0);
    Ok(grid)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/scratch.rs"]
mod tests;
