use rayon::prelude::*;

use crate::backend::{KernelBackend, KernelSettings};
use crate::foundation::core::GridDims;
use crate::foundation::error::MaskResult;
use crate::foundation::scratch::ScratchGrid;
use crate::kernels::composite::{CompositeParams, check_composite, composite_span};
use crate::kernels::expand::{
    ExpandStrategy, check_expand, disk_gather_row, disk_offsets, effective_radius, grow_row,
    threshold_into,
};
use crate::kernels::smooth::{check_smooth, half_window, horizontal_row, vertical_row};

/// Row-parallel backend. Splits each kernel call into per-row tasks on the current rayon pool.
///
/// Rows are independent within a pass, and every pass reads only the previous pass's full
/// grid, so results are bit-identical to [`super::ScalarBackend`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ParallelBackend {
    settings: KernelSettings,
}

impl ParallelBackend {
    /// Build a parallel backend with explicit settings.
    pub fn new(settings: KernelSettings) -> Self {
        Self { settings }
    }
}

impl KernelBackend for ParallelBackend {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn settings(&self) -> &KernelSettings {
        &self.settings
    }

    #[tracing::instrument(level = "trace", skip(self, pixels, mask, expanded, params))]
    fn composite(
        &self,
        pixels: &mut [u8],
        mask: &[f64],
        expanded: Option<&[f64]>,
        dims: GridDims,
        params: &CompositeParams,
    ) -> MaskResult<()> {
        check_composite(pixels, mask, expanded, dims)?;
        let w = dims.w();
        let rows = pixels.par_chunks_mut(w * 4).zip(mask.par_chunks(w));
        match expanded {
            Some(expanded) => rows
                .zip(expanded.par_chunks(w))
                .for_each(|((px, m), e)| composite_span(px, m, Some(e), params)),
            None => rows.for_each(|(px, m)| composite_span(px, m, None, params)),
        }
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip(self, mask, out))]
    fn smooth(
        &self,
        mask: &[f64],
        out: &mut [f64],
        dims: GridDims,
        kernel_size: u32,
    ) -> MaskResult<()> {
        check_smooth(mask, out, dims, kernel_size)?;
        if kernel_size <= 1 {
            out.copy_from_slice(mask);
            return Ok(());
        }

        let mut tmp = ScratchGrid::try_new(mask.len(), self.settings.max_scratch_bytes)?;
        let half = half_window(kernel_size);
        let w = dims.w();

        tmp.as_mut_slice()
            .par_chunks_mut(w)
            .zip(mask.par_chunks(w))
            .for_each(|(dst, src)| horizontal_row(src, dst, half));

        let tmp = tmp.as_slice();
        out.par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, dst)| vertical_row(tmp, dst, y, dims, half));
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip(self, mask, out))]
    fn expand(
        &self,
        mask: &[f64],
        out: &mut [f64],
        dims: GridDims,
        border_width: u32,
        strategy: ExpandStrategy,
    ) -> MaskResult<()> {
        check_expand(mask, out, dims)?;
        let w = dims.w();

        if border_width == 0 {
            out.par_chunks_mut(w)
                .zip(mask.par_chunks(w))
                .for_each(|(o, m)| threshold_into(m, o));
            return Ok(());
        }

        let radius = effective_radius(border_width, dims);
        if strategy.uses_growth(border_width) {
            let mut prev = ScratchGrid::try_new(out.len(), self.settings.max_scratch_bytes)?;
            threshold_into(mask, out);
            for _ in 0..radius {
                prev.as_mut_slice().copy_from_slice(out);
                let prev = prev.as_slice();
                out.par_chunks_mut(w)
                    .enumerate()
                    .for_each(|(y, row)| grow_row(prev, row, y, dims));
            }
            return Ok(());
        }

        let offsets = disk_offsets(radius, dims);
        out.par_chunks_mut(w)
            .enumerate()
            .for_each(|(y, row)| disk_gather_row(mask, row, y, dims, &offsets));
        Ok(())
    }
}
