use std::borrow::Cow;

use rayon::prelude::*;

use crate::backend::{BackendKind, KernelBackend, KernelSettings, create_backend};
use crate::foundation::core::GridDims;
use crate::foundation::error::{MaskError, MaskResult};
use crate::foundation::scratch::alloc_grid;
use crate::kernels::check_len;
use crate::sticker::options::StickerOptions;

/// Turn `pixels` into a sticker cutout using `mask`.
///
/// Pipeline:
/// 1. smooth the mask (when `opts.smooth_kernel > 1`)
/// 2. expand the smoothed mask (when `opts.add_border` and `opts.border_width > 0`)
/// 3. composite the smoothed mask, and the expanded mask if any, into `pixels`
///
/// Buffers are validated before anything is written, so an `InvalidParams` error leaves
/// `pixels` untouched.
#[tracing::instrument(skip(backend, pixels, mask), fields(backend = backend.name()))]
pub fn apply_sticker(
    backend: &dyn KernelBackend,
    pixels: &mut [u8],
    mask: &[f64],
    dims: GridDims,
    opts: &StickerOptions,
) -> MaskResult<()> {
    opts.validate()?;
    let cells = dims.cell_count()?;
    check_len("mask", mask.len(), cells)?;
    check_len("pixels", pixels.len(), dims.rgba_len()?)?;
    let max_bytes = backend.settings().max_scratch_bytes;

    let smoothed: Cow<'_, [f64]> = if opts.smooths() {
        let mut out = alloc_grid(cells, max_bytes)?;
        backend.smooth(mask, &mut out, dims, opts.smooth_kernel)?;
        Cow::Owned(out)
    } else {
        Cow::Borrowed(mask)
    };

    let expanded = if opts.expands() {
        let mut out = alloc_grid(cells, max_bytes)?;
        backend.expand(
            &smoothed,
            &mut out,
            dims,
            opts.border_width,
            opts.expand_strategy,
        )?;
        Some(out)
    } else {
        None
    };

    backend.composite(
        pixels,
        &smoothed,
        expanded.as_deref(),
        dims,
        &opts.composite_params(),
    )
}

/// One image of a batch: owned RGBA pixels and the mask that cuts them out.
#[derive(Clone, Debug)]
pub struct StickerJob {
    /// Image and mask dimensions.
    pub dims: GridDims,
    /// RGBA8 bytes, tightly packed, row-major. Rewritten in place.
    pub pixels: Vec<u8>,
    /// One mask value per pixel.
    pub mask: Vec<f64>,
}

/// Threading controls for [`apply_sticker_batch`].
#[derive(Clone, Debug, Default)]
pub struct BatchOpts {
    /// Optional explicit worker thread count. `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Kernel backend used inside each job.
    pub backend: BackendKind,
    /// Settings for the kernel backend.
    pub settings: KernelSettings,
}

/// Apply the same options to many independent images, one image per worker task.
///
/// Returns the first error encountered; jobs that already finished keep their results.
#[tracing::instrument(skip(jobs, opts), fields(jobs = jobs.len()))]
pub fn apply_sticker_batch(
    jobs: &mut [StickerJob],
    opts: &StickerOptions,
    batch: &BatchOpts,
) -> MaskResult<()> {
    opts.validate()?;
    let pool = build_thread_pool(batch.threads)?;
    let backend = create_backend(batch.backend, &batch.settings)?;
    let backend = backend.as_ref();

    pool.install(|| {
        jobs.par_iter_mut().try_for_each(|job| {
            apply_sticker(backend, &mut job.pixels, &job.mask, job.dims, opts)
        })
    })
}

fn build_thread_pool(threads: Option<usize>) -> MaskResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MaskError::validation(
            "batch threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| MaskError::processing(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/sticker/pipeline.rs"]
mod tests;
