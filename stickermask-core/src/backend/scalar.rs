use crate::backend::{KernelBackend, KernelSettings};
use crate::foundation::core::GridDims;
use crate::foundation::error::MaskResult;
use crate::kernels::composite::{CompositeParams, composite_scalar};
use crate::kernels::expand::{ExpandStrategy, expand_scalar};
use crate::kernels::smooth::smooth_scalar;

/// Sequential reference backend. Runs every kernel on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarBackend {
    settings: KernelSettings,
}

impl ScalarBackend {
    /// Build a scalar backend with explicit settings.
    pub fn new(settings: KernelSettings) -> Self {
        Self { settings }
    }
}

impl KernelBackend for ScalarBackend {
    fn name(&self) -> &'static str {
        "scalar"
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
        composite_scalar(pixels, mask, expanded, dims, params)
    }

    #[tracing::instrument(level = "trace", skip(self, mask, out))]
    fn smooth(
        &self,
        mask: &[f64],
        out: &mut [f64],
        dims: GridDims,
        kernel_size: u32,
    ) -> MaskResult<()> {
        smooth_scalar(mask, out, dims, kernel_size, self.settings.max_scratch_bytes)
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
        expand_scalar(
            mask,
            out,
            dims,
            border_width,
            strategy,
            self.settings.max_scratch_bytes,
        )
    }
}
