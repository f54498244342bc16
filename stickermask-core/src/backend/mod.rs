mod parallel;
mod scalar;

use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::foundation::core::GridDims;
use crate::foundation::error::{MaskError, MaskResult};
use crate::kernels::composite::CompositeParams;
use crate::kernels::expand::ExpandStrategy;

pub use parallel::ParallelBackend;
pub use scalar::ScalarBackend;

/// An implementation of the three mask kernels.
///
/// Every backend must produce results identical to [`ScalarBackend`]; the scalar backend is
/// the reference the others are tested against.
pub trait KernelBackend: Send + Sync {
    /// Short stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Settings this backend was created with.
    fn settings(&self) -> &KernelSettings;

    /// Threshold compositing of `mask` into the alpha (and border RGB) of `pixels`.
    fn composite(
        &self,
        pixels: &mut [u8],
        mask: &[f64],
        expanded: Option<&[f64]>,
        dims: GridDims,
        params: &CompositeParams,
    ) -> MaskResult<()>;

    /// Separable box mean of window `kernel_size`.
    fn smooth(
        &self,
        mask: &[f64],
        out: &mut [f64],
        dims: GridDims,
        kernel_size: u32,
    ) -> MaskResult<()>;

    /// Binary dilation of the thresholded mask by `border_width`.
    fn expand(
        &self,
        mask: &[f64],
        out: &mut [f64],
        dims: GridDims,
        border_width: u32,
        strategy: ExpandStrategy,
    ) -> MaskResult<()>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Sequential reference implementation.
    Scalar,
    /// Row-parallel implementation on the current rayon pool.
    Parallel,
    /// Pick once per process from the available hardware threads.
    #[default]
    Auto,
}

static AUTO_KIND: OnceLock<BackendKind> = OnceLock::new();

impl BackendKind {
    /// Resolve [`BackendKind::Auto`] to a concrete kind. Other kinds are returned unchanged.
    pub fn resolve(self) -> Self {
        match self {
            Self::Auto => *AUTO_KIND.get_or_init(detect_kind),
            kind => kind,
        }
    }
}

fn detect_kind() -> BackendKind {
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let kind = if threads > 1 {
        BackendKind::Parallel
    } else {
        BackendKind::Scalar
    };
    tracing::debug!(threads, ?kind, "resolved auto kernel backend");
    kind
}

impl FromStr for BackendKind {
    type Err = MaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(Self::Scalar),
            "parallel" => Ok(Self::Parallel),
            "auto" => Ok(Self::Auto),
            other => Err(MaskError::validation(format!(
                "unknown backend '{other}' (expected scalar, parallel or auto)"
            ))),
        }
    }
}

/// Settings shared by all backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSettings {
    /// Upper bound on the bytes of any single grid allocated on a caller's behalf: kernel
    /// scratch and the smoothed / expanded intermediates of [`crate::apply_sticker`].
    pub max_scratch_bytes: usize,
}

impl Default for KernelSettings {
    fn default() -> Self {
        Self {
            max_scratch_bytes: 1 << 30,
        }
    }
}

/// Create a kernel backend implementation.
pub fn create_backend(
    kind: BackendKind,
    settings: &KernelSettings,
) -> MaskResult<Box<dyn KernelBackend>> {
    match kind.resolve() {
        BackendKind::Parallel => Ok(Box::new(ParallelBackend::new(*settings))),
        BackendKind::Scalar | BackendKind::Auto => Ok(Box::new(ScalarBackend::new(*settings))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backend/mod.rs"]
mod tests;
