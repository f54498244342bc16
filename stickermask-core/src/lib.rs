//! Stickermask turns a soft segmentation mask into a sticker-style cutout of an RGBA image.
//!
//! Three kernels do the work, all over caller-owned buffers:
//!
//! 1. **Smooth**: separable box mean over the mask ([`smooth_mask`])
//! 2. **Expand**: binary dilation of `mask > 0.5` by the outline radius ([`expand_mask`])
//! 3. **Composite**: threshold the mask into alpha and paint the outline ([`composite_mask`])
//!
//! [`apply_sticker`] chains them for one image and [`apply_sticker_batch`] runs many images
//! on a rayon pool.
//!
//! Every kernel validates its buffers before writing anything. Errors carry a
//! [`MaskError`] whose [`MaskError::status`] maps to the host-facing [`StatusCode`]; the
//! [`status`] module exposes the same operations with host-shaped arguments.
//!
//! Kernels run on a [`KernelBackend`]. [`ScalarBackend`] is the reference; [`ParallelBackend`]
//! splits rows across the current rayon pool and produces identical output.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod backend;
mod foundation;
mod kernels;
mod sticker;

pub mod io;
pub mod status;

pub use backend::{
    BackendKind, KernelBackend, KernelSettings, ParallelBackend, ScalarBackend, create_backend,
};
pub use foundation::core::{BorderColor, GridDims};
pub use foundation::error::{MaskError, MaskResult, StatusCode};
pub use foundation::scratch::SCRATCH_ALIGN_BYTES;
pub use kernels::composite::{
    Band, CompositeParams, THRESHOLD, THRESHOLD_HIGH, THRESHOLD_LOW, classify, transition_alpha,
};
pub use kernels::expand::{ExpandStrategy, HYBRID_DISK_MAX_RADIUS};
pub use kernels::{composite_mask, expand_mask, smooth_mask};
pub use sticker::options::StickerOptions;
pub use sticker::pipeline::{BatchOpts, StickerJob, apply_sticker, apply_sticker_batch};
