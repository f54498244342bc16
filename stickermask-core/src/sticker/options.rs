use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::BorderColor;
use crate::foundation::error::{MaskError, MaskResult};
use crate::kernels::composite::CompositeParams;
use crate::kernels::expand::ExpandStrategy;

/// Everything [`crate::apply_sticker`] needs besides the buffers.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "add_border": true, "border_width": 6, "border_color": "#ffffff", "smooth_kernel": 5 }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StickerOptions {
    /// Paint an outline around the cutout.
    pub add_border: bool,
    /// Outline radius in pixels.
    pub border_width: u32,
    /// Outline color.
    pub border_color: BorderColor,
    /// Box-blur window applied to the mask first. `0` and `1` disable smoothing.
    pub smooth_kernel: u32,
    /// Dilation strategy for the outline.
    pub expand_strategy: ExpandStrategy,
}

impl Default for StickerOptions {
    fn default() -> Self {
        Self {
            add_border: false,
            border_width: 0,
            border_color: BorderColor::WHITE,
            smooth_kernel: 1,
            expand_strategy: ExpandStrategy::Disk,
        }
    }
}

impl StickerOptions {
    /// Parse and validate a JSON options document.
    pub fn from_json_str(json: &str) -> MaskResult<Self> {
        let opts: Self = serde_json::from_str(json)
            .map_err(|e| MaskError::validation(format!("invalid sticker options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read, parse and validate a JSON options file.
    pub fn from_path(path: &Path) -> MaskResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read sticker options '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Reject combinations the kernels would accept but that are almost certainly mistakes.
    pub fn validate(&self) -> MaskResult<()> {
        if self.smooth_kernel > 1 && self.smooth_kernel.is_multiple_of(2) {
            return Err(MaskError::validation(format!(
                "smooth_kernel must be odd (got {})",
                self.smooth_kernel
            )));
        }
        Ok(())
    }

    /// Whether the mask is smoothed before expansion and compositing.
    pub fn smooths(&self) -> bool {
        self.smooth_kernel > 1
    }

    /// Whether an expanded mask is computed for the outline.
    pub fn expands(&self) -> bool {
        self.add_border && self.border_width > 0
    }

    /// Compositor switches derived from these options.
    pub fn composite_params(&self) -> CompositeParams {
        CompositeParams {
            add_border: self.add_border,
            border_color: self.border_color,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sticker/options.rs"]
mod tests;
