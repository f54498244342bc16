//! Host-side helpers for moving images and masks in and out of PNG files.
//!
//! The kernels never see encoded data; these helpers exist for the CLI and for callers that
//! start from files.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::GridDims;
use crate::foundation::error::MaskResult;
use crate::kernels::check_len;

/// Decode encoded image bytes into straight (non-premultiplied) RGBA8.
pub fn decode_rgba8(bytes: &[u8]) -> MaskResult<(GridDims, Vec<u8>)> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((GridDims::new(width, height)?, rgba.into_raw()))
}

/// Decode an encoded grayscale mask. Luma `0..=255` maps to `0.0..=1.0`.
pub fn decode_mask(bytes: &[u8]) -> MaskResult<(GridDims, Vec<f64>)> {
    let img = image::load_from_memory(bytes).context("decode mask from memory")?;
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    let mask = luma
        .into_raw()
        .into_iter()
        .map(|v| f64::from(v) / 255.0)
        .collect();
    Ok((GridDims::new(width, height)?, mask))
}

/// Quantize mask values to luma bytes, clamping to `0.0..=1.0`.
pub fn mask_to_luma8(mask: &[f64]) -> Vec<u8> {
    mask.iter()
        .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect()
}

/// Write RGBA8 pixels as a PNG file.
pub fn write_rgba8_png(path: &Path, dims: GridDims, rgba: &[u8]) -> MaskResult<()> {
    check_len("pixels", rgba.len(), dims.rgba_len()?)?;
    image::save_buffer_with_format(
        path,
        rgba,
        dims.width,
        dims.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Write a mask as an 8-bit grayscale PNG file.
pub fn write_mask_png(path: &Path, dims: GridDims, mask: &[f64]) -> MaskResult<()> {
    check_len("mask", mask.len(), dims.cell_count()?)?;
    image::save_buffer_with_format(
        path,
        &mask_to_luma8(mask),
        dims.width,
        dims.height,
        image::ColorType::L8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/io.rs"]
mod tests;
