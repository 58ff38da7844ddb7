//! Per-file PNG transform: decode, drop unused alpha, re-encode losslessly

use crate::exceptions::{Result, WpkitError};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, DynamicImage};
use log::{debug, trace};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Pixel layout written to the optimized file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutputLayout {
    Rgb8,
    Rgba8,
    Rgb16,
    Rgba16,
}

impl OutputLayout {
    pub fn has_alpha(self) -> bool {
        matches!(self, OutputLayout::Rgba8 | OutputLayout::Rgba16)
    }

    fn color_type(self) -> ColorType {
        match self {
            OutputLayout::Rgb8 => ColorType::Rgb8,
            OutputLayout::Rgba8 => ColorType::Rgba8,
            OutputLayout::Rgb16 => ColorType::Rgb16,
            OutputLayout::Rgba16 => ColorType::Rgba16,
        }
    }
}

/// Result of optimizing one file
#[derive(Debug, Clone, Serialize)]
pub struct ImageOutcome {
    pub file_name: String,
    pub original_bytes: u64,
    pub optimized_bytes: u64,
    /// Decoded layout of the source, e.g. `Rgba8`
    pub source_color: String,
    pub output_layout: OutputLayout,
}

/// Layout to write for a decoded image of `color`.
///
/// Alpha survives only when the source has it and some pixel is not fully
/// opaque. Everything else becomes plain RGB. Sample depth is kept: 8-bit
/// stays 8-bit, wider samples are stored as 16-bit.
pub fn output_layout(color: ColorType, alpha_opaque: bool) -> OutputLayout {
    let keep_alpha = color.has_alpha() && !alpha_opaque;
    let wide = color.bytes_per_pixel() > color.channel_count();

    match (keep_alpha, wide) {
        (false, false) => OutputLayout::Rgb8,
        (true, false) => OutputLayout::Rgba8,
        (false, true) => OutputLayout::Rgb16,
        (true, true) => OutputLayout::Rgba16,
    }
}

/// True when the image has no alpha channel or every alpha sample is at full opacity
pub fn is_alpha_opaque(img: &DynamicImage) -> bool {
    match img {
        DynamicImage::ImageLumaA8(buf) => buf.pixels().all(|p| p.0[1] == u8::MAX),
        DynamicImage::ImageRgba8(buf) => buf.pixels().all(|p| p.0[3] == u8::MAX),
        DynamicImage::ImageLumaA16(buf) => buf.pixels().all(|p| p.0[1] == u16::MAX),
        DynamicImage::ImageRgba16(buf) => buf.pixels().all(|p| p.0[3] == u16::MAX),
        DynamicImage::ImageRgba32F(buf) => buf.pixels().all(|p| p.0[3] >= 1.0),
        _ => true,
    }
}

/// Convert `img` into `layout`, leaving it untouched when it already matches
fn convert(img: DynamicImage, layout: OutputLayout) -> DynamicImage {
    if img.color() == layout.color_type() {
        return img;
    }
    match layout {
        OutputLayout::Rgb8 => DynamicImage::ImageRgb8(img.to_rgb8()),
        OutputLayout::Rgba8 => DynamicImage::ImageRgba8(img.to_rgba8()),
        OutputLayout::Rgb16 => DynamicImage::ImageRgb16(img.to_rgb16()),
        OutputLayout::Rgba16 => DynamicImage::ImageRgba16(img.to_rgba16()),
    }
}

/// Encode `img` as PNG with the strongest lossless settings
pub fn encode_png(img: &DynamicImage) -> image::ImageResult<Vec<u8>> {
    let mut encoded = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut encoded, CompressionType::Best, FilterType::Adaptive);
    img.write_with_encoder(encoder)?;
    Ok(encoded)
}

/// Optimize `src` into `dst`. The source file is never modified.
pub fn optimize_image(src: &Path, dst: &Path) -> Result<ImageOutcome> {
    let original_bytes = fs::metadata(src)?.len();

    let img = image::open(src).map_err(|source| WpkitError::Decode {
        path: src.to_path_buf(),
        source,
    })?;
    let source_color = img.color();
    let alpha_opaque = is_alpha_opaque(&img);
    let layout = output_layout(source_color, alpha_opaque);
    trace!(
        "🎨 {:?}: {:?} {}x{}, opaque={} -> {:?}",
        src,
        source_color,
        img.width(),
        img.height(),
        alpha_opaque,
        layout
    );

    let img = convert(img, layout);
    let encoded = encode_png(&img).map_err(|source| WpkitError::Encode {
        path: dst.to_path_buf(),
        source,
    })?;
    fs::write(dst, &encoded)?;

    let optimized_bytes = encoded.len() as u64;
    debug!(
        "🗜️ {:?}: {} -> {} bytes",
        src.file_name().unwrap_or_default(),
        original_bytes,
        optimized_bytes
    );

    Ok(ImageOutcome {
        file_name: src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        original_bytes,
        optimized_bytes,
        source_color: format!("{source_color:?}"),
        output_layout: layout,
    })
}
