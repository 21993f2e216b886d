//! PNG and JPEG encoding.
//!
//! [`AssetEncoder`] is the seam between the pipeline and the compressed
//! codecs. [`DefaultEncoder`] implements it with the `image` crate.

use alloc::string::ToString;
use alloc::vec::Vec;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder as _};

use crate::error::AssetError;
use crate::raster::RasterBuffer;

/// JPEG quality used for every thumbnail.
pub const JPEG_QUALITY: f32 = 0.9;

/// Encodes a [`RasterBuffer`] to compressed bytes.
///
/// Implementations must be deterministic: the same raster yields the same bytes.
pub trait AssetEncoder: Send + Sync {
    /// Lossless PNG, alpha preserved as straight alpha.
    fn encode_png(&self, raster: &RasterBuffer) -> Result<Vec<u8>, AssetError>;

    /// Baseline JPEG at `quality` in `0.0..=1.0`. Alpha is discarded, so
    /// callers flatten transparency first.
    fn encode_jpeg(&self, raster: &RasterBuffer, quality: f32) -> Result<Vec<u8>, AssetError>;
}

/// Map a `0.0..=1.0` quality to the codec's `1..=100` scale.
pub(crate) fn jpeg_quality_percent(quality: f32) -> Result<u8, AssetError> {
    if !quality.is_finite() || !(0.0..=1.0).contains(&quality) {
        return Err(AssetError::Encode {
            name: "jpeg".into(),
            reason: alloc::format!("quality {quality} outside 0.0..=1.0"),
        });
    }
    Ok((quality * 100.0).round().clamp(1.0, 100.0) as u8)
}

fn encode_error(name: &str, e: image::ImageError) -> AssetError {
    AssetError::Encode {
        name: name.into(),
        reason: e.to_string(),
    }
}

/// [`AssetEncoder`] backed by the `image` crate codecs.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultEncoder;

impl AssetEncoder for DefaultEncoder {
    fn encode_png(&self, raster: &RasterBuffer) -> Result<Vec<u8>, AssetError> {
        let mut buf = Vec::new();
        PngEncoder::new(&mut buf)
            .write_image(
                raster.pixels(),
                raster.width(),
                raster.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| encode_error("png", e))?;
        Ok(buf)
    }

    fn encode_jpeg(&self, raster: &RasterBuffer, quality: f32) -> Result<Vec<u8>, AssetError> {
        let q = jpeg_quality_percent(quality)?;
        let rgb: Vec<u8> = raster
            .pixels()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, q)
            .write_image(
                &rgb,
                raster.width(),
                raster.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| encode_error("jpeg", e))?;
        Ok(buf)
    }
}
