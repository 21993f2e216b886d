//! PNG and JPEG decoding through the `image` crate.

use alloc::string::ToString;
use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use crate::error::AssetError;
use crate::format::SourceFormat;
use crate::limits::Limits;
use crate::raster::RasterBuffer;

fn image_format(format: SourceFormat) -> Result<ImageFormat, AssetError> {
    match format {
        SourceFormat::Png => Ok(ImageFormat::Png),
        SourceFormat::Jpeg => Ok(ImageFormat::Jpeg),
        SourceFormat::Tga => Err(AssetError::UnsupportedInputFormat(
            "tga is handled by the built-in decoder".into(),
        )),
    }
}

fn native_error(e: image::ImageError) -> AssetError {
    AssetError::NativeDecode(e.to_string())
}

/// Decode PNG or JPEG bytes to straight-alpha RGBA8.
///
/// Dimensions are probed and checked against `limits` before the pixel data
/// is decoded.
pub fn decode(
    data: &[u8],
    format: SourceFormat,
    limits: Option<&Limits>,
) -> Result<RasterBuffer, AssetError> {
    let fmt = image_format(format)?;

    if let Some(limits) = limits {
        let (width, height) = ImageReader::with_format(Cursor::new(data), fmt)
            .into_dimensions()
            .map_err(native_error)?;
        limits.check_rgba(width, height)?;
    }

    let img = image::load_from_memory_with_format(data, fmt).map_err(native_error)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterBuffer::new(width, height, rgba.into_raw())
}
