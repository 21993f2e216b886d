//! Truevision TGA decoder (uncompressed truecolor and grayscale only).
//!
//! Layout: an 18-byte little-endian header, an optional image ID of
//! `id_length` bytes, then pixel rows. Truecolor pixels are stored as BGR or
//! BGRA; rows run bottom-to-top unless descriptor bit 5 is set. Colour maps
//! are never consulted, so a colour-map length in the header is ignored.
//!
//! Type 10 (RLE truecolor) is recognised and rejected with
//! [`AssetError::UnsupportedImageType`]. Every other type besides 2 and 3
//! decodes to `Ok(None)`: the bytes are not a TGA this decoder understands,
//! which is a different outcome from a TGA it recognises but refuses.

pub(crate) mod decode;

use crate::error::AssetError;
use crate::limits::Limits;
use crate::raster::RasterBuffer;
use enough::Stop;

/// Size of the fixed TGA header.
pub const HEADER_LEN: usize = 18;

/// The image type byte at offset 2.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TgaImageType {
    /// 2: uncompressed truecolor (BGR / BGRA).
    UncompressedTrueColor,
    /// 3: uncompressed grayscale.
    UncompressedGrayscale,
    /// 10: run-length encoded truecolor.
    RleTrueColor,
    /// Anything else (colour-mapped, other RLE variants, garbage).
    Other(u8),
}

impl TgaImageType {
    pub fn from_u8(v: u8) -> Self {
        match v {
            2 => Self::UncompressedTrueColor,
            3 => Self::UncompressedGrayscale,
            10 => Self::RleTrueColor,
            other => Self::Other(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Self::UncompressedTrueColor => 2,
            Self::UncompressedGrayscale => 3,
            Self::RleTrueColor => 10,
            Self::Other(v) => v,
        }
    }
}

/// Parsed TGA header fields this decoder uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub image_type: TgaImageType,
    pub width: u16,
    pub height: u16,
    /// Bits per pixel: 8, 24 or 32 are accepted.
    pub pixel_depth: u8,
    /// Image descriptor; bit 5 marks a top-left origin.
    pub descriptor: u8,
}

/// Descriptor bit 5: rows are stored top-to-bottom.
const TOP_LEFT_ORIGIN: u8 = 0x20;

impl TgaHeader {
    /// Offset of the first pixel byte.
    pub fn data_offset(&self) -> usize {
        HEADER_LEN + self.id_length as usize
    }

    /// Whether source row 0 is the visually topmost row.
    pub fn is_top_down(&self) -> bool {
        self.descriptor & TOP_LEFT_ORIGIN != 0
    }
}

/// Parse only the header.
pub fn parse_header(data: &[u8]) -> Result<TgaHeader, AssetError> {
    decode::parse_header(data)
}

/// Decode a TGA byte stream into a [`RasterBuffer`].
///
/// Returns `Ok(None)` for image types that are neither uncompressed
/// truecolor/grayscale nor RLE truecolor.
pub fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: impl Stop,
) -> Result<Option<RasterBuffer>, AssetError> {
    decode_with(data, limits, &stop)
}

pub(crate) fn decode_with(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Option<RasterBuffer>, AssetError> {
    let header = decode::parse_header(data)?;
    tracing::debug!(?header, "parsed TGA header");

    match header.image_type {
        TgaImageType::UncompressedTrueColor | TgaImageType::UncompressedGrayscale => {}
        TgaImageType::RleTrueColor => {
            return Err(AssetError::UnsupportedImageType(header.image_type.to_u8()));
        }
        TgaImageType::Other(t) => {
            tracing::warn!(
                image_type = t,
                "TGA image type not supported, only uncompressed RGB/grayscale"
            );
            return Ok(None);
        }
    }

    let bpp = decode::bytes_per_pixel(header.pixel_depth)?;

    if header.width == 0 || header.height == 0 {
        return Err(AssetError::MalformedHeader(alloc::format!(
            "zero image dimension {}x{}",
            header.width,
            header.height
        )));
    }
    let (width, height) = (u32::from(header.width), u32::from(header.height));
    if let Some(limits) = limits {
        limits.check_rgba(width, height)?;
    }

    let needed = header
        .data_offset()
        .checked_add(decode::pixel_data_len(&header, bpp)?)
        .ok_or(AssetError::DimensionsTooLarge { width, height })?;
    if data.len() < needed {
        return Err(AssetError::Truncated {
            needed,
            actual: data.len(),
        });
    }

    stop.check()?;
    let pixels = decode::decode_pixels(data, &header, bpp, stop)?;
    RasterBuffer::new(width, height, pixels).map(Some)
}
