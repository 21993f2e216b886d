//! In-memory RGBA8 raster shared by every pipeline stage.

use alloc::vec;
use alloc::vec::Vec;

use imgref::{ImgRef, ImgVec};
use rgb::{FromSlice as _, RGBA8};

use crate::error::AssetError;

/// Decoded image: row-major, top-to-bottom, RGBA8 with straight alpha.
///
/// `pixels().len() == width * height * 4` and both dimensions are non-zero
/// for every value of this type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Byte length of an RGBA8 buffer, with overflow mapped to an error.
pub(crate) fn rgba_len(width: u32, height: u32) -> Result<usize, AssetError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or(AssetError::DimensionsTooLarge { width, height })
}

impl RasterBuffer {
    /// Wrap an RGBA8 byte buffer, validating its length against the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::InvalidDimensions { width, height });
        }
        let expected = rgba_len(width, height)?;
        if pixels.len() != expected {
            return Err(AssetError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: RGBA8) -> Result<Self, AssetError> {
        if width == 0 || height == 0 {
            return Err(AssetError::InvalidDimensions { width, height });
        }
        let len = rgba_len(width, height)?;
        let mut pixels = vec![0u8; len];
        for px in pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build from a typed image buffer. Padding columns (stride > width) are dropped.
    pub fn from_imgvec(img: ImgVec<RGBA8>) -> Result<Self, AssetError> {
        let width = u32::try_from(img.width()).map_err(|_| AssetError::DimensionsTooLarge {
            width: u32::MAX,
            height: img.height() as u32,
        })?;
        let height = u32::try_from(img.height()).map_err(|_| AssetError::DimensionsTooLarge {
            width,
            height: u32::MAX,
        })?;
        let (w, stride) = (img.width(), img.stride());
        let mut pixels = Vec::with_capacity(rgba_len(width, height)?);
        for row in img.buf().chunks(stride).take(img.height()) {
            for px in &row[..w] {
                pixels.extend_from_slice(&[px.r, px.g, px.b, px.a]);
            }
        }
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the raw RGBA8 bytes.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Pixel data as typed RGBA values.
    pub fn as_rgba(&self) -> &[RGBA8] {
        self.pixels.as_rgba()
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    pub fn as_imgref(&self) -> ImgRef<'_, RGBA8> {
        ImgRef::new(self.as_rgba(), self.width as usize, self.height as usize)
    }

    /// One row of typed pixels, `y` counted from the top.
    pub fn row(&self, y: u32) -> Option<&[RGBA8]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.as_rgba()[start..start + w])
    }

    /// The pixel at (x, y), or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width {
            return None;
        }
        self.row(y).map(|row| row[x as usize])
    }

    /// Whether any pixel has alpha below 255.
    pub fn has_transparency(&self) -> bool {
        self.pixels.chunks_exact(4).any(|px| px[3] != 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length() {
        let err = RasterBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            AssetError::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn rejects_zero_dimension() {
        assert!(matches!(
            RasterBuffer::new(0, 3, Vec::new()),
            Err(AssetError::InvalidDimensions { .. })
        ));
        assert!(RasterBuffer::filled(3, 0, RGBA8::new(0, 0, 0, 0)).is_err());
    }

    #[test]
    fn imgvec_with_stride_drops_padding() {
        let red = RGBA8::new(255, 0, 0, 255);
        let pad = RGBA8::new(1, 2, 3, 4);
        let img = ImgVec::new_stride(vec![red, red, pad, red, red, pad], 2, 2, 3);
        let raster = RasterBuffer::from_imgvec(img).unwrap();
        assert_eq!(raster.width(), 2);
        assert_eq!(raster.height(), 2);
        assert!(raster.as_rgba().iter().all(|&p| p == red));
    }

    #[test]
    fn pixel_lookup_is_top_down() {
        let mut bytes = vec![0u8; 2 * 3 * 4];
        // (1, 2): last pixel of the bottom row
        bytes[20..24].copy_from_slice(&[9, 8, 7, 6]);
        let raster = RasterBuffer::new(2, 3, bytes).unwrap();
        assert_eq!(raster.pixel(1, 2), Some(RGBA8::new(9, 8, 7, 6)));
        assert_eq!(raster.pixel(2, 0), None);
        assert_eq!(raster.pixel(0, 3), None);
        assert_eq!(raster.as_imgref().height(), 3);
    }
}
