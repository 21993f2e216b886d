use crate::error::AssetError;

/// Resource limits for decode and resample operations.
///
/// All fields default to `None` (no limit). The output table only ever asks
/// for small targets, so in practice these bound the source image.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for a single buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), AssetError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(AssetError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(AssetError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(AssetError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Dimension checks plus the size of the RGBA8 buffer a decode of
    /// `width` x `height` would allocate.
    pub(crate) fn check_rgba(&self, width: u32, height: u32) -> Result<(), AssetError> {
        self.check(width, height)?;
        let bytes = crate::raster::rgba_len(width, height)? as u64;
        match self.max_memory_bytes {
            Some(max_mem) if bytes > max_mem => Err(AssetError::LimitExceeded(alloc::format!(
                "RGBA buffer of {bytes} bytes ({width}x{height}) exceeds memory limit {max_mem}"
            ))),
            _ => Ok(()),
        }
    }
}
