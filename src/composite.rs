//! Flatten straight-alpha pixels onto an opaque background.

use alloc::vec::Vec;

use enough::Stop;
use rgb::RGB8;

use crate::error::AssetError;
use crate::raster::RasterBuffer;

/// Background used before JPEG encoding.
pub const WHITE: RGB8 = RGB8 { r: 255, g: 255, b: 255 };

#[inline]
fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(fg) * a + u32::from(bg) * (255 - a) + 127) / 255) as u8
}

/// Alpha-blend `src` over a canvas filled with `background`.
///
/// The result is fully opaque. Fully transparent source pixels come out as
/// exactly `background`.
pub fn flatten_onto(
    src: &RasterBuffer,
    background: RGB8,
    stop: impl Stop,
) -> Result<RasterBuffer, AssetError> {
    flatten_with(src, background, &stop)
}

pub(crate) fn flatten_with(
    src: &RasterBuffer,
    background: RGB8,
    stop: &dyn Stop,
) -> Result<RasterBuffer, AssetError> {
    let row_bytes = src.width() as usize * 4;
    let mut out = Vec::with_capacity(src.pixels().len());

    for (y, row) in src.pixels().chunks_exact(row_bytes).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in row.chunks_exact(4) {
            let a = px[3];
            out.extend_from_slice(&[
                blend(px[0], background.r, a),
                blend(px[1], background.g, a),
                blend(px[2], background.b, a),
                255,
            ]);
        }
    }

    RasterBuffer::new(src.width(), src.height(), out)
        .map_err(|e| AssetError::Composition(alloc::format!("{e}")))
}
