//! TGA header parsing and uncompressed pixel decoding.

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use enough::Stop;

use super::{HEADER_LEN, TgaHeader, TgaImageType};
use crate::error::AssetError;

/// Parse the fixed 18-byte header.
pub(crate) fn parse_header(data: &[u8]) -> Result<TgaHeader, AssetError> {
    if data.len() < HEADER_LEN {
        return Err(AssetError::MalformedHeader(format!(
            "file too small to be TGA: {} bytes, header needs {HEADER_LEN}",
            data.len()
        )));
    }
    Ok(TgaHeader {
        id_length: data[0],
        image_type: TgaImageType::from_u8(data[2]),
        width: u16::from_le_bytes([data[12], data[13]]),
        height: u16::from_le_bytes([data[14], data[15]]),
        pixel_depth: data[16],
        descriptor: data[17],
    })
}

/// Bytes per pixel for an accepted depth.
pub(crate) fn bytes_per_pixel(pixel_depth: u8) -> Result<usize, AssetError> {
    match pixel_depth {
        8 => Ok(1),
        24 => Ok(3),
        32 => Ok(4),
        other => Err(AssetError::UnsupportedPixelDepth(other)),
    }
}

/// Number of source bytes the header promises after the ID field.
pub(crate) fn pixel_data_len(header: &TgaHeader, bpp: usize) -> Result<usize, AssetError> {
    (header.width as usize)
        .checked_mul(header.height as usize)
        .and_then(|wh| wh.checked_mul(bpp))
        .ok_or(AssetError::DimensionsTooLarge {
            width: u32::from(header.width),
            height: u32::from(header.height),
        })
}

/// Decode uncompressed pixels into top-to-bottom RGBA8.
///
/// The caller has already validated depth and buffer length.
pub(crate) fn decode_pixels(
    data: &[u8],
    header: &TgaHeader,
    bpp: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, AssetError> {
    let w = header.width as usize;
    let h = header.height as usize;
    let offset = header.data_offset();
    let src_len = pixel_data_len(header, bpp)?;
    let src = data
        .get(offset..offset + src_len)
        .ok_or(AssetError::Truncated {
            needed: offset + src_len,
            actual: data.len(),
        })?;

    let mut out = vec![0u8; w * h * 4];
    let top_down = header.is_top_down();

    for (y, src_row) in src.chunks_exact(w * bpp).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        let target_y = if top_down { y } else { h - 1 - y };
        let dst_row = &mut out[target_y * w * 4..(target_y + 1) * w * 4];

        match bpp {
            1 => {
                for (dst, &v) in dst_row.chunks_exact_mut(4).zip(src_row) {
                    dst.copy_from_slice(&[v, v, v, 255]);
                }
            }
            3 => {
                for (dst, bgr) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(3)) {
                    dst.copy_from_slice(&[bgr[2], bgr[1], bgr[0], 255]);
                }
            }
            _ => {
                for (dst, bgra) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                    dst.copy_from_slice(&[bgra[2], bgra[1], bgra[0], bgra[3]]);
                }
            }
        }
    }

    Ok(out)
}
