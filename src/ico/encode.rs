//! ICO encoder: one directory entry pointing at an embedded PNG.

use alloc::vec::Vec;

use super::{DIR_ENTRY_LEN, ICONDIR_LEN, PAYLOAD_OFFSET};
use crate::error::AssetError;

/// Map a pixel dimension to the directory-entry byte (256 and above are stored as 0).
pub(crate) fn size_byte(v: u32, width: u32, height: u32) -> Result<u8, AssetError> {
    match v {
        0 => Err(AssetError::InvalidDimensions { width, height }),
        1..=255 => Ok(v as u8),
        _ => Ok(0),
    }
}

pub(crate) fn encode_ico(png: &[u8], width: u32, height: u32) -> Result<Vec<u8>, AssetError> {
    let w = size_byte(width, width, height)?;
    let h = size_byte(height, width, height)?;
    let size = u32::try_from(png.len()).map_err(|_| {
        AssetError::LimitExceeded(alloc::format!(
            "PNG payload of {} bytes does not fit an ICO entry",
            png.len()
        ))
    })?;

    let mut out = Vec::with_capacity(PAYLOAD_OFFSET + png.len());

    // ICONDIR (6 bytes)
    out.extend_from_slice(&0u16.to_le_bytes()); // reserved
    out.extend_from_slice(&1u16.to_le_bytes()); // type: icon
    out.extend_from_slice(&1u16.to_le_bytes()); // image count
    debug_assert_eq!(out.len(), ICONDIR_LEN);

    // ICONDIRENTRY (16 bytes)
    out.push(w);
    out.push(h);
    out.push(0); // palette colour count
    out.push(0); // reserved
    out.extend_from_slice(&1u16.to_le_bytes()); // colour planes
    out.extend_from_slice(&32u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&size.to_le_bytes());
    out.extend_from_slice(&(PAYLOAD_OFFSET as u32).to_le_bytes());
    debug_assert_eq!(out.len(), ICONDIR_LEN + DIR_ENTRY_LEN);

    out.extend_from_slice(png);
    Ok(out)
}
