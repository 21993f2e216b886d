//! Minimal single-image ICO container around a PNG payload.
//!
//! ```text
//! offset 0   u16 reserved = 0
//! offset 2   u16 type = 1 (icon)
//! offset 4   u16 count = 1
//! offset 6   u8  width  (0 means 256 or more)
//! offset 7   u8  height (0 means 256 or more)
//! offset 8   u8  palette colour count = 0
//! offset 9   u8  reserved = 0
//! offset 10  u16 colour planes = 1
//! offset 12  u16 bits per pixel = 32
//! offset 14  u32 payload size
//! offset 18  u32 payload offset = 22
//! offset 22  PNG bytes
//! ```

mod encode;

use alloc::vec::Vec;

use crate::error::AssetError;

pub(crate) const ICONDIR_LEN: usize = 6;
pub(crate) const DIR_ENTRY_LEN: usize = 16;
/// Where the PNG payload starts in a single-image container.
pub const PAYLOAD_OFFSET: usize = ICONDIR_LEN + DIR_ENTRY_LEN;

/// Wrap already-encoded PNG bytes in an ICO container.
///
/// `width` and `height` describe the PNG and must be nonzero. Sizes of 256
/// and above are recorded as 0 in the directory entry.
pub fn encode(png: &[u8], width: u32, height: u32) -> Result<Vec<u8>, AssetError> {
    encode::encode_ico(png, width, height)
}

/// Directory entry read back from a single-image ICO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IcoEntry {
    /// Pixel width, with the 0 byte expanded to 256.
    pub width: u32,
    /// Pixel height, with the 0 byte expanded to 256.
    pub height: u32,
    pub bits_per_pixel: u16,
    pub size: u32,
    pub offset: u32,
}

/// Read the first directory entry and return it with its payload slice.
pub fn read_first(data: &[u8]) -> Result<(IcoEntry, &[u8]), AssetError> {
    if data.len() < PAYLOAD_OFFSET {
        return Err(AssetError::MalformedHeader(alloc::format!(
            "ICO too small: {} bytes",
            data.len()
        )));
    }
    let u16_at = |o: usize| u16::from_le_bytes([data[o], data[o + 1]]);
    let u32_at = |o: usize| u32::from_le_bytes([data[o], data[o + 1], data[o + 2], data[o + 3]]);
    if u16_at(0) != 0 || u16_at(2) != 1 || u16_at(4) == 0 {
        return Err(AssetError::MalformedHeader("not an icon directory".into()));
    }
    let expand = |b: u8| if b == 0 { 256 } else { u32::from(b) };
    let entry = IcoEntry {
        width: expand(data[6]),
        height: expand(data[7]),
        bits_per_pixel: u16_at(12),
        size: u32_at(14),
        offset: u32_at(18),
    };
    let start = entry.offset as usize;
    let payload = start
        .checked_add(entry.size as usize)
        .and_then(|end| data.get(start..end))
        .ok_or(AssetError::Truncated {
            needed: start.saturating_add(entry.size as usize),
            actual: data.len(),
        })?;
    Ok((entry, payload))
}
