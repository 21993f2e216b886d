//! Zip packaging of generated assets.

use std::io::{Cursor, Write as _};

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::AssetError;
use crate::pipeline::GeneratedAsset;

/// Default file name for the bundled download.
pub const ARCHIVE_NAME: &str = "generated_icons.zip";

fn archive_error(e: impl core::fmt::Display) -> AssetError {
    AssetError::Archive(alloc::format!("{e}"))
}

/// Store each `(name, bytes)` entry verbatim in a new zip archive.
///
/// Entries are stored uncompressed: every payload is already a compressed
/// image format. Entry order follows the iterator; duplicate names fail.
pub fn zip_entries<'a, I>(entries: I) -> Result<Vec<u8>, AssetError>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        writer.start_file(name, options).map_err(archive_error)?;
        writer.write_all(bytes)?;
    }

    let cursor = writer.finish().map_err(archive_error)?;
    Ok(cursor.into_inner())
}

/// Zip generated assets under their names, in order.
pub fn zip_assets(assets: &[GeneratedAsset]) -> Result<Vec<u8>, AssetError> {
    zip_entries(assets.iter().map(|a| (a.name(), a.bytes())))
}
