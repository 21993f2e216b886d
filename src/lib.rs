//! # zeniconset
//!
//! Turn one source image into a fixed set of web assets: a favicon, four PNG
//! icons and two JPEG thumbnails, optionally bundled as a zip.
//!
//! ## Outputs
//!
//! | name | size | type | fit |
//! |---|---|---|---|
//! | `favicon.ico` | 48x48 | ICO (PNG payload) | stretch |
//! | `icon128.png` | 128x128 | PNG | stretch |
//! | `icon48.png` | 48x48 | PNG | stretch |
//! | `icon32.png` | 32x32 | PNG | stretch |
//! | `icon16.png` | 16x16 | PNG | stretch |
//! | `thumb_1.jpg` | 256x192 | JPEG q0.9 on white | vertical center crop |
//! | `thumb_2.jpg` | 256x256 | JPEG q0.9 on white | stretch |
//!
//! ## Inputs
//!
//! - **PNG / JPEG**: decoded by the `image` crate.
//! - **TGA**: built-in decoder for uncompressed truecolor (24/32-bit) and
//!   grayscale (8-bit). RLE files are rejected with an explicit error.
//!
//! The input is routed by file extension (`png`, `jpg`, `jpeg`, `tga`, any case).
//!
//! ## Non-Goals
//!
//! - RLE or colour-mapped TGA
//! - Configurable output sizes
//! - Filters beyond area-average / bilinear resampling
//!
//! ## Usage
//!
//! ```no_run
//! use zeniconset::{AssetPipeline, Unstoppable, archive};
//!
//! let bytes = std::fs::read("logo.tga")?;
//! let set = AssetPipeline::new().run(&bytes, "logo.tga", Unstoppable)?;
//! for skipped in &set.skipped {
//!     eprintln!("{} not generated: {}", skipped.name, skipped.error);
//! }
//! std::fs::write(archive::ARCHIVE_NAME, set.to_zip()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod format;
mod limits;
mod raster;

pub mod archive;
pub mod composite;
pub mod encode;
pub mod ico;
pub mod native;
pub mod pipeline;
pub mod resample;
pub mod tga;

// Re-exports
pub use decode::DecodeRequest;
pub use encode::{AssetEncoder, DefaultEncoder, JPEG_QUALITY};
pub use enough::{Stop, Unstoppable};
pub use error::AssetError;
pub use format::{MimeType, SourceFormat};
pub use limits::Limits;
pub use pipeline::{AssetPipeline, AssetSet, GeneratedAsset, OUTPUTS, OutputSpec, SkippedAsset};
pub use raster::RasterBuffer;
pub use resample::{CropPolicy, SourceRect, resample};
