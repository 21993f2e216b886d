//! Decode once, then derive the fixed set of icon and thumbnail assets.
//!
//! Every entry of [`OUTPUTS`] is an independent branch reading the shared
//! decoded raster. A branch that fails to resample, composite or encode is
//! logged and left out of the result; decode failures and cancellation abort
//! the whole run.

use alloc::string::String;
use alloc::vec::Vec;
use std::path::Path;

use enough::Stop;

use crate::archive;
use crate::composite::{self, WHITE};
use crate::decode::DecodeRequest;
use crate::encode::{AssetEncoder, DefaultEncoder, JPEG_QUALITY};
use crate::error::AssetError;
use crate::format::MimeType;
use crate::ico;
use crate::limits::Limits;
use crate::raster::RasterBuffer;
use crate::resample::{self, CropPolicy, SourceRect};

/// One row of the output table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputSpec {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub mime: MimeType,
    pub policy: CropPolicy,
}

impl OutputSpec {
    const fn new(
        name: &'static str,
        width: u32,
        height: u32,
        mime: MimeType,
        policy: CropPolicy,
    ) -> Self {
        Self {
            name,
            width,
            height,
            mime,
            policy,
        }
    }

    /// JPEG outputs are composited onto white before encoding.
    pub fn flattens_alpha(&self) -> bool {
        !self.mime.supports_alpha()
    }
}

/// The generated assets, in result order.
pub static OUTPUTS: [OutputSpec; 7] = [
    OutputSpec::new("favicon.ico", 48, 48, MimeType::Ico, CropPolicy::StretchFit),
    OutputSpec::new("icon128.png", 128, 128, MimeType::Png, CropPolicy::StretchFit),
    OutputSpec::new("icon48.png", 48, 48, MimeType::Png, CropPolicy::StretchFit),
    OutputSpec::new("icon32.png", 32, 32, MimeType::Png, CropPolicy::StretchFit),
    OutputSpec::new("icon16.png", 16, 16, MimeType::Png, CropPolicy::StretchFit),
    OutputSpec::new("thumb_1.jpg", 256, 192, MimeType::Jpeg, CropPolicy::CenterCropFit),
    OutputSpec::new("thumb_2.jpg", 256, 256, MimeType::Jpeg, CropPolicy::StretchFit),
];

/// An encoded output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedAsset {
    name: String,
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    mime: MimeType,
}

impl GeneratedAsset {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, width: u32, height: u32, mime: MimeType) -> Self {
        Self {
            name: name.into(),
            bytes,
            width,
            height,
            mime,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mime(&self) -> MimeType {
        self.mime
    }

    /// Write the asset to `dir/<name>`.
    pub fn write_to_dir(&self, dir: &Path) -> Result<(), AssetError> {
        std::fs::write(dir.join(&self.name), &self.bytes)?;
        Ok(())
    }
}

/// A branch that produced no asset.
#[derive(Debug)]
pub struct SkippedAsset {
    pub name: &'static str,
    pub error: AssetError,
}

/// Result of a pipeline run.
#[derive(Debug, Default)]
pub struct AssetSet {
    /// Produced assets, in [`OUTPUTS`] order.
    pub assets: Vec<GeneratedAsset>,
    /// Branches that failed, in [`OUTPUTS`] order.
    pub skipped: Vec<SkippedAsset>,
}

impl AssetSet {
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, GeneratedAsset> {
        self.assets.iter()
    }

    /// Look an asset up by file name.
    pub fn get(&self, name: &str) -> Option<&GeneratedAsset> {
        self.assets.iter().find(|a| a.name == name)
    }

    pub fn into_assets(self) -> Vec<GeneratedAsset> {
        self.assets
    }

    /// Bundle every asset into a zip archive.
    pub fn to_zip(&self) -> Result<Vec<u8>, AssetError> {
        archive::zip_assets(&self.assets)
    }

    /// Write every asset into `dir`, which must exist.
    pub fn write_to_dir(&self, dir: &Path) -> Result<(), AssetError> {
        for asset in &self.assets {
            asset.write_to_dir(dir)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a AssetSet {
    type Item = &'a GeneratedAsset;
    type IntoIter = core::slice::Iter<'a, GeneratedAsset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.iter()
    }
}

/// Decode-and-derive pipeline.
///
/// ```no_run
/// use zeniconset::{AssetPipeline, Unstoppable};
///
/// let bytes = std::fs::read("logo.png")?;
/// let set = AssetPipeline::new().run(&bytes, "logo.png", Unstoppable)?;
/// for asset in &set {
///     println!("{} {}x{} {}", asset.name(), asset.width(), asset.height(), asset.mime());
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct AssetPipeline<E = DefaultEncoder> {
    encoder: E,
    limits: Limits,
}

impl AssetPipeline<DefaultEncoder> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: AssetEncoder> AssetPipeline<E> {
    /// Use a custom PNG/JPEG encoder.
    pub fn with_encoder(encoder: E) -> Self {
        Self {
            encoder,
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Decode `data` (routed by `filename`) and generate every output.
    pub fn run(
        &self,
        data: &[u8],
        filename: &str,
        stop: impl Stop + Sync,
    ) -> Result<AssetSet, AssetError> {
        let raster = DecodeRequest::new(data, filename)
            .with_limits(&self.limits)
            .decode_with(&stop)?;
        self.generate(&raster, stop)
    }

    /// Generate every output from an already decoded raster.
    pub fn generate(
        &self,
        raster: &RasterBuffer,
        stop: impl Stop + Sync,
    ) -> Result<AssetSet, AssetError> {
        let outcomes = self.render_all(raster, &stop);

        let mut set = AssetSet::default();
        for (output, outcome) in OUTPUTS.iter().zip(outcomes) {
            match outcome {
                Ok(asset) => {
                    tracing::debug!(
                        name = output.name,
                        width = asset.width,
                        height = asset.height,
                        bytes = asset.bytes.len(),
                        "generated asset"
                    );
                    set.assets.push(asset);
                }
                Err(AssetError::Cancelled(reason)) => return Err(AssetError::Cancelled(reason)),
                Err(error) => {
                    tracing::warn!(name = output.name, %error, "skipping asset");
                    set.skipped.push(SkippedAsset {
                        name: output.name,
                        error,
                    });
                }
            }
        }
        Ok(set)
    }

    #[cfg(not(feature = "parallel"))]
    fn render_all<S: Stop + Sync>(
        &self,
        raster: &RasterBuffer,
        stop: &S,
    ) -> Vec<Result<GeneratedAsset, AssetError>> {
        OUTPUTS
            .iter()
            .map(|output| self.render(raster, output, stop))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn render_all<S: Stop + Sync>(
        &self,
        raster: &RasterBuffer,
        stop: &S,
    ) -> Vec<Result<GeneratedAsset, AssetError>> {
        use rayon::prelude::*;

        // Indexed collect keeps table order regardless of completion order.
        OUTPUTS[..]
            .par_iter()
            .map(|output| self.render(raster, output, stop))
            .collect()
    }

    /// Produce a single output. `raster` is only read.
    pub fn render(
        &self,
        raster: &RasterBuffer,
        output: &OutputSpec,
        stop: &dyn Stop,
    ) -> Result<GeneratedAsset, AssetError> {
        let rect = SourceRect::for_policy(
            raster.width(),
            raster.height(),
            output.width,
            output.height,
            output.policy,
        );
        let resized = resample::resample_rect(raster, rect, output.width, output.height, stop)?;

        let bytes = match output.mime {
            MimeType::Png => self.encoder.encode_png(&resized)?,
            MimeType::Ico => {
                let png = self.encoder.encode_png(&resized)?;
                ico::encode(&png, resized.width(), resized.height())?
            }
            MimeType::Jpeg => {
                let flat = composite::flatten_with(&resized, WHITE, stop)?;
                self.encoder.encode_jpeg(&flat, JPEG_QUALITY)?
            }
        };

        Ok(GeneratedAsset::new(
            output.name,
            bytes,
            resized.width(),
            resized.height(),
            output.mime,
        ))
    }
}
