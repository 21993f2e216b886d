use enough::Stop;

use crate::error::AssetError;
use crate::format::SourceFormat;
use crate::limits::Limits;
use crate::raster::RasterBuffer;
use crate::{native, tga};

/// Decode request: input bytes plus the file name used to route them.
///
/// ```no_run
/// use zeniconset::{DecodeRequest, Limits, Unstoppable};
///
/// let bytes = std::fs::read("logo.tga")?;
/// let limits = Limits { max_pixels: Some(64 << 20), ..Default::default() };
/// let raster = DecodeRequest::new(&bytes, "logo.tga")
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{}", raster.width(), raster.height());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    filename: &'a str,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8], filename: &'a str) -> Self {
        Self {
            data,
            filename,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// The routed input format, or `UnsupportedInputFormat`.
    pub fn format(&self) -> Result<SourceFormat, AssetError> {
        SourceFormat::from_filename(self.filename)
            .ok_or_else(|| AssetError::UnsupportedInputFormat(self.filename.into()))
    }

    /// Decode to the single RGBA8 raster every output is derived from.
    pub fn decode(self, stop: impl Stop) -> Result<RasterBuffer, AssetError> {
        self.decode_with(&stop)
    }

    pub(crate) fn decode_with(self, stop: &dyn Stop) -> Result<RasterBuffer, AssetError> {
        let format = self.format()?;
        tracing::debug!(?format, bytes = self.data.len(), file = self.filename, "decoding");
        stop.check()?;

        let raster = match format {
            SourceFormat::Tga => tga::decode_with(self.data, self.limits, stop)?
                .ok_or_else(|| AssetError::UnrecognizedTga(self.data[2]))?,
            other => native::decode(self.data, other, self.limits)?,
        };

        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            "decoded source image"
        );
        Ok(raster)
    }
}
