use alloc::string::String;
use enough::StopReason;

/// Errors from decoding, transforming, encoding and packaging assets.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AssetError {
    #[error("unsupported input format: {0} (expected png, jpg, jpeg or tga)")]
    UnsupportedInputFormat(String),

    #[error("malformed TGA header: {0}")]
    MalformedHeader(String),

    #[error("TGA file appears truncated: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },

    #[error("unsupported TGA pixel depth: {0} bits")]
    UnsupportedPixelDepth(u8),

    #[error(
        "unsupported TGA image type {0}: RLE compressed TGA files are not supported, save as uncompressed TGA"
    )]
    UnsupportedImageType(u8),

    #[error("failed to parse TGA file: image type {0} is not uncompressed truecolor or grayscale")]
    UnrecognizedTga(u8),

    #[error("image decode failed: {0}")]
    NativeDecode(String),

    #[error("encoding {name} failed: {reason}")]
    Encode { name: String, reason: String },

    #[error("compositing failed: {0}")]
    Composition(String),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("archive failed: {0}")]
    Archive(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl AssetError {
    /// Whether this error belongs to the decode stage and aborts the whole run.
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedInputFormat(_)
                | Self::MalformedHeader(_)
                | Self::Truncated { .. }
                | Self::UnsupportedPixelDepth(_)
                | Self::UnsupportedImageType(_)
                | Self::UnrecognizedTga(_)
                | Self::NativeDecode(_)
        )
    }
}

impl From<StopReason> for AssetError {
    fn from(r: StopReason) -> Self {
        AssetError::Cancelled(r)
    }
}
