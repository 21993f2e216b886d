/// Input format, routed from the file name extension.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Portable Network Graphics, decoded by the `image` crate.
    Png,
    /// JPEG (`.jpg` or `.jpeg`), decoded by the `image` crate.
    Jpeg,
    /// Truevision TGA, decoded by [`crate::tga`].
    Tga,
}

impl SourceFormat {
    /// Route a file name to a decoder. Extension matching is case-insensitive.
    ///
    /// Returns `None` for anything other than png, jpg, jpeg or tga.
    pub fn from_filename(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    /// Match a bare extension (no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("png") {
            Some(Self::Png)
        } else if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            Some(Self::Jpeg)
        } else if ext.eq_ignore_ascii_case("tga") {
            Some(Self::Tga)
        } else {
            None
        }
    }
}

/// Output container type of a generated asset.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MimeType {
    Png,
    Jpeg,
    Ico,
}

impl MimeType {
    /// MIME string as served to browsers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Ico => "image/x-icon",
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Ico => "ico",
        }
    }

    /// Whether the format can carry an alpha channel.
    pub fn supports_alpha(&self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

impl core::fmt::Display for MimeType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_extensions_case_insensitively() {
        assert_eq!(SourceFormat::from_filename("logo.PNG"), Some(SourceFormat::Png));
        assert_eq!(SourceFormat::from_filename("a.b.JpEg"), Some(SourceFormat::Jpeg));
        assert_eq!(SourceFormat::from_filename("photo.jpg"), Some(SourceFormat::Jpeg));
        assert_eq!(SourceFormat::from_filename("sprite.Tga"), Some(SourceFormat::Tga));
        assert_eq!(SourceFormat::from_filename("icon.gif"), None);
        assert_eq!(SourceFormat::from_filename("png"), None);
        assert_eq!(SourceFormat::from_filename("archive.tga.zip"), None);
    }

    #[test]
    fn mime_strings() {
        assert_eq!(MimeType::Ico.as_str(), "image/x-icon");
        assert_eq!(MimeType::Jpeg.to_string(), "image/jpeg");
        assert!(!MimeType::Jpeg.supports_alpha());
        assert!(MimeType::Png.supports_alpha());
        assert_eq!(MimeType::Jpeg.extension(), "jpg");
    }
}
