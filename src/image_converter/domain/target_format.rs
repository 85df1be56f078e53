use crate::domain::error::DomainError;
use image::ImageFormat as InnerImageFormat;

/// 変換先として受け付けるフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    Png,
    Jpeg,
    Gif,
}

impl TargetFormat {
    /// Parses a user supplied identifier. Matching ignores case and surrounding whitespace.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "gif" => Ok(Self::Gif),
            other => Err(DomainError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Lookup by file extension, used when serving stored files back.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::parse(ext).ok()
    }

    pub fn image_format(self) -> InnerImageFormat {
        match self {
            Self::Png => InnerImageFormat::Png,
            Self::Jpeg => InnerImageFormat::Jpeg,
            Self::Gif => InnerImageFormat::Gif,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(TargetFormat::parse("png").unwrap(), TargetFormat::Png);
        assert_eq!(TargetFormat::parse("PNG").unwrap(), TargetFormat::Png);
        assert_eq!(TargetFormat::parse(" Gif ").unwrap(), TargetFormat::Gif);
    }

    #[test]
    fn test_jpg_and_jpeg_map_to_jpeg() {
        assert_eq!(TargetFormat::parse("jpg").unwrap(), TargetFormat::Jpeg);
        assert_eq!(TargetFormat::parse("JPEG").unwrap(), TargetFormat::Jpeg);
        assert_eq!(TargetFormat::Jpeg.image_format(), InnerImageFormat::Jpeg);
        assert_eq!(TargetFormat::Jpeg.extension(), "jpg");
        assert_eq!(TargetFormat::Jpeg.mime(), "image/jpeg");
    }

    #[test]
    fn test_unknown_identifiers_are_rejected() {
        for input in ["bmp", "exe", "", "webp", "png8"] {
            match TargetFormat::parse(input) {
                Err(DomainError::UnsupportedFormat(_)) => {}
                other => panic!("Expected UnsupportedFormat for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(TargetFormat::from_extension("gif"), Some(TargetFormat::Gif));
        assert_eq!(TargetFormat::from_extension("txt"), None);
    }
}
