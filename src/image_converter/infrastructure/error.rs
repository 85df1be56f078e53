use thiserror::Error;

/// Failure of a single conversion call. Decode and encode failures are kept
/// apart so callers can tell a bad upload from a codec limitation.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to decode source image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Unsupported target format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
}

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Image conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error("File storage error: {0}")]
    FileStorageError(String),

    #[error("Underlying I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
