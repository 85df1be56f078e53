pub mod error;
pub mod image_converter_trait;
pub mod target_format;
pub mod upload;
