pub mod axum_handler;
pub mod error;
pub mod file_storage;
pub mod image_converter;
pub mod pages;
