pub mod conversion_service;
pub mod error;
