use thiserror::Error;
use crate::domain::error::DomainError; // ドメインエラーをラップするため
use crate::infrastructure::error::{ConversionError, InfrastructureError};

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Request Entity Too Large")]
    PayloadTooLarge,

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Conversion task failed: {0}")]
    ConversionTaskFailed(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Domain error occurred: {0}")]
    DomainError(#[from] DomainError),

    #[error("Infrastructure error occurred: {0}")]
    InfrastructureError(#[from] InfrastructureError),
}

impl From<ConversionError> for ApplicationError {
    fn from(err: ConversionError) -> Self {
        ApplicationError::InfrastructureError(InfrastructureError::Conversion(err))
    }
}

use axum::response::{IntoResponse, Response};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

impl ApplicationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApplicationError::NoFilePart
            | ApplicationError::NoSelectedFile
            | ApplicationError::InvalidUpload(_)
            | ApplicationError::DomainError(_) => StatusCode::BAD_REQUEST,
            ApplicationError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
            ApplicationError::ConversionTaskFailed(_) | ApplicationError::ConfigurationError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApplicationError::InfrastructureError(infra_err) => match infra_err {
                InfrastructureError::Conversion(ConversionError::Decode(_))
                | InfrastructureError::Conversion(ConversionError::UnsupportedFormat(_)) => {
                    StatusCode::BAD_REQUEST
                }
                InfrastructureError::Conversion(ConversionError::Encode(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                InfrastructureError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    StatusCode::NOT_FOUND
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{:?}", self);
        } else {
            log::warn!("request rejected ({}): {}", status, self);
        }

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> image::ImageError {
        image::ImageError::IoError(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof"))
    }

    #[test]
    fn test_status_codes_distinguish_failure_kinds() {
        assert_eq!(ApplicationError::NoFilePart.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApplicationError::DomainError(DomainError::DisallowedExtension("a.txt".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApplicationError::from(ConversionError::Decode(decode_error())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApplicationError::from(ConversionError::Encode(decode_error())).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApplicationError::NotFound("x.png".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApplicationError::from(InfrastructureError::FileStorageError("disk".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_payload_too_large_maps_to_413() {
        let err = ApplicationError::PayloadTooLarge;
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "Request Entity Too Large");
    }

    #[test]
    fn test_io_not_found_maps_to_404() {
        let err = ApplicationError::from(InfrastructureError::IoError(std::io::Error::from(
            std::io::ErrorKind::NotFound,
        )));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
