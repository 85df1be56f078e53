use crate::application::error::ApplicationError;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, Path, State},
    http::{header, HeaderName, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::application::conversion_service::ConversionService;
use super::pages;

const DEFAULT_TARGET_FORMAT: &str = "png";

#[derive(Clone)]
pub struct AppState {
    pub conversion_service: Arc<ConversionService>,
}

pub fn router(state: Arc<AppState>, max_content_length: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(vec![HeaderName::from_static("content-type")]);

    Router::new()
        .route("/", get(index_handler))
        .route("/convert", post(convert_handler))
        .route("/download/:filename", get(download_handler))
        .layer(DefaultBodyLimit::max(max_content_length))
        .layer(cors)
        .with_state(state)
}

pub async fn index_handler() -> impl IntoResponse {
    pages::index()
}

pub async fn convert_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApplicationError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut convert_to: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Multipart error"))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            // 複数の file パートがある場合は最初のものを使う
            Some("file") if upload.is_some() => {}
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, "Failed to read uploaded file"))?;
                upload = Some((filename, data.to_vec()));
            }
            Some("convert_to") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, "Failed to read convert_to"))?;
                convert_to = Some(value);
            }
            _ => {} // 未知のフィールドは無視
        }
    }

    let (filename, data) = upload.ok_or(ApplicationError::NoFilePart)?;
    let convert_to = convert_to.unwrap_or_else(|| DEFAULT_TARGET_FORMAT.to_string());

    let converted = state
        .conversion_service
        .convert_upload(&filename, data, &convert_to)
        .await?;

    Ok(pages::result(&converted.filename))
}

/// Body-limit overruns keep their 413; any other multipart failure is a bad upload.
fn multipart_error(err: MultipartError, context: &str) -> ApplicationError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApplicationError::PayloadTooLarge
    } else {
        ApplicationError::InvalidUpload(format!("{}: {}", context, err))
    }
}

pub async fn download_handler(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, ApplicationError> {
    let (data, content_type) = state.conversion_service.load_converted(&filename).await?;

    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, data))
}
