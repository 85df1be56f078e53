use std::sync::Arc;
use super::error::ApplicationError;

use crate::domain::image_converter_trait::ImageConverter;
use crate::domain::target_format::TargetFormat;
use crate::domain::upload::{converted_filename, ensure_allowed_file, secure_filename};
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::file_storage::LocalFileStorage;

const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedFile {
    pub filename: String,
    pub format: TargetFormat,
    pub size: usize,
}

pub struct ConversionService {
    image_converter: Arc<dyn ImageConverter + Send + Sync>, // トレイトオブジェクトとして保持
    file_storage: Arc<LocalFileStorage>,
}

impl ConversionService {
    pub fn new(
        image_converter: Arc<dyn ImageConverter + Send + Sync>,
        file_storage: Arc<LocalFileStorage>,
    ) -> Self {
        Self { image_converter, file_storage }
    }

    /// Validates the upload, converts it and stores the result under
    /// `<secure stem>.<target extension>`.
    pub async fn convert_upload(
        &self,
        original_filename: &str,
        image_data: Vec<u8>,
        convert_to: &str,
    ) -> Result<ConvertedFile, ApplicationError> {
        if original_filename.is_empty() {
            return Err(ApplicationError::NoSelectedFile);
        }
        ensure_allowed_file(original_filename)?;
        let target = TargetFormat::parse(convert_to)?;

        // 変換処理は CPU バウンドなのでブロッキングスレッドで実行
        let converter = Arc::clone(&self.image_converter);
        let converted = tokio::task::spawn_blocking(move || converter.convert(&image_data, target))
            .await
            .map_err(|e| ApplicationError::ConversionTaskFailed(e.to_string()))??;

        let filename = converted_filename(original_filename, target);
        self.file_storage.save_image_impl(&filename, &converted).await?;

        log::info!(
            "converted {:?} -> {} ({:?}, {} bytes)",
            original_filename,
            filename,
            target,
            converted.len()
        );

        Ok(ConvertedFile {
            filename,
            format: target,
            size: converted.len(),
        })
    }

    /// Returns the stored bytes and the content type to serve them with.
    pub async fn load_converted(&self, filename: &str) -> Result<(Vec<u8>, &'static str), ApplicationError> {
        if filename.is_empty() || secure_filename(filename) != filename {
            return Err(ApplicationError::NotFound(filename.to_string()));
        }

        let data = match self.file_storage.read_image_impl(filename).await {
            Ok(data) => data,
            Err(InfrastructureError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ApplicationError::NotFound(filename.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let content_type = filename
            .rsplit_once('.')
            .and_then(|(_, ext)| TargetFormat::from_extension(ext))
            .map(TargetFormat::mime)
            .unwrap_or(OCTET_STREAM);

        Ok((data, content_type))
    }
}
