use crate::domain::target_format::TargetFormat;
use crate::infrastructure::error::ConversionError;

// アプリケーション層はこのトレイト経由で変換処理を呼ぶ (テストではモックに差し替え)
#[cfg_attr(test, mockall::automock)]
pub trait ImageConverter {
    fn convert(
        &self,
        source_bytes: &[u8],
        target_format: TargetFormat,
    ) -> Result<Vec<u8>, ConversionError>;
}
