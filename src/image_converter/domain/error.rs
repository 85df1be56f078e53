use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unsupported target format: {0}")]
    UnsupportedFormat(String),

    // 拡張子チェックに通らなかったアップロード
    #[error("File type not allowed: {0}")]
    DisallowedExtension(String),
}
