use crate::application::error::ApplicationError;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const ENV_ADDR: &str = "IMAGE_CONVERTER_ADDR";
pub const ENV_UPLOAD_DIR: &str = "IMAGE_CONVERTER_UPLOAD_DIR";
pub const ENV_MAX_CONTENT_LENGTH: &str = "IMAGE_CONVERTER_MAX_CONTENT_LENGTH";

/// 起動時に一度だけ組み立て、ルーターへ明示的に渡す設定
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub upload_dir: PathBuf,
    /// Request body ceiling in bytes.
    pub max_content_length: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3300)),
            upload_dir: PathBuf::from("uploads"),
            max_content_length: 16 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ApplicationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, falling back to [`Default`] for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApplicationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(ENV_ADDR) {
            config.bind_addr = addr.trim().parse().map_err(|e| {
                ApplicationError::ConfigurationError(format!("{}={:?}: {}", ENV_ADDR, addr, e))
            })?;
        }
        if let Some(dir) = lookup(ENV_UPLOAD_DIR) {
            if dir.trim().is_empty() {
                return Err(ApplicationError::ConfigurationError(format!(
                    "{} must not be empty",
                    ENV_UPLOAD_DIR
                )));
            }
            config.upload_dir = PathBuf::from(dir);
        }
        if let Some(limit) = lookup(ENV_MAX_CONTENT_LENGTH) {
            config.max_content_length = limit.trim().parse().map_err(|e| {
                ApplicationError::ConfigurationError(format!(
                    "{}={:?}: {}",
                    ENV_MAX_CONTENT_LENGTH, limit, e
                ))
            })?;
        }

        Ok(config)
    }
}
