use anyhow::Context;
use std::sync::Arc;

use image_converter::application::conversion_service::ConversionService;
use image_converter::config::AppConfig;
use image_converter::infrastructure::axum_handler::{router, AppState};
use image_converter::infrastructure::file_storage::LocalFileStorage;
use image_converter::infrastructure::image_converter::DefaultImageConverter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env()?;

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("failed to create upload dir {}", config.upload_dir.display()))?;

    let file_storage = Arc::new(LocalFileStorage::new(config.upload_dir.clone()));
    let conversion_service = ConversionService::new(Arc::new(DefaultImageConverter::new()), file_storage.clone());
    let state = Arc::new(AppState {
        conversion_service: Arc::new(conversion_service),
    });

    let app = router(state, config.max_content_length);

    log::info!(
        "listening on {} (uploads: {}, max body: {} bytes)",
        config.bind_addr,
        file_storage.root().display(),
        config.max_content_length
    );

    // サーバーの開始
    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await
        .context("server error")?;

    Ok(())
}
