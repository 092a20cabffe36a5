use std::sync::Arc;

use crate::adapter::storage::s3::S3StorageClient;
use crate::application::interface::s3::StorageClient;
use crate::infra::config::AppConfig;
use crate::infra::db::init_db;
use crate::infra::state::AppState;

pub mod app;
pub mod config;
pub mod db;
pub mod setup;
pub mod state;

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = init_db(&config.db).await?;

    let storage = S3StorageClient::new(&config.s3);
    storage.ensure_bucket(&config.s3.bucket).await?;

    Ok(AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: Arc::new(storage),
    })
}
