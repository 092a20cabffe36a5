use async_trait::async_trait;
use bytes::Bytes;

use crate::application::app_error::AppResult;

#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub data: Bytes,
    pub content_type: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedImage {
    pub content_type: &'static str,
    pub ext: &'static str,
}

#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn ensure_bucket(&self, bucket: &str) -> AppResult<()>;
    async fn upload(&self, bucket: &str, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;
    async fn download(&self, bucket: &str, key: &str) -> AppResult<DownloadedFile>;
    async fn delete(&self, bucket: &str, key: &str) -> AppResult<()>;
    async fn list(&self, bucket: &str, prefix: &str) -> AppResult<Vec<String>>;
    fn detect_image(&self, data: &[u8]) -> Option<DetectedImage>;
}
