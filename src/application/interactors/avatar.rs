use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::avatar::{AvatarDTO, GetMediaDTO, UploadAvatarDTO};
use crate::application::interface::s3::{DownloadedFile, StorageClient};
use crate::domain::entities::id::Id;
use crate::domain::entities::profile::Profile;

pub const AVATAR_PREFIX: &str = "avatars/";

/// Stores a new avatar for the user. Previous files under the user's prefix
/// are removed first so only the latest one remains.
#[derive(Clone)]
pub struct UploadAvatarInteractor {
    storage: Arc<dyn StorageClient>,
    bucket: String,
    public_base_url: String,
}

impl UploadAvatarInteractor {
    pub fn new(storage: Arc<dyn StorageClient>, bucket: String, public_base_url: String) -> Self {
        Self {
            storage,
            bucket,
            public_base_url,
        }
    }

    pub async fn execute(&self, dto: UploadAvatarDTO) -> AppResult<AvatarDTO> {
        let user_id: Id<Profile> = dto.user_id.try_into()?;
        let detected = self
            .storage
            .detect_image(&dto.data)
            .ok_or(AppError::UnsupportedImageFormat)?;

        let prefix = format!("{}{}/", AVATAR_PREFIX, user_id);
        for stale in self.storage.list(&self.bucket, &prefix).await? {
            if let Err(err) = self.storage.delete(&self.bucket, &stale).await {
                warn!("Failed to delete stale avatar {}: {}", stale, err);
            }
        }

        let key = format!("{}{}.{}", prefix, Uuid::now_v7(), detected.ext);
        self.storage
            .upload(&self.bucket, &key, dto.data, detected.content_type)
            .await?;
        info!("Avatar {} stored for {}", key, user_id);

        let url = format!("{}/media/{}", self.public_base_url.trim_end_matches('/'), key);
        Ok(AvatarDTO { key, url })
    }
}

#[derive(Clone)]
pub struct GetMediaInteractor {
    storage: Arc<dyn StorageClient>,
    bucket: String,
}

impl GetMediaInteractor {
    pub fn new(storage: Arc<dyn StorageClient>, bucket: String) -> Self {
        Self { storage, bucket }
    }

    pub async fn execute(&self, dto: GetMediaDTO) -> AppResult<DownloadedFile> {
        if !dto.key.starts_with(AVATAR_PREFIX) || dto.key.contains("..") {
            return Err(AppError::StorageNotFound);
        }
        self.storage.download(&self.bucket, &dto.key).await
    }
}
