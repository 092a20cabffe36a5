use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct AvatarUploadRequest {
    #[schema(value_type = String, format = Binary)]
    pub avatar: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AvatarResponse {
    #[schema(example = "avatars/019c47ec-183d-744e-b11d-cd409015bf13/019c47ec-2160-7e53-bf7e-06db2a1bad85.png")]
    pub key: String,
    #[schema(
        example = "http://localhost:8000/media/avatars/019c47ec-183d-744e-b11d-cd409015bf13/019c47ec-2160-7e53-bf7e-06db2a1bad85.png"
    )]
    pub url: String,
}
