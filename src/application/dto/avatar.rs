use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct UploadAvatarDTO {
    pub user_id: String,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct AvatarDTO {
    pub key: String,
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct GetMediaDTO {
    pub key: String,
}
