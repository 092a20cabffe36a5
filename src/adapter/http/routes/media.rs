use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use bytes::Bytes;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::avatar::{AvatarResponse, AvatarUploadRequest};
use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::avatar::{GetMediaDTO, UploadAvatarDTO};
use crate::application::interactors::avatar::{GetMediaInteractor, UploadAvatarInteractor};

pub const AVATAR_FIELD: &str = "avatar";

#[utoipa::path(
    post,
    path = "/me/avatar",
    tag = "Media",
    request_body(
        content_type = "multipart/form-data",
        content = AvatarUploadRequest,
        description = "Image file in the `avatar` field"
    ),
    responses(
        (status = 200, description = "Avatar stored", body = AvatarResponse),
        (
            status = 400,
            description = "Missing file or unsupported image format",
            body = ErrorResponse,
            example = json!({ "error": "Unsupported image format" })
        ),
        (
            status = 401,
            description = "Not authenticated",
            body = ErrorResponse,
            example = json!({ "error": "Invalid Credentials" })
        )
    ),
    security(("bearerAuth" = []), ("cookieAuth" = []))
)]
pub async fn upload_avatar(
    auth_user: AuthUser,
    interactor: UploadAvatarInteractor,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(AVATAR_FIELD) {
            data = Some(field.bytes().await?);
        }
    }

    let data = data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::InvalidRequest(format!("missing `{}` file", AVATAR_FIELD)))?;

    let dto = UploadAvatarDTO {
        user_id: auth_user.user_id,
        data,
    };
    let avatar = interactor.execute(dto).await?;

    Ok((
        StatusCode::OK,
        Json(AvatarResponse {
            key: avatar.key,
            url: avatar.url,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/media/{key}",
    tag = "Media",
    params(("key" = String, Path, description = "Object key under `avatars/`")),
    responses(
        (status = 200, description = "Stored file bytes with their content type"),
        (
            status = 404,
            description = "No such object",
            body = ErrorResponse,
            example = json!({ "error": "Storage object not found" })
        )
    )
)]
pub async fn get_media(interactor: GetMediaInteractor, Path(key): Path<String>) -> AppResult<impl IntoResponse> {
    let file = interactor.execute(GetMediaDTO { key }).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_str(&file.content_type)
            .map_err(|_| AppError::StorageError("Invalid content type".to_string()))?,
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("public, max-age=86400"));

    Ok((StatusCode::OK, headers, Body::from(file.data)))
}
