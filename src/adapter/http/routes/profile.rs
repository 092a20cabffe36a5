use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::page::PublicPageResponse;
use crate::adapter::http::schema::profile::{ProfileResponse, UpdateProfileRequest};
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::{GetProfileDTO, GetPublicProfileDTO, UpdateProfileDTO};
use crate::application::interactors::profile::{
    GetMeInteractor, GetPublicPageInteractor, GetPublicProfileInteractor, UpdateProfileInteractor,
};
use crate::domain::render::ProfileView;

#[utoipa::path(
    get,
    path = "/users/{username}",
    tag = "Profiles",
    params(("username" = String, Path, description = "Public username, matched case-insensitively")),
    responses(
        (status = 200, description = "Stored profile record", body = ProfileResponse),
        (
            status = 404,
            description = "No such user",
            body = ErrorResponse,
            example = json!({ "error": "Profile not found" })
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse,
            example = json!({ "error": "Internal Server Error" })
        )
    )
)]
pub async fn get_public_profile(
    interactor: GetPublicProfileInteractor,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    let profile = interactor
        .execute(GetPublicProfileDTO { username })
        .await?
        .ok_or(AppError::ProfileNotFound)?;

    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    get,
    path = "/pages/{username}",
    tag = "Profiles",
    params(("username" = String, Path, description = "Public username")),
    responses(
        (status = 200, description = "Resolved public page", body = PublicPageResponse),
        (
            status = 404,
            description = "No such user",
            body = ErrorResponse,
            example = json!({ "error": "Profile not found" })
        )
    )
)]
pub async fn get_public_page(
    interactor: GetPublicPageInteractor,
    Path(username): Path<String>,
) -> AppResult<impl IntoResponse> {
    match interactor.execute(GetPublicProfileDTO { username }).await? {
        ProfileView::Resolved(model) => Ok((StatusCode::OK, Json(PublicPageResponse::from(model)))),
        ProfileView::NotFound => Err(AppError::ProfileNotFound),
        ProfileView::Loading => Err(AppError::ProfileUnavailable),
    }
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Profiles",
    responses(
        (status = 200, description = "Signed-in user's record", body = ProfileResponse),
        (
            status = 401,
            description = "Not authenticated",
            body = ErrorResponse,
            example = json!({ "error": "Invalid Credentials" })
        )
    ),
    security(("bearerAuth" = []), ("cookieAuth" = []))
)]
pub async fn get_me(auth_user: AuthUser, interactor: GetMeInteractor) -> AppResult<impl IntoResponse> {
    let dto = GetProfileDTO {
        user_id: auth_user.user_id,
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[utoipa::path(
    patch,
    path = "/me",
    tag = "Profiles",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated record", body = ProfileResponse),
        (
            status = 400,
            description = "Validation error or unknown theme value",
            body = ErrorResponse,
            example = json!({ "error": "Invalid button style: `neon`" })
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
pub async fn update_me(
    auth_user: AuthUser,
    interactor: UpdateProfileInteractor,
    ValidJson(payload): ValidJson<UpdateProfileRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = UpdateProfileDTO {
        user_id: auth_user.user_id,
        name: payload.name,
        bio: payload.bio,
        avatar: payload.avatar,
        theme: payload.theme.map(Into::into),
    };
    let profile = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}
