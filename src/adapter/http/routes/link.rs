use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::middleware::extractor::AuthUser;
use crate::adapter::http::schema::link::{LinkRequest, LinkResponse};
use crate::adapter::http::schema::message::MessageResponse;
use crate::adapter::http::validation::ValidJson;
use crate::application::app_error::AppResult;
use crate::application::dto::link::{CreateLinkDTO, DeleteLinkDTO, UpdateLinkDTO};
use crate::application::interactors::link::{CreateLinkInteractor, DeleteLinkInteractor, UpdateLinkInteractor};

#[utoipa::path(
    post,
    path = "/me/links",
    tag = "Links",
    request_body = LinkRequest,
    responses(
        (status = 201, description = "Link appended to the end of the list", body = LinkResponse),
        (
            status = 400,
            description = "Blank title or url",
            body = ErrorResponse,
            example = json!({ "error": "Link title and url must not be empty" })
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
pub async fn create_link(
    auth_user: AuthUser,
    interactor: CreateLinkInteractor,
    ValidJson(payload): ValidJson<LinkRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = CreateLinkDTO {
        user_id: auth_user.user_id,
        title: payload.title,
        url: payload.url,
        icon: payload.icon,
    };
    let link = interactor.execute(dto).await?;
    Ok((StatusCode::CREATED, Json(LinkResponse::from(link))))
}

#[utoipa::path(
    put,
    path = "/me/links/{id}",
    tag = "Links",
    params(("id" = String, Path, description = "Link id")),
    request_body = LinkRequest,
    responses(
        (status = 200, description = "Link replaced in place", body = LinkResponse),
        (
            status = 404,
            description = "No such link for this user",
            body = ErrorResponse,
            example = json!({ "error": "Link not found" })
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
pub async fn update_link(
    auth_user: AuthUser,
    interactor: UpdateLinkInteractor,
    Path(link_id): Path<String>,
    ValidJson(payload): ValidJson<LinkRequest>,
) -> AppResult<impl IntoResponse> {
    let dto = UpdateLinkDTO {
        user_id: auth_user.user_id,
        link_id,
        title: payload.title,
        url: payload.url,
        icon: payload.icon,
    };
    let link = interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(LinkResponse::from(link))))
}

#[utoipa::path(
    delete,
    path = "/me/links/{id}",
    tag = "Links",
    params(("id" = String, Path, description = "Link id")),
    responses(
        (status = 200, description = "Link removed", body = MessageResponse, example = json!({ "message": "Link deleted" })),
        (
            status = 404,
            description = "No such link for this user",
            body = ErrorResponse,
            example = json!({ "error": "Link not found" })
        )
    ),
    security(("bearerAuth" = []), ("cookieAuth" = []))
)]
pub async fn delete_link(
    auth_user: AuthUser,
    interactor: DeleteLinkInteractor,
    Path(link_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let dto = DeleteLinkDTO {
        user_id: auth_user.user_id,
        link_id,
    };
    interactor.execute(dto).await?;
    Ok((StatusCode::OK, Json(MessageResponse::new("Link deleted"))))
}
