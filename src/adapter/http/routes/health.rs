use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapter::http::schema::message::MessageResponse;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse, example = json!({ "message": "ok" }))
    )
)]
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(MessageResponse::new("ok")))
}
