use crate::application::app_error::AppError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Profile not found")]
    pub error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidId(_)
            | AppError::EmptyLink
            | AppError::InvalidButtonStyle(_)
            | AppError::InvalidPageBackground(_)
            | AppError::UnsupportedImageFormat
            | AppError::InvalidRequest(_)
            | AppError::ValidationError(_)
            | AppError::JsonRejection(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::ProfileNotFound | AppError::LinkNotFound | AppError::StorageNotFound => StatusCode::NOT_FOUND,
            AppError::ProfileUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::RemoteFailure(_) => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_) | AppError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            AppError::InvalidCredentials => "Invalid Credentials".to_string(),
            AppError::DatabaseError(_) | AppError::StorageError(_) => {
                error!("{}", self);
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use rstest::rstest;

    use crate::adapter::http::app_error_impl::ErrorResponse;
    use crate::application::app_error::AppError;

    async fn body_of(err: AppError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[rstest]
    #[case(AppError::InvalidId("Invalid UUID: x".to_string()), StatusCode::BAD_REQUEST)]
    #[case(AppError::EmptyLink, StatusCode::BAD_REQUEST)]
    #[case(AppError::UnsupportedImageFormat, StatusCode::BAD_REQUEST)]
    #[case(AppError::InvalidCredentials, StatusCode::UNAUTHORIZED)]
    #[case(AppError::ProfileNotFound, StatusCode::NOT_FOUND)]
    #[case(AppError::LinkNotFound, StatusCode::NOT_FOUND)]
    #[case(AppError::ProfileUnavailable, StatusCode::SERVICE_UNAVAILABLE)]
    #[case(AppError::StorageError("bucket gone".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
    #[tokio::test]
    async fn test_status_codes(#[case] err: AppError, #[case] expected: StatusCode) {
        let (status, _) = body_of(err).await;
        assert_eq!(status, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let (_, body) = body_of(AppError::StorageError("secret endpoint".to_string())).await;
        assert_eq!(body.error, "Internal Server Error");
    }

    #[rstest]
    #[tokio::test]
    async fn test_client_errors_carry_message() {
        let (_, body) = body_of(AppError::InvalidButtonStyle("neon".to_string())).await;
        assert_eq!(body.error, "Invalid button style: `neon`");
    }
}
