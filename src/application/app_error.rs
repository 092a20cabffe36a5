use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidId(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Profile is not loaded yet")]
    ProfileUnavailable,

    #[error("Link not found")]
    LinkNotFound,

    #[error("Link title and url must not be empty")]
    EmptyLink,

    #[error("Invalid button style: `{0}`")]
    InvalidButtonStyle(String),

    #[error("Invalid page background: `{0}`")]
    InvalidPageBackground(String),

    #[error("Unsupported image format")]
    UnsupportedImageFormat,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid JSON body: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Storage object not found")]
    StorageNotFound,

    #[error("Remote request failed: {0}")]
    RemoteFailure(String),
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::InvalidRequest(err.body_text())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::RemoteFailure(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
