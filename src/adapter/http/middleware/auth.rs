use crate::{
    adapter::http::middleware::extractor::AuthUser,
    application::{
        app_error::{AppError, AppResult},
        dto::session::ValidateSessionDTO,
        interactors::session::ValidateSessionInteractor,
    },
    infra::config::AppConfig,
};
use axum::{
    extract::{Request, State},
    http::{
        HeaderMap,
        header::{AUTHORIZATION, COOKIE},
    },
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

const BEARER_PREFIX: &str = "Bearer ";

pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    interactor: ValidateSessionInteractor,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let session_id = extract_session_id(request.headers(), &config.session.cookie_name)?;
    let user_id = interactor.execute(ValidateSessionDTO { session_id }).await?;

    request.extensions_mut().insert(AuthUser {
        user_id: user_id.value.to_string(),
    });

    Ok(next.run(request).await)
}

/// Bearer token first, session cookie second.
pub fn extract_session_id(headers: &HeaderMap, cookie_name: &str) -> AppResult<String> {
    if let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
    {
        let token = token.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    let cookie_header = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::InvalidCredentials)?;

    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{}=", cookie_name)) {
            return Ok(value.to_string());
        }
    }

    Err(AppError::InvalidCredentials)
}
