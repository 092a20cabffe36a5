use axum::{Json, response::Html};
use utoipa::{
    Modify, OpenApi,
    openapi::{
        OpenApi as OpenApiDoc,
        security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};

use crate::adapter::http::{
    app_error_impl::ErrorResponse,
    routes::{health, link, media, profile},
    schema::{
        avatar::{AvatarResponse, AvatarUploadRequest},
        link::{LinkRequest, LinkResponse},
        message::MessageResponse,
        page::PublicPageResponse,
        profile::{ProfileResponse, ThemeSchema, UpdateProfileRequest},
    },
};

pub const SESSION_COOKIE: &str = "session_id";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut OpenApiDoc) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookieAuth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE))),
            );
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        health::health,
        profile::get_public_profile,
        profile::get_public_page,
        profile::get_me,
        profile::update_me,
        link::create_link,
        link::update_link,
        link::delete_link,
        media::upload_avatar,
        media::get_media
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            ProfileResponse,
            ThemeSchema,
            UpdateProfileRequest,
            PublicPageResponse,
            LinkRequest,
            LinkResponse,
            AvatarUploadRequest,
            AvatarResponse
        )
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<OpenApiDoc> {
    Json(ApiDoc::openapi())
}

pub async fn docs_ui() -> Html<&'static str> {
    Html(
        r#"
            <!doctype html>
            <html>
              <head>
                <title>Branch API</title>
                <meta charset="utf-8">
                <meta name="viewport" content="width=device-width, initial-scale=1">
                <script src="https://unpkg.com/@stoplight/elements/web-components.min.js"></script>
                <link rel="stylesheet" href="https://unpkg.com/@stoplight/elements/styles.min.css">
              </head>
              <body style="height: 100%; margin: 0;">
                <elements-api
                  apiDescriptionUrl="openapi.json"
                  basePath="/"
                  router="hash"
                />
              </body>
            </html>
        "#,
    )
}
