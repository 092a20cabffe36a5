use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::adapter::http::app_error_impl::ErrorResponse;
use crate::adapter::http::routes::media::AVATAR_FIELD;
use crate::adapter::http::schema::avatar::AvatarResponse;
use crate::adapter::http::schema::link::{LinkRequest, LinkResponse};
use crate::adapter::http::schema::profile::{ProfileResponse, UpdateProfileRequest};
use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::dashboard::{AvatarFile, DashboardSession};
use crate::application::interface::remote::{AvatarUploader, ProfileRemote, ProfileSource};
use crate::domain::entities::id::Id;
use crate::domain::entities::link::{Link, NewLink};
use crate::domain::entities::profile::{Profile, ProfileUpdate};

/// Talks to a running Branch server over its JSON API.
#[derive(Clone)]
pub struct HttpBranchClient {
    client: Client,
    base_url: Url,
}

impl HttpBranchClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::InvalidRequest(format!("invalid api url `{}`: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::InvalidRequest(format!("invalid api url `{}`", base_url)));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::InvalidRequest(format!("invalid api url `{}`", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder, session: &DashboardSession) -> RequestBuilder {
        builder.bearer_auth(&session.token)
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        debug!("{} {}", status, response.url());

        if status.is_success() {
            return Ok(response);
        }

        let reason = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        Err(AppError::RemoteFailure(format!("{} {}", status.as_u16(), reason)))
    }

    async fn json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        Ok(self.send(builder).await?.json::<T>().await?)
    }
}

#[async_trait]
impl ProfileSource for HttpBranchClient {
    async fn fetch_profile_by_username(&self, username: &str) -> AppResult<Option<Profile>> {
        let url = self.endpoint(&["users", username.trim()])?;
        let response = self.client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::RemoteFailure(format!("{} fetching {}", response.status(), username)));
        }

        let body: ProfileResponse = response.json().await?;
        Ok(Some(body.try_into()?))
    }

    async fn fetch_current_user_record(&self, session: &DashboardSession) -> AppResult<Profile> {
        let url = self.endpoint(&["me"])?;
        let body: ProfileResponse = self.json(self.authorized(self.client.get(url), session)).await?;
        body.try_into()
    }
}

#[async_trait]
impl ProfileRemote for HttpBranchClient {
    async fn create_link(&self, session: &DashboardSession, link: NewLink) -> AppResult<Link> {
        let url = self.endpoint(&["me", "links"])?;
        let request = self.client.post(url).json(&LinkRequest::from(link));
        let body: LinkResponse = self.json(self.authorized(request, session)).await?;
        body.try_into()
    }

    async fn update_link(&self, session: &DashboardSession, link_id: &Id<Link>, link: NewLink) -> AppResult<Link> {
        let url = self.endpoint(&["me", "links", &link_id.to_string()])?;
        let request = self.client.put(url).json(&LinkRequest::from(link));
        let body: LinkResponse = self.json(self.authorized(request, session)).await?;
        body.try_into()
    }

    async fn delete_link(&self, session: &DashboardSession, link_id: &Id<Link>) -> AppResult<()> {
        let url = self.endpoint(&["me", "links", &link_id.to_string()])?;
        self.send(self.authorized(self.client.delete(url), session)).await?;
        Ok(())
    }

    async fn update_profile(&self, session: &DashboardSession, update: ProfileUpdate) -> AppResult<Profile> {
        let url = self.endpoint(&["me"])?;
        let request = self.client.patch(url).json(&UpdateProfileRequest::from(update));
        let body: ProfileResponse = self.json(self.authorized(request, session)).await?;
        body.try_into()
    }
}

#[async_trait]
impl AvatarUploader for HttpBranchClient {
    async fn upload_avatar_file(&self, session: &DashboardSession, file: AvatarFile) -> AppResult<String> {
        let url = self.endpoint(&["me", "avatar"])?;
        let part = Part::bytes(file.data.to_vec())
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = Form::new().part(AVATAR_FIELD, part);

        let body: AvatarResponse = self
            .json(self.authorized(self.client.post(url).multipart(form), session))
            .await?;
        Ok(body.url)
    }
}
