use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::adapter::http::schema::link::LinkResponse;
use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::profile::ThemeDTO;
use crate::domain::entities::link::{Link, LinkCollection};
use crate::domain::entities::profile::{Profile, ProfileUpdate};
use crate::domain::entities::theme::ThemeSettings;

/// Theme as it travels over the wire. Field names follow the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "pageBackground": "bg-black",
    "buttonStyle": "solid",
    "fontFamily": "inter"
}))]
pub struct ThemeSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 64, message = "Font family must be between 1 and 64 characters"))]
    pub font_family: Option<String>,
}

impl From<ThemeSettings> for ThemeSchema {
    fn from(theme: ThemeSettings) -> Self {
        Self {
            page_background: theme.page_background,
            button_style: theme.button_style,
            font_family: theme.font_family,
        }
    }
}

impl From<ThemeSchema> for ThemeSettings {
    fn from(theme: ThemeSchema) -> Self {
        Self {
            page_background: theme.page_background,
            button_style: theme.button_style,
            font_family: theme.font_family,
        }
    }
}

impl From<ThemeSchema> for ThemeDTO {
    fn from(theme: ThemeSchema) -> Self {
        Self {
            page_background: theme.page_background,
            button_style: theme.button_style,
            font_family: theme.font_family,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "019c47ec-183d-744e-b11d-cd409015bf13",
    "username": "ana",
    "name": "Ana",
    "bio": "Designer",
    "avatar": null,
    "theme": { "pageBackground": "bg-black", "buttonStyle": "solid" },
    "links": [
        {
            "id": "019c47ec-2160-7e53-bf7e-06db2a1bad85",
            "title": "Portfolio",
            "url": "https://example.com",
            "icon": null
        }
    ]
}))]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: Option<ThemeSchema>,
    #[serde(default)]
    pub links: Vec<LinkResponse>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            username: profile.username,
            name: profile.name,
            bio: profile.bio,
            avatar: profile.avatar,
            theme: profile.theme.map(ThemeSchema::from),
            links: profile.links.into_iter().map(LinkResponse::from).collect(),
        }
    }
}

impl TryFrom<ProfileResponse> for Profile {
    type Error = AppError;

    fn try_from(value: ProfileResponse) -> AppResult<Self> {
        let links = value
            .links
            .into_iter()
            .map(Link::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Profile {
            id: value.id.parse()?,
            username: value.username,
            name: value.name,
            bio: value.bio,
            avatar: value.avatar,
            theme: value.theme.map(ThemeSettings::from),
            links: LinkCollection::from_links(links),
        })
    }
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Ana",
    "bio": "Designer and illustrator",
    "theme": { "pageBackground": "bg-purple-900", "buttonStyle": "outline" }
}))]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2048, message = "Avatar url must be at most 2048 characters"))]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub theme: Option<ThemeSchema>,
}

impl From<ProfileUpdate> for UpdateProfileRequest {
    fn from(update: ProfileUpdate) -> Self {
        Self {
            name: update.name,
            bio: update.bio,
            avatar: update.avatar,
            theme: update.theme.map(ThemeSchema::from),
        }
    }
}
