use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;
use validator::Validate;

use crate::application::app_error::AppResult;
use crate::domain::entities::link::{Link, NewLink};

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "title": "Portfolio",
    "url": "example.com",
    "icon": "🎨"
}))]
pub struct LinkRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 2048, message = "Url must be between 1 and 2048 characters"))]
    pub url: String,
    #[validate(length(max = 16, message = "Icon must be at most 16 characters"))]
    pub icon: Option<String>,
}

impl From<NewLink> for LinkRequest {
    fn from(link: NewLink) -> Self {
        Self {
            title: link.title,
            url: link.url,
            icon: link.icon,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LinkResponse {
    #[schema(example = "019c47ec-2160-7e53-bf7e-06db2a1bad85")]
    pub id: String,
    #[schema(example = "Portfolio")]
    pub title: String,
    #[schema(example = "https://example.com")]
    pub url: String,
    #[schema(example = "🎨")]
    pub icon: Option<String>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id.to_string(),
            title: link.title,
            url: link.url,
            icon: link.icon,
        }
    }
}

impl TryFrom<LinkResponse> for Link {
    type Error = crate::application::app_error::AppError;

    fn try_from(value: LinkResponse) -> AppResult<Self> {
        Ok(Link {
            id: value.id.parse()?,
            title: value.title,
            url: value.url,
            icon: value.icon,
        })
    }
}
