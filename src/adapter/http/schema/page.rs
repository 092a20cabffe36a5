use serde::{Deserialize, Serialize};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToSchema;

use crate::adapter::http::schema::link::LinkResponse;
use crate::domain::render::RenderModel;

/// Public page with every default already applied.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "username": "ana",
    "display_name": "Ana",
    "bio": null,
    "avatar_url": "https://cdn.jsdelivr.net/gh/alohe/avatars/png/vibrent_1.png",
    "page_background": "bg-black",
    "button_style": "solid",
    "button_class": "bg-purple-600 hover:bg-purple-700 text-white",
    "font_family": "inter",
    "links": []
}))]
pub struct PublicPageResponse {
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub page_background: String,
    pub button_style: String,
    pub button_class: String,
    pub font_family: String,
    pub links: Vec<LinkResponse>,
}

impl From<RenderModel> for PublicPageResponse {
    fn from(model: RenderModel) -> Self {
        let button_class = model.button_class().to_string();
        Self {
            username: model.username,
            display_name: model.display_name,
            bio: model.bio,
            avatar_url: model.avatar_url,
            page_background: model.page_background.token().to_string(),
            button_style: model.button_variant.as_str().to_string(),
            button_class,
            font_family: model.font_family,
            links: model.links.into_iter().map(LinkResponse::from).collect(),
        }
    }
}
