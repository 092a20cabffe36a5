#[derive(Debug, Clone)]
pub struct GetProfileDTO {
    pub user_id: String,
}

#[derive(Debug, Clone)]
pub struct GetPublicProfileDTO {
    pub username: String,
}

#[derive(Debug, Clone, Default)]
pub struct ThemeDTO {
    pub page_background: Option<String>,
    pub button_style: Option<String>,
    pub font_family: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileDTO {
    pub user_id: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: Option<ThemeDTO>,
}
