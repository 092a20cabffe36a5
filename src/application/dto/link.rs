#[derive(Debug, Clone)]
pub struct CreateLinkDTO {
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateLinkDTO {
    pub user_id: String,
    pub link_id: String,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DeleteLinkDTO {
    pub user_id: String,
    pub link_id: String,
}
