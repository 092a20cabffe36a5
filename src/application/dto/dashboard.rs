use bytes::Bytes;

/// Authenticated dashboard session, handed to the controller at login and
/// dropped with it at logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSession {
    pub username: String,
    pub token: String,
}

impl DashboardSession {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}
