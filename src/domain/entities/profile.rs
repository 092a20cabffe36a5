use crate::domain::entities::{id::Id, link::LinkCollection, theme::ThemeSettings};

/// Authoritative profile record: one user's public page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Id<Profile>,
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: Option<ThemeSettings>,
    pub links: LinkCollection,
}

impl Profile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: Id::generate(),
            username: username.into(),
            name: None,
            bio: None,
            avatar: None,
            theme: None,
            links: LinkCollection::default(),
        }
    }

    pub fn apply_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = Some(name);
        }
        if let Some(bio) = update.bio {
            self.bio = Some(bio);
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(theme) = update.theme {
            self.theme.get_or_insert_with(ThemeSettings::default).merge(theme);
        }
    }
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub theme: Option<ThemeSettings>,
}

impl ProfileUpdate {
    pub fn theme_only(theme: ThemeSettings) -> Self {
        Self {
            theme: Some(theme),
            ..Default::default()
        }
    }
}
