use std::collections::HashSet;

use crate::domain::entities::id::Id;

const DEFAULT_SCHEME: &str = "https://";
const OPAQUE_SCHEMES: [&str; 2] = ["mailto:", "tel:"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: Id<Link>,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
}

impl Link {
    pub fn new(new_link: NewLink) -> Self {
        Self {
            id: Id::generate(),
            title: new_link.title,
            url: new_link.url,
            icon: new_link.icon,
        }
    }
}

/// Link content ready for submission: non-empty title, URL with a scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
}

impl NewLink {
    /// Returns `None` when the title or URL is blank.
    pub fn new(title: &str, url: &str, icon: Option<&str>) -> Option<Self> {
        let title = title.trim();
        let url = url.trim();
        if title.is_empty() || url.is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            url: normalize_url(url),
            icon: icon.map(str::trim).filter(|i| !i.is_empty()).map(String::from),
        })
    }
}

/// Prepends `https://` unless the value already carries a scheme.
pub fn normalize_url(raw: &str) -> String {
    let url = raw.trim();
    if has_scheme(url) {
        url.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, url)
    }
}

fn has_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    if OPAQUE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return true;
    }

    match url.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Ordered links of one profile. Always replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkCollection {
    links: Vec<Link>,
}

impl LinkCollection {
    /// Keeps the first occurrence of a repeated id.
    pub fn from_links(links: Vec<Link>) -> Self {
        let mut seen = HashSet::with_capacity(links.len());
        let links = links.into_iter().filter(|link| seen.insert(link.id)).collect();
        Self { links }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    pub fn as_slice(&self) -> &[Link] {
        &self.links
    }

    pub fn get(&self, id: &Id<Link>) -> Option<&Link> {
        self.links.iter().find(|link| &link.id == id)
    }

    pub fn contains(&self, id: &Id<Link>) -> bool {
        self.get(id).is_some()
    }
}

impl From<Vec<Link>> for LinkCollection {
    fn from(links: Vec<Link>) -> Self {
        Self::from_links(links)
    }
}

impl IntoIterator for LinkCollection {
    type Item = Link;
    type IntoIter = std::vec::IntoIter<Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.into_iter()
    }
}

impl<'a> IntoIterator for &'a LinkCollection {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}
