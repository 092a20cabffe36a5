//! Profile resolution: turns a stored record into the fully-defaulted model
//! the rendering layer consumes.
//!
//! Resolution is pure. The same input always yields an equal [`ProfileView`],
//! so it is safe to call on every render of the public page or the dashboard
//! preview.

use crate::domain::entities::link::{Link, LinkCollection};
use crate::domain::entities::profile::Profile;
use crate::domain::entities::theme::{ButtonStyle, DEFAULT_FONT_FAMILY, PageBackground};

pub const DEFAULT_AVATAR_URL: &str = "https://cdn.jsdelivr.net/gh/alohe/avatars/png/vibrent_1.png";

/// What is known about a record at render time.
///
/// `Loading` and `NotFound` are kept apart: a slow fetch must never be shown
/// as a missing user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RemoteRecord {
    #[default]
    Loading,
    NotFound,
    Loaded(Profile),
}

impl From<Option<Profile>> for RemoteRecord {
    fn from(value: Option<Profile>) -> Self {
        match value {
            Some(profile) => RemoteRecord::Loaded(profile),
            None => RemoteRecord::NotFound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    Loading,
    NotFound,
    Resolved(RenderModel),
}

impl ProfileView {
    pub fn as_resolved(&self) -> Option<&RenderModel> {
        match self {
            ProfileView::Resolved(model) => Some(model),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderModel {
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub page_background: PageBackground,
    pub button_variant: ButtonStyle,
    pub font_family: String,
    pub links: LinkCollection,
}

/// Link area of the page: an empty collection is a state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSection<'a> {
    NoLinks,
    Links(&'a [Link]),
}

impl RenderModel {
    pub fn link_section(&self) -> LinkSection<'_> {
        if self.links.is_empty() {
            LinkSection::NoLinks
        } else {
            LinkSection::Links(self.links.as_slice())
        }
    }

    pub fn button_class(&self) -> &'static str {
        self.button_variant.class_name()
    }
}

pub struct ProfileResolver;

impl ProfileResolver {
    pub fn resolve(record: &RemoteRecord) -> ProfileView {
        match record {
            RemoteRecord::Loading => ProfileView::Loading,
            RemoteRecord::NotFound => ProfileView::NotFound,
            RemoteRecord::Loaded(profile) => ProfileView::Resolved(Self::resolve_profile(profile)),
        }
    }

    pub fn resolve_profile(profile: &Profile) -> RenderModel {
        let theme = profile.theme.as_ref();

        RenderModel {
            username: profile.username.clone(),
            display_name: non_blank(profile.name.as_deref()).unwrap_or(&profile.username).to_string(),
            bio: non_blank(profile.bio.as_deref()).map(String::from),
            avatar_url: non_blank(profile.avatar.as_deref()).unwrap_or(DEFAULT_AVATAR_URL).to_string(),
            page_background: PageBackground::from_stored(theme.and_then(|t| t.page_background.as_deref())),
            button_variant: ButtonStyle::from_stored(theme.and_then(|t| t.button_style.as_deref())),
            font_family: non_blank(theme.and_then(|t| t.font_family.as_deref()))
                .unwrap_or(DEFAULT_FONT_FAMILY)
                .to_string(),
            links: profile.links.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use crate::domain::entities::link::{Link, LinkCollection, NewLink};
    use crate::domain::entities::profile::Profile;
    use crate::domain::entities::theme::{ButtonStyle, PageBackground, ThemeSettings};
    use crate::domain::render::{
        DEFAULT_AVATAR_URL, LinkSection, ProfileResolver, ProfileView, RemoteRecord,
    };

    #[fixture]
    fn ana() -> Profile {
        Profile::new("ana")
    }

    fn resolved(profile: Profile) -> crate::domain::render::RenderModel {
        match ProfileResolver::resolve(&RemoteRecord::Loaded(profile)) {
            ProfileView::Resolved(model) => model,
            other => panic!("expected resolved view, got {:?}", other),
        }
    }

    #[rstest]
    fn test_missing_theme_uses_defaults(ana: Profile) {
        let model = resolved(ana);
        assert_eq!(model.page_background, PageBackground::Black);
        assert_eq!(model.page_background.token(), "bg-black");
        assert_eq!(model.button_variant, ButtonStyle::Solid);
        assert_eq!(model.font_family, "inter");
    }

    #[rstest]
    fn test_theme_fields_default_independently(mut ana: Profile) {
        ana.theme = Some(ThemeSettings {
            page_background: None,
            button_style: Some("outline".to_string()),
            font_family: None,
        });
        let model = resolved(ana);
        assert_eq!(model.page_background, PageBackground::Black);
        assert_eq!(model.button_variant, ButtonStyle::Outline);
    }

    #[rstest]
    #[case("neon")]
    #[case("SOLIDISH")]
    #[case("")]
    fn test_unknown_button_style_falls_back_to_solid(mut ana: Profile, #[case] style: &str) {
        ana.theme = Some(ThemeSettings {
            button_style: Some(style.to_string()),
            ..Default::default()
        });
        assert_eq!(resolved(ana).button_variant, ButtonStyle::Solid);
    }

    #[rstest]
    fn test_known_theme_is_kept(mut ana: Profile) {
        ana.theme = Some(ThemeSettings::new(PageBackground::Gradient, ButtonStyle::Gradient, "mono"));
        let model = resolved(ana);
        assert_eq!(model.page_background, PageBackground::Gradient);
        assert_eq!(model.button_variant, ButtonStyle::Gradient);
        assert_eq!(model.font_family, "mono");
        assert!(model.button_class().contains("bg-gradient-to-r"));
    }

    #[rstest]
    fn test_loading_and_not_found_are_distinct() {
        let loading = ProfileResolver::resolve(&RemoteRecord::Loading);
        let not_found = ProfileResolver::resolve(&RemoteRecord::NotFound);
        assert_eq!(loading, ProfileView::Loading);
        assert_eq!(not_found, ProfileView::NotFound);
        assert_ne!(loading, not_found);
    }

    #[rstest]
    fn test_resolve_is_idempotent(mut ana: Profile) {
        ana.name = Some("Ana".to_string());
        ana.links = LinkCollection::from_links(vec![Link::new(
            NewLink::new("Blog", "ana.dev", None).unwrap(),
        )]);
        let record = RemoteRecord::Loaded(ana);
        assert_eq!(ProfileResolver::resolve(&record), ProfileResolver::resolve(&record));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn test_display_name_falls_back_to_username(mut ana: Profile, #[case] name: Option<&str>) {
        ana.name = name.map(String::from);
        assert_eq!(resolved(ana).display_name, "ana");
    }

    #[rstest]
    fn test_avatar_and_bio_fallbacks(mut ana: Profile) {
        ana.avatar = Some(String::new());
        ana.bio = Some(" ".to_string());
        let model = resolved(ana.clone());
        assert_eq!(model.avatar_url, DEFAULT_AVATAR_URL);
        assert_eq!(model.bio, None);

        ana.avatar = Some("https://cdn.example.com/a.png".to_string());
        assert_eq!(resolved(ana).avatar_url, "https://cdn.example.com/a.png");
    }

    #[rstest]
    fn test_links_keep_record_order(mut ana: Profile) {
        let links: Vec<Link> = ["one", "two", "three"]
            .iter()
            .map(|t| Link::new(NewLink::new(t, "example.com", None).unwrap()))
            .collect();
        ana.links = LinkCollection::from_links(links.clone());

        let model = resolved(ana);
        assert_eq!(model.link_section(), LinkSection::Links(&links));
    }

    #[rstest]
    fn test_user_without_links_shows_no_links_state(ana: Profile) {
        let model = resolved(ana);
        assert_eq!(model.display_name, "ana");
        assert!(model.links.is_empty());
        assert_eq!(model.link_section(), LinkSection::NoLinks);
    }

    #[rstest]
    fn test_remote_record_from_option(ana: Profile) {
        assert_eq!(RemoteRecord::from(None), RemoteRecord::NotFound);
        assert!(matches!(RemoteRecord::from(Some(ana)), RemoteRecord::Loaded(_)));
    }
}
