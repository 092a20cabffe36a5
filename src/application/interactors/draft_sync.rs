//! Dashboard-side editing of the signed-in user's profile.
//!
//! The controller keeps a local draft of the editable fields and a copy of the
//! authoritative link collection. Every mutation goes to the remote first; the
//! local state only follows the remote after a successful refetch, never by
//! local splicing. At most one mutation is in flight at a time.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::app_error::AppError;
use crate::application::dto::dashboard::{AvatarFile, DashboardSession};
use crate::application::interface::notifier::{Notice, Notifier};
use crate::application::interface::remote::{AvatarUploader, ProfileRemote, ProfileSource};
use crate::domain::entities::id::Id;
use crate::domain::entities::link::{Link, LinkCollection, NewLink};
use crate::domain::entities::profile::{Profile, ProfileUpdate};
use crate::domain::entities::theme::{ButtonStyle, DEFAULT_FONT_FAMILY, PageBackground, ThemeSettings};
use crate::domain::render::{ProfileResolver, ProfileView, RemoteRecord};

const PROFILE_SAVED: &str = "Profile updated successfully!";
const PROFILE_SAVE_FAILED: &str = "Error updating profile. Please try again.";
const THEME_SAVED: &str = "Theme settings saved successfully!";
const THEME_SAVE_FAILED: &str = "Error saving theme settings. Please try again.";
const LINK_ADD_FAILED: &str = "Error adding link. Please try again.";
const LINK_EDIT_FAILED: &str = "Error updating link. Please try again.";
const LINK_REMOVE_FAILED: &str = "Error removing link. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    Submitting,
    Failed(String),
}

/// Result of a user-initiated mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// Link form was incomplete; nothing was sent. Only link add and edit
    /// return this.
    Skipped,
    /// Another mutation is still in flight.
    Busy,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub bio: String,
    pub avatar: Option<String>,
    pub page_background: PageBackground,
    pub button_style: ButtonStyle,
    pub font_family: String,
}

impl Default for ProfileDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            bio: String::new(),
            avatar: None,
            page_background: PageBackground::default(),
            button_style: ButtonStyle::default(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

impl ProfileDraft {
    fn from_profile(profile: &Profile) -> Self {
        let mut draft = Self {
            name: profile.name.clone().unwrap_or_default(),
            bio: profile.bio.clone().unwrap_or_default(),
            avatar: profile.avatar.clone(),
            ..Default::default()
        };
        draft.reconcile_theme(profile);
        draft
    }

    fn reconcile_theme(&mut self, profile: &Profile) {
        let theme = profile.theme.as_ref();
        self.page_background = PageBackground::from_stored(theme.and_then(|t| t.page_background.as_deref()));
        self.button_style = ButtonStyle::from_stored(theme.and_then(|t| t.button_style.as_deref()));
        self.font_family = theme
            .and_then(|t| t.font_family.clone())
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string());
    }

    fn theme(&self) -> ThemeSettings {
        ThemeSettings::new(self.page_background, self.button_style, self.font_family.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkForm {
    pub title: String,
    pub url: String,
}

impl LinkForm {
    fn clear(&mut self) {
        self.title.clear();
        self.url.clear();
    }
}

pub struct DraftSyncController {
    session: DashboardSession,
    source: Arc<dyn ProfileSource>,
    remote: Arc<dyn ProfileRemote>,
    uploader: Arc<dyn AvatarUploader>,
    notifier: Arc<dyn Notifier>,
    record: RemoteRecord,
    draft: ProfileDraft,
    link_form: LinkForm,
    links: LinkCollection,
    queued_avatar: Option<AvatarFile>,
    state: SyncState,
}

impl DraftSyncController {
    pub fn new(
        session: DashboardSession,
        source: Arc<dyn ProfileSource>,
        remote: Arc<dyn ProfileRemote>,
        uploader: Arc<dyn AvatarUploader>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            session,
            source,
            remote,
            uploader,
            notifier,
            record: RemoteRecord::Loading,
            draft: ProfileDraft::default(),
            link_form: LinkForm::default(),
            links: LinkCollection::default(),
            queued_avatar: None,
            state: SyncState::Idle,
        }
    }

    /// Loads the authoritative record. A failed fetch leaves the controller
    /// in the loading state.
    pub async fn initialize(&mut self) {
        match self.source.fetch_current_user_record(&self.session).await {
            Ok(profile) => {
                self.draft = ProfileDraft::from_profile(&profile);
                self.links = profile.links.clone();
                self.record = RemoteRecord::Loaded(profile);
                info!("Dashboard loaded for {}", self.session.username);
            }
            Err(err) => {
                warn!("Failed to load profile of {}: {}", self.session.username, err);
                self.record = RemoteRecord::Loading;
            }
        }
    }

    /// Drops everything learned since construction.
    pub fn teardown(&mut self) {
        self.record = RemoteRecord::Loading;
        self.draft = ProfileDraft::default();
        self.link_form = LinkForm::default();
        self.links = LinkCollection::default();
        self.queued_avatar = None;
        self.state = SyncState::Idle;
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn record(&self) -> &RemoteRecord {
        &self.record
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    pub fn link_form(&self) -> &LinkForm {
        &self.link_form
    }

    pub fn links(&self) -> &LinkCollection {
        &self.links
    }

    pub fn queued_avatar(&self) -> Option<&AvatarFile> {
        self.queued_avatar.as_ref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) {
        self.draft.bio = bio.into();
    }

    pub fn set_page_background(&mut self, page_background: PageBackground) {
        self.draft.page_background = page_background;
    }

    pub fn set_button_style(&mut self, button_style: ButtonStyle) {
        self.draft.button_style = button_style;
    }

    pub fn set_font_family(&mut self, font_family: impl Into<String>) {
        self.draft.font_family = font_family.into();
    }

    pub fn set_link_title(&mut self, title: impl Into<String>) {
        self.link_form.title = title.into();
    }

    pub fn set_link_url(&mut self, url: impl Into<String>) {
        self.link_form.url = url.into();
    }

    pub fn queue_avatar(&mut self, file: AvatarFile) {
        self.queued_avatar = Some(file);
    }

    /// Creates a link from the form. Blank fields make this a no-op.
    pub async fn add_link(&mut self) -> MutationOutcome {
        if self.is_busy() {
            return MutationOutcome::Busy;
        }
        let Some(new_link) = NewLink::new(&self.link_form.title, &self.link_form.url, None) else {
            return MutationOutcome::Skipped;
        };

        self.state = SyncState::Submitting;
        match self.remote.create_link(&self.session, new_link).await {
            Ok(link) => {
                info!("Link {} added", link.id);
                self.refetch_links().await;
                self.link_form.clear();
                self.state = SyncState::Idle;
                MutationOutcome::Applied
            }
            Err(err) => self.fail(LINK_ADD_FAILED, err),
        }
    }

    /// Replaces the link's title and URL with the form contents.
    pub async fn edit_link(&mut self, link_id: &Id<Link>) -> MutationOutcome {
        if self.is_busy() {
            return MutationOutcome::Busy;
        }
        let Some(new_link) = NewLink::new(&self.link_form.title, &self.link_form.url, None) else {
            return MutationOutcome::Skipped;
        };

        self.state = SyncState::Submitting;
        match self.remote.update_link(&self.session, link_id, new_link).await {
            Ok(link) => {
                info!("Link {} updated", link.id);
                self.refetch_links().await;
                self.link_form.clear();
                self.state = SyncState::Idle;
                MutationOutcome::Applied
            }
            Err(err) => self.fail(LINK_EDIT_FAILED, err),
        }
    }

    pub async fn remove_link(&mut self, link_id: &Id<Link>) -> MutationOutcome {
        if self.is_busy() {
            return MutationOutcome::Busy;
        }

        self.state = SyncState::Submitting;
        match self.remote.delete_link(&self.session, link_id).await {
            Ok(()) => {
                info!("Link {} removed", link_id);
                self.refetch_links().await;
                self.state = SyncState::Idle;
                MutationOutcome::Applied
            }
            Err(err) => self.fail(LINK_REMOVE_FAILED, err),
        }
    }

    /// Uploads the queued avatar, if any, then submits the whole draft.
    pub async fn save_profile(&mut self) -> MutationOutcome {
        if self.is_busy() {
            return MutationOutcome::Busy;
        }
        self.state = SyncState::Submitting;

        // The draft only takes the uploaded URL from the saved record.
        let avatar = match self.queued_avatar.clone() {
            Some(file) => match self.uploader.upload_avatar_file(&self.session, file).await {
                Ok(url) => Some(url),
                Err(err) => return self.fail(PROFILE_SAVE_FAILED, err),
            },
            None => self.draft.avatar.clone(),
        };

        let update = ProfileUpdate {
            name: Some(self.draft.name.clone()),
            bio: Some(self.draft.bio.clone()),
            avatar,
            theme: Some(self.draft.theme()),
        };

        match self.remote.update_profile(&self.session, update).await {
            Ok(saved) => {
                let profile = self.refetch_record(saved).await;
                self.draft = ProfileDraft::from_profile(&profile);
                self.links = profile.links.clone();
                self.record = RemoteRecord::Loaded(profile);
                self.queued_avatar = None;
                self.state = SyncState::Idle;
                self.notifier.notify(Notice::success(PROFILE_SAVED));
                MutationOutcome::Applied
            }
            Err(err) => self.fail(PROFILE_SAVE_FAILED, err),
        }
    }

    /// Submits only the theme. Unsaved name and bio edits stay in the draft.
    pub async fn save_theme(&mut self) -> MutationOutcome {
        if self.is_busy() {
            return MutationOutcome::Busy;
        }
        self.state = SyncState::Submitting;

        let update = ProfileUpdate::theme_only(self.draft.theme());
        match self.remote.update_profile(&self.session, update).await {
            Ok(saved) => {
                let profile = self.refetch_record(saved).await;
                self.draft.reconcile_theme(&profile);
                self.links = profile.links.clone();
                self.record = RemoteRecord::Loaded(profile);
                self.state = SyncState::Idle;
                self.notifier.notify(Notice::success(THEME_SAVED));
                MutationOutcome::Applied
            }
            Err(err) => self.fail(THEME_SAVE_FAILED, err),
        }
    }

    /// Authoritative record with the draft's name, bio and theme laid over it.
    pub fn preview(&self) -> ProfileView {
        match &self.record {
            RemoteRecord::Loaded(profile) => {
                let mut preview = profile.clone();
                preview.name = Some(self.draft.name.clone());
                preview.bio = Some(self.draft.bio.clone());
                preview.theme = Some(self.draft.theme());
                preview.links = self.links.clone();
                ProfileResolver::resolve(&RemoteRecord::Loaded(preview))
            }
            other => ProfileResolver::resolve(other),
        }
    }

    pub fn public_url(&self, origin: &str) -> String {
        format!("{}/{}", origin.trim_end_matches('/'), self.session.username)
    }

    fn is_busy(&self) -> bool {
        self.state == SyncState::Submitting
    }

    fn fail(&mut self, message: &str, err: AppError) -> MutationOutcome {
        warn!("{} ({})", message, err);
        self.state = SyncState::Failed(err.to_string());
        self.notifier.notify(Notice::failure(message));
        MutationOutcome::Failed
    }

    async fn refetch_links(&mut self) {
        match self.source.fetch_current_user_record(&self.session).await {
            Ok(profile) => {
                self.links = profile.links.clone();
                self.record = RemoteRecord::Loaded(profile);
            }
            Err(err) => warn!("Failed to refetch links of {}: {}", self.session.username, err),
        }
    }

    async fn refetch_record(&self, fallback: Profile) -> Profile {
        match self.source.fetch_current_user_record(&self.session).await {
            Ok(profile) => profile,
            Err(err) => {
                warn!("Failed to refetch profile of {}: {}", self.session.username, err);
                fallback
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use bytes::Bytes;
    use mockall::mock;
    use rstest::{fixture, rstest};

    use crate::application::app_error::{AppError, AppResult};
    use crate::application::dto::dashboard::{AvatarFile, DashboardSession};
    use crate::application::interactors::draft_sync::{DraftSyncController, MutationOutcome, SyncState};
    use crate::application::interface::notifier::{Notice, NoticeKind, Notifier};
    use crate::application::interface::remote::{AvatarUploader, ProfileRemote, ProfileSource};
    use crate::domain::entities::id::Id;
    use crate::domain::entities::link::{Link, LinkCollection, NewLink};
    use crate::domain::entities::profile::{Profile, ProfileUpdate};
    use crate::domain::entities::theme::{ButtonStyle, PageBackground, ThemeSettings};
    use crate::domain::render::{ProfileView, RemoteRecord};

    // Mocks
    mock! {
        pub ProfileSourceMock {}

        #[async_trait]
        impl ProfileSource for ProfileSourceMock {
            async fn fetch_profile_by_username(&self, username: &str) -> AppResult<Option<Profile>>;
            async fn fetch_current_user_record(&self, session: &DashboardSession) -> AppResult<Profile>;
        }
    }

    mock! {
        pub ProfileRemoteMock {}

        #[async_trait]
        impl ProfileRemote for ProfileRemoteMock {
            async fn create_link(&self, session: &DashboardSession, link: NewLink) -> AppResult<Link>;
            async fn update_link(&self, session: &DashboardSession, link_id: &Id<Link>, link: NewLink) -> AppResult<Link>;
            async fn delete_link(&self, session: &DashboardSession, link_id: &Id<Link>) -> AppResult<()>;
            async fn update_profile(&self, session: &DashboardSession, update: ProfileUpdate) -> AppResult<Profile>;
        }
    }

    mock! {
        pub AvatarUploaderMock {}

        #[async_trait]
        impl AvatarUploader for AvatarUploaderMock {
            async fn upload_avatar_file(&self, session: &DashboardSession, file: AvatarFile) -> AppResult<String>;
        }
    }

    mock! {
        pub NotifierMock {}

        impl Notifier for NotifierMock {
            fn notify(&self, notice: Notice);
        }
    }

    /// Remote whose calls never complete.
    struct HangingRemote;

    #[async_trait]
    impl ProfileRemote for HangingRemote {
        async fn create_link(&self, _: &DashboardSession, _: NewLink) -> AppResult<Link> {
            std::future::pending().await
        }
        async fn update_link(&self, _: &DashboardSession, _: &Id<Link>, _: NewLink) -> AppResult<Link> {
            std::future::pending().await
        }
        async fn delete_link(&self, _: &DashboardSession, _: &Id<Link>) -> AppResult<()> {
            std::future::pending().await
        }
        async fn update_profile(&self, _: &DashboardSession, _: ProfileUpdate) -> AppResult<Profile> {
            std::future::pending().await
        }
    }

    struct Mocks {
        source: MockProfileSourceMock,
        remote: MockProfileRemoteMock,
        uploader: MockAvatarUploaderMock,
        notifier: MockNotifierMock,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                source: MockProfileSourceMock::new(),
                remote: MockProfileRemoteMock::new(),
                uploader: MockAvatarUploaderMock::new(),
                notifier: MockNotifierMock::new(),
            }
        }

        fn build(self) -> DraftSyncController {
            DraftSyncController::new(
                session(),
                Arc::new(self.source),
                Arc::new(self.remote),
                Arc::new(self.uploader),
                Arc::new(self.notifier),
            )
        }
    }

    fn session() -> DashboardSession {
        DashboardSession::new("ana", "019c47ec-2160-7e53-bf7e-06db2a1bad85")
    }

    fn link(title: &str) -> Link {
        Link::new(NewLink::new(title, "example.com", None).unwrap())
    }

    fn remote_failure() -> AppError {
        AppError::RemoteFailure("503 Service Unavailable".to_string())
    }

    #[fixture]
    fn ana() -> Profile {
        let mut profile = Profile::new("ana");
        profile.name = Some("Ana".to_string());
        profile.bio = Some("Designer".to_string());
        profile.links = LinkCollection::from_links(vec![link("one"), link("two")]);
        profile
    }

    async fn initialized(mut mocks: Mocks, profile: Profile) -> DraftSyncController {
        let first = profile.clone();
        mocks
            .source
            .expect_fetch_current_user_record()
            .times(1)
            .returning(move |_| Ok(first.clone()));
        let mut controller = mocks.build();
        controller.initialize().await;
        controller
    }

    #[rstest]
    #[tokio::test]
    async fn test_initialize_populates_draft_and_links(ana: Profile) {
        let controller = initialized(Mocks::new(), ana.clone()).await;

        assert_eq!(controller.draft().name, "Ana");
        assert_eq!(controller.draft().bio, "Designer");
        assert_eq!(controller.draft().page_background, PageBackground::Black);
        assert_eq!(controller.draft().button_style, ButtonStyle::Solid);
        assert_eq!(controller.links(), &ana.links);
        assert_eq!(controller.record(), &RemoteRecord::Loaded(ana));
        assert_eq!(controller.state(), &SyncState::Idle);
    }

    #[rstest]
    #[tokio::test]
    async fn test_initialize_failure_stays_loading_without_notice() {
        let mut mocks = Mocks::new();
        mocks
            .source
            .expect_fetch_current_user_record()
            .returning(|_| Err(remote_failure()));
        mocks.notifier.expect_notify().never();

        let mut controller = mocks.build();
        controller.initialize().await;

        assert_eq!(controller.record(), &RemoteRecord::Loading);
        assert_eq!(controller.preview(), ProfileView::Loading);
        assert!(controller.links().is_empty());
    }

    #[rstest]
    #[case("", "example.com")]
    #[case("Blog", "")]
    #[case("   ", "   ")]
    #[tokio::test]
    async fn test_add_link_with_blank_fields_is_inert(#[case] title: &str, #[case] url: &str) {
        let mut mocks = Mocks::new();
        mocks.remote.expect_create_link().never();
        mocks.source.expect_fetch_current_user_record().never();
        mocks.notifier.expect_notify().never();

        let mut controller = mocks.build();
        controller.set_link_title(title);
        controller.set_link_url(url);

        assert_eq!(controller.add_link().await, MutationOutcome::Skipped);
        assert_eq!(controller.state(), &SyncState::Idle);
        assert_eq!(controller.link_form().title, title);
    }

    #[rstest]
    #[case("example.com", "https://example.com")]
    #[case("https://example.com", "https://example.com")]
    #[case("http://example.com", "http://example.com")]
    #[tokio::test]
    async fn test_add_link_normalizes_url_and_refetches(ana: Profile, #[case] typed: &str, #[case] sent: &str) {
        let mut mocks = Mocks::new();
        let expected = sent.to_string();
        mocks
            .remote
            .expect_create_link()
            .withf(move |_, link| link.url == expected && link.title == "Blog")
            .times(1)
            .returning(|_, new_link| Ok(Link::new(new_link)));

        let mut refreshed = ana.clone();
        refreshed.links = LinkCollection::from_links(vec![link("one"), link("two"), link("Blog")]);
        let after = refreshed.clone();
        mocks
            .source
            .expect_fetch_current_user_record()
            .times(1)
            .returning(move |_| Ok(after.clone()));

        let mut controller = mocks.build();
        controller.set_link_title("Blog");
        controller.set_link_url(typed);

        assert_eq!(controller.add_link().await, MutationOutcome::Applied);
        assert_eq!(controller.links(), &refreshed.links);
        assert!(controller.link_form().title.is_empty());
        assert!(controller.link_form().url.is_empty());
        assert_eq!(controller.state(), &SyncState::Idle);
    }

    #[rstest]
    #[tokio::test]
    async fn test_add_link_failure_keeps_form_and_notifies(ana: Profile) {
        let mut mocks = Mocks::new();
        mocks.remote.expect_create_link().returning(|_, _| Err(remote_failure()));
        mocks
            .notifier
            .expect_notify()
            .withf(|notice| notice.kind == NoticeKind::Failure)
            .times(1)
            .return_const(());

        let mut controller = initialized(mocks, ana.clone()).await;
        controller.set_link_title("Blog");
        controller.set_link_url("example.com");

        assert_eq!(controller.add_link().await, MutationOutcome::Failed);
        assert!(matches!(controller.state(), SyncState::Failed(_)));
        assert_eq!(controller.link_form().title, "Blog");
        assert_eq!(controller.link_form().url, "example.com");
        assert_eq!(controller.links(), &ana.links);
    }

    #[rstest]
    #[tokio::test]
    async fn test_remove_link_failure_leaves_collection_untouched(ana: Profile) {
        let mut mocks = Mocks::new();
        mocks.remote.expect_delete_link().returning(|_, _| Err(remote_failure()));
        mocks.notifier.expect_notify().times(1).return_const(());

        let mut controller = initialized(mocks, ana.clone()).await;
        let first = ana.links.as_slice()[0].id;

        assert_eq!(controller.remove_link(&first).await, MutationOutcome::Failed);
        assert_eq!(controller.links(), &ana.links);
        assert_eq!(controller.links().as_slice()[0].id, first);
    }

    #[rstest]
    #[tokio::test]
    async fn test_remove_link_replaces_collection_from_remote(ana: Profile) {
        let mut mocks = Mocks::new();
        let mut after = ana.clone();
        after.links = LinkCollection::from_links(ana.links.as_slice()[1..].to_vec());
        let refreshed = after.clone();
        let initial = ana.clone();

        let mut calls = 0;
        mocks.source.expect_fetch_current_user_record().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 { Ok(initial.clone()) } else { Ok(refreshed.clone()) }
        });
        mocks.remote.expect_delete_link().times(1).returning(|_, _| Ok(()));

        let mut controller = mocks.build();
        controller.initialize().await;
        let first = ana.links.as_slice()[0].id;

        assert_eq!(controller.remove_link(&first).await, MutationOutcome::Applied);
        assert_eq!(controller.links(), &after.links);
        assert!(!controller.links().contains(&first));
    }

    #[rstest]
    #[tokio::test]
    async fn test_refetch_failure_after_mutation_keeps_stale_links(ana: Profile) {
        let mut mocks = Mocks::new();
        let initial = ana.clone();
        let mut calls = 0;
        mocks.source.expect_fetch_current_user_record().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 { Ok(initial.clone()) } else { Err(remote_failure()) }
        });
        mocks.remote.expect_delete_link().returning(|_, _| Ok(()));
        mocks.notifier.expect_notify().never();

        let mut controller = mocks.build();
        controller.initialize().await;
        let first = ana.links.as_slice()[0].id;

        assert_eq!(controller.remove_link(&first).await, MutationOutcome::Applied);
        assert_eq!(controller.links(), &ana.links);
        assert_eq!(controller.state(), &SyncState::Idle);
    }

    #[rstest]
    #[tokio::test]
    async fn test_edit_link_sends_form_contents(ana: Profile) {
        let mut mocks = Mocks::new();
        let target = ana.links.as_slice()[0].id;
        mocks
            .remote
            .expect_update_link()
            .withf(move |_, id, link| *id == target && link.url == "https://shop.example.com")
            .times(1)
            .returning(|_, id, new_link| {
                Ok(Link {
                    id: *id,
                    title: new_link.title,
                    url: new_link.url,
                    icon: None,
                })
            });
        mocks
            .source
            .expect_fetch_current_user_record()
            .returning(|_| Ok(Profile::new("ana")));

        let mut controller = mocks.build();
        controller.set_link_title("Shop");
        controller.set_link_url("shop.example.com");

        assert_eq!(controller.edit_link(&target).await, MutationOutcome::Applied);
        assert!(controller.link_form().title.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_save_profile_upload_failure_never_updates(ana: Profile) {
        let mut mocks = Mocks::new();
        mocks
            .uploader
            .expect_upload_avatar_file()
            .times(1)
            .returning(|_, _| Err(remote_failure()));
        mocks.remote.expect_update_profile().never();
        mocks
            .notifier
            .expect_notify()
            .withf(|notice| notice.kind == NoticeKind::Failure)
            .times(1)
            .return_const(());

        let mut controller = initialized(mocks, ana).await;
        controller.queue_avatar(AvatarFile {
            file_name: "me.png".to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from_static(b"\x89PNG"),
        });

        assert_eq!(controller.save_profile().await, MutationOutcome::Failed);
        assert!(controller.queued_avatar().is_some());
        assert!(matches!(controller.state(), SyncState::Failed(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_save_profile_substitutes_uploaded_avatar(ana: Profile) {
        let mut mocks = Mocks::new();
        let avatar_url = "https://branch.example.com/media/avatars/ana/new.png";
        mocks
            .uploader
            .expect_upload_avatar_file()
            .times(1)
            .returning(move |_, _| Ok(avatar_url.to_string()));

        let mut saved = ana.clone();
        saved.name = Some("Ana Lima".to_string());
        saved.avatar = Some(avatar_url.to_string());
        let returned = saved.clone();
        mocks
            .remote
            .expect_update_profile()
            .withf(move |_, update| {
                update.avatar.as_deref() == Some(avatar_url)
                    && update.name.as_deref() == Some("Ana Lima")
                    && update.theme.is_some()
            })
            .times(1)
            .returning(move |_, _| Ok(returned.clone()));
        mocks
            .notifier
            .expect_notify()
            .withf(|notice| notice == &Notice::success("Profile updated successfully!"))
            .times(1)
            .return_const(());

        let initial = ana.clone();
        let refreshed = saved.clone();
        let mut calls = 0;
        mocks.source.expect_fetch_current_user_record().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 { Ok(initial.clone()) } else { Ok(refreshed.clone()) }
        });

        let mut controller = mocks.build();
        controller.initialize().await;
        controller.set_name("Ana Lima");
        controller.queue_avatar(AvatarFile {
            file_name: "me.png".to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from_static(b"\x89PNG"),
        });

        assert_eq!(controller.save_profile().await, MutationOutcome::Applied);
        assert!(controller.queued_avatar().is_none());
        assert_eq!(controller.draft().avatar.as_deref(), Some(avatar_url));
        assert_eq!(controller.record(), &RemoteRecord::Loaded(saved));
        assert_eq!(controller.state(), &SyncState::Idle);
    }

    #[rstest]
    #[tokio::test]
    async fn test_save_profile_update_failure_keeps_draft(ana: Profile) {
        let mut mocks = Mocks::new();
        mocks
            .uploader
            .expect_upload_avatar_file()
            .times(1)
            .returning(|_, _| Ok("https://branch.example.com/media/avatars/ana/new.png".to_string()));
        mocks
            .remote
            .expect_update_profile()
            .withf(|_, update| update.avatar.as_deref() == Some("https://branch.example.com/media/avatars/ana/new.png"))
            .times(1)
            .returning(|_, _| Err(remote_failure()));
        mocks
            .notifier
            .expect_notify()
            .withf(|notice| notice == &Notice::failure("Error updating profile. Please try again."))
            .times(1)
            .return_const(());

        let mut controller = initialized(mocks, ana.clone()).await;
        controller.set_name("Ana Lima");
        controller.queue_avatar(AvatarFile {
            file_name: "me.png".to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from_static(b"\x89PNG"),
        });
        let before = controller.draft().clone();

        assert_eq!(controller.save_profile().await, MutationOutcome::Failed);
        assert_eq!(controller.draft(), &before);
        assert_eq!(controller.draft().avatar, None);
        assert_eq!(controller.record(), &RemoteRecord::Loaded(ana.clone()));
        assert_eq!(controller.links(), &ana.links);
        assert_eq!(controller.queued_avatar().map(|f| f.file_name.as_str()), Some("me.png"));
        assert!(matches!(controller.state(), SyncState::Failed(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_save_theme_failure_keeps_draft(ana: Profile) {
        let mut mocks = Mocks::new();
        mocks
            .remote
            .expect_update_profile()
            .times(1)
            .returning(|_, _| Err(remote_failure()));
        mocks
            .notifier
            .expect_notify()
            .withf(|notice| notice == &Notice::failure("Error saving theme settings. Please try again."))
            .times(1)
            .return_const(());

        let mut controller = initialized(mocks, ana.clone()).await;
        controller.set_page_background(PageBackground::Purple);
        controller.set_font_family("inter");
        let before = controller.draft().clone();

        assert_eq!(controller.save_theme().await, MutationOutcome::Failed);
        assert_eq!(controller.draft(), &before);
        assert_eq!(controller.record(), &RemoteRecord::Loaded(ana.clone()));
        assert_eq!(controller.links(), &ana.links);
        assert!(matches!(controller.state(), SyncState::Failed(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn test_save_theme_submits_theme_only(ana: Profile) {
        let mut mocks = Mocks::new();
        let mut themed = ana.clone();
        themed.theme = Some(ThemeSettings::new(PageBackground::Purple, ButtonStyle::Outline, "inter"));
        let returned = themed.clone();
        mocks
            .remote
            .expect_update_profile()
            .withf(|_, update| {
                update.name.is_none()
                    && update.bio.is_none()
                    && update.avatar.is_none()
                    && update.theme.as_ref().and_then(|t| t.button_style.as_deref()) == Some("outline")
            })
            .times(1)
            .returning(move |_, _| Ok(returned.clone()));
        mocks
            .notifier
            .expect_notify()
            .withf(|notice| notice.message == "Theme settings saved successfully!")
            .times(1)
            .return_const(());

        let initial = ana.clone();
        let mut calls = 0;
        mocks.source.expect_fetch_current_user_record().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 { Ok(initial.clone()) } else { Err(AppError::RemoteFailure("timeout".to_string())) }
        });

        let mut controller = mocks.build();
        controller.initialize().await;
        controller.set_name("Unsaved");
        controller.set_page_background(PageBackground::Purple);
        controller.set_button_style(ButtonStyle::Outline);

        assert_eq!(controller.save_theme().await, MutationOutcome::Applied);
        assert_eq!(controller.draft().name, "Unsaved");
        assert_eq!(controller.draft().button_style, ButtonStyle::Outline);
        assert_eq!(controller.record(), &RemoteRecord::Loaded(themed));
    }

    #[rstest]
    #[tokio::test]
    async fn test_failed_state_recovers_on_next_operation(ana: Profile) {
        let mut mocks = Mocks::new();
        let mut attempts = 0;
        mocks.remote.expect_delete_link().times(2).returning(move |_, _| {
            attempts += 1;
            if attempts == 1 { Err(remote_failure()) } else { Ok(()) }
        });
        mocks.notifier.expect_notify().times(1).return_const(());

        let initial = ana.clone();
        let mut controller = {
            mocks
                .source
                .expect_fetch_current_user_record()
                .returning(move |_| Ok(initial.clone()));
            mocks.build()
        };
        controller.initialize().await;
        let first = ana.links.as_slice()[0].id;

        assert_eq!(controller.remove_link(&first).await, MutationOutcome::Failed);
        assert_eq!(controller.remove_link(&first).await, MutationOutcome::Applied);
        assert_eq!(controller.state(), &SyncState::Idle);
    }

    #[rstest]
    #[tokio::test]
    async fn test_dropped_mutation_stays_submitting_and_blocks_others(ana: Profile) {
        let mut source = MockProfileSourceMock::new();
        let initial = ana.clone();
        source
            .expect_fetch_current_user_record()
            .times(1)
            .returning(move |_| Ok(initial.clone()));
        let mut uploader = MockAvatarUploaderMock::new();
        uploader.expect_upload_avatar_file().never();
        let mut notifier = MockNotifierMock::new();
        notifier.expect_notify().never();

        let mut controller = DraftSyncController::new(
            session(),
            Arc::new(source),
            Arc::new(HangingRemote),
            Arc::new(uploader),
            Arc::new(notifier),
        );
        controller.initialize().await;
        controller.set_link_title("Blog");
        controller.set_link_url("example.com");

        let timed_out = tokio::time::timeout(Duration::from_millis(20), controller.add_link()).await;
        assert!(timed_out.is_err());
        assert_eq!(controller.state(), &SyncState::Submitting);

        let first = ana.links.as_slice()[0].id;
        assert_eq!(controller.remove_link(&first).await, MutationOutcome::Busy);
        assert_eq!(controller.save_profile().await, MutationOutcome::Busy);
        assert_eq!(controller.save_theme().await, MutationOutcome::Busy);
        assert_eq!(controller.add_link().await, MutationOutcome::Busy);
        assert_eq!(controller.links(), &ana.links);
    }

    #[rstest]
    #[tokio::test]
    async fn test_preview_overlays_draft(ana: Profile) {
        let mut controller = initialized(Mocks::new(), ana).await;
        controller.set_name("  ");
        controller.set_page_background(PageBackground::Gradient);
        controller.set_button_style(ButtonStyle::Gradient);

        let view = controller.preview();
        let model = view.as_resolved().expect("resolved preview");
        assert_eq!(model.display_name, "ana");
        assert_eq!(model.page_background, PageBackground::Gradient);
        assert_eq!(model.button_variant, ButtonStyle::Gradient);
        assert_eq!(model.links.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn test_teardown_returns_to_initial_state(ana: Profile) {
        let mut controller = initialized(Mocks::new(), ana).await;
        controller.set_link_title("Blog");

        controller.teardown();

        assert_eq!(controller.record(), &RemoteRecord::Loading);
        assert!(controller.links().is_empty());
        assert!(controller.link_form().title.is_empty());
        assert_eq!(controller.draft().name, "");
        assert_eq!(controller.state(), &SyncState::Idle);
    }

    #[rstest]
    #[case("https://branch.example.com", "https://branch.example.com/ana")]
    #[case("https://branch.example.com/", "https://branch.example.com/ana")]
    fn test_public_url(#[case] origin: &str, #[case] expected: &str) {
        let controller = Mocks::new().build();
        assert_eq!(controller.public_url(origin), expected);
    }
}
