use ideaboard_app::application::Notice;
use ideaboard_app::domain::Identity;
use ideaboard_app::infrastructure::session::SessionManager;
use leptos::prelude::*;

/// The latest notification, shared through context.
#[derive(Clone, Copy)]
pub struct NoticeState(RwSignal<Option<Notice>>);

impl NoticeState {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn show(&self, notice: Notice) {
        self.0.try_set(Some(notice));
    }

    pub fn clear(&self) {
        self.0.try_set(None);
    }

    pub fn current(&self) -> Option<Notice> {
        self.0.get()
    }
}

impl Default for NoticeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Who is logged in, as the views see it. Starts empty so server and client
/// render the same markup; `sync` fills it in once the browser store is readable.
#[derive(Clone, Copy)]
pub struct AuthState(RwSignal<Option<Identity>>);

impl AuthState {
    pub fn new() -> Self {
        Self(RwSignal::new(None))
    }

    pub fn sync(&self, session: &SessionManager) {
        let identity = session
            .is_authenticated()
            .then(|| session.current_identity())
            .flatten();
        self.set(identity);
    }

    pub fn set(&self, identity: Option<Identity>) {
        self.0.try_set(identity);
    }

    pub fn identity(&self) -> Option<Identity> {
        self.0.get()
    }

    pub fn is_logged_in(&self) -> bool {
        self.0.with(Option::is_some)
    }

    /// The logged-in user's id, or `None` for guests.
    pub fn subject_id(&self) -> Option<String> {
        self.0
            .with(|identity| identity.as_ref().map(|i| i.subject_id.clone()))
    }

    pub fn is_admin(&self) -> bool {
        self.0
            .with(|identity| identity.as_ref().is_some_and(Identity::is_admin))
    }

    pub fn can_modify(&self, creator_id: &str) -> bool {
        self.0
            .with(|identity| identity.as_ref().is_some_and(|i| i.can_modify(creator_id)))
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}
