use crate::api::ApiClient;
use crate::session::SessionState;
use leptos::logging::warn;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Header login indicator; resolved from `/auth/me` on mount.
    pub session: RwSignal<SessionState>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            session: RwSignal::new(SessionState::default()),
        }
    }

    /// Clears the token and reloads, which re-runs session resolution.
    pub fn logout(&self) {
        self.api_client.get_untracked().logout();
        self.session.set(SessionState::Anonymous);
        if let Err(e) = window().location().reload() {
            warn!("[state] reload after logout failed: {:?}", e);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
