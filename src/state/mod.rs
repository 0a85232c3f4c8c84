use crate::api::ApiClient;
use crate::models::Source;
use crate::storage;
use crate::util::theme;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    /// Holds the bearer token; route guards read `is_authenticated()`.
    pub api_client: RwSignal<ApiClient>,

    /// Selected source filter (`None` = all sources). Persisted.
    pub source: RwSignal<Option<Source>>,

    /// Bumped whenever the saved-content list changes so list views refetch.
    pub content_version: RwSignal<u64>,

    pub dark_mode: RwSignal<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::load_from_storage()),
            source: RwSignal::new(storage::load_source()),
            content_version: RwSignal::new(0),
            dark_mode: RwSignal::new(theme::read_preference()),
        }
    }

    pub fn get_token(&self) -> Option<String> {
        self.api_client.with_untracked(|c| c.token.clone())
    }

    pub fn set_token(&self, token: String) {
        self.api_client.update(|c| c.set_token(token));
    }

    pub fn clear_token(&self) {
        self.api_client.update(|c| c.clear_token());
    }

    /// Copies the token of a client that went through a request back into state.
    ///
    /// Only writes when the token changed (refreshed or cleared), so Effects
    /// tracking `api_client` are not retriggered by every request.
    pub fn adopt_client(&self, client: &ApiClient) {
        let changed = self.api_client.with_untracked(|c| c.token != client.token);
        if changed {
            log::debug!("api token changed after request");
            self.api_client.update(|c| c.token = client.token.clone());
        }
    }

    pub fn get_source(&self) -> Option<Source> {
        self.source.get_untracked()
    }

    pub fn set_source(&self, source: Source) {
        storage::save_source(source);
        self.source.set(Some(source));
    }

    pub fn clear_source(&self) {
        storage::clear_source();
        self.source.set(None);
    }

    pub fn invalidate_content(&self) {
        self.content_version.update(|v| *v = v.wrapping_add(1));
    }

    pub fn toggle_theme(&self) {
        let next = theme::toggle(self.dark_mode.get_untracked());
        self.dark_mode.set(next);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
