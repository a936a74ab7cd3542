use super::config::WebSettings;
use crate::api::ApiClient;
use crate::types::SessionRecord;

/// Shared state for page and auth handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) api: ApiClient,
    pub(crate) settings: WebSettings,
}

impl AppState {
    /// Anonymous client, for sign-in and registration.
    pub(super) fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Client that calls the backend as `user`. Shares the connection pool.
    pub(super) fn api_as(&self, user: &SessionRecord) -> ApiClient {
        self.api.clone().with_session(user.clone())
    }

    pub(super) fn secure_cookies(&self) -> bool {
        self.settings.secure_cookies
    }
}
