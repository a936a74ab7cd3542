use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use super::error::WebError;
use super::state::AppState;
use crate::api::ApiClient;

/// Settings shared by the config and the runtime state.
#[derive(Debug, Clone)]
pub(crate) struct WebSettings {
    pub(crate) bind: SocketAddr,
    pub(crate) secure_cookies: bool,
    pub(crate) http_timeout: Duration,
}

impl WebSettings {
    fn defaults() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            secure_cookies: true,
            http_timeout: Duration::from_secs(15),
        }
    }
}

/// Web front-end configuration.
///
/// The backend URL is the only required field and is a constructor
/// parameter. Everything else has a default and a `with_*` override.
#[derive(Debug, Clone)]
pub struct WebConfig {
    pub(super) backend_url: Url,
    pub(super) settings: WebSettings,
}

impl WebConfig {
    #[must_use]
    pub fn new(backend_url: Url) -> Self {
        Self {
            backend_url,
            settings: WebSettings::defaults(),
        }
    }

    /// Create config from environment variables.
    ///
    /// # Required env vars
    /// - `CLASSMASTER_BACKEND_URL`: base URL of the REST backend
    ///
    /// # Optional env vars
    /// - `CLASSMASTER_BIND`: listen address (default `127.0.0.1:3000`)
    /// - `CLASSMASTER_INSECURE_COOKIES`: `"1"` or `"true"` drops the `Secure` flag (local HTTP)
    /// - `CLASSMASTER_HTTP_TIMEOUT_SECS`: backend request timeout (default 15)
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Config`] if the backend URL is missing or any value
    /// does not parse.
    pub fn from_env() -> Result<Self, WebError> {
        let backend_url: Url = std::env::var("CLASSMASTER_BACKEND_URL")
            .map_err(|_| WebError::Config("CLASSMASTER_BACKEND_URL is required".into()))?
            .parse()
            .map_err(|e| WebError::Config(format!("CLASSMASTER_BACKEND_URL: {e}")))?;

        let mut config = Self::new(backend_url);

        if let Ok(bind) = std::env::var("CLASSMASTER_BIND") {
            let bind: SocketAddr = bind
                .parse()
                .map_err(|e| WebError::Config(format!("CLASSMASTER_BIND: {e}")))?;
            config = config.with_bind(bind);
        }
        if let Ok(secs) = std::env::var("CLASSMASTER_HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| WebError::Config(format!("CLASSMASTER_HTTP_TIMEOUT_SECS: {e}")))?;
            config = config.with_http_timeout(Duration::from_secs(secs));
        }

        let insecure = matches!(
            std::env::var("CLASSMASTER_INSECURE_COOKIES").as_deref(),
            Ok("1") | Ok("true"),
        );

        Ok(config.with_secure_cookies(!insecure))
    }

    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.settings.bind = bind;
        self
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.settings.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.settings.http_timeout = timeout;
        self
    }

    #[must_use]
    pub fn bind(&self) -> SocketAddr {
        self.settings.bind
    }

    /// Build the runtime state: one pooled HTTP client for every request.
    ///
    /// # Errors
    ///
    /// Returns [`WebError::Config`] if the HTTP client cannot be built.
    pub fn into_state(self) -> Result<AppState, WebError> {
        let http = reqwest::Client::builder()
            .timeout(self.settings.http_timeout)
            .build()
            .map_err(|e| WebError::Config(format!("HTTP client: {e}")))?;
        Ok(AppState {
            api: ApiClient::new(self.backend_url).with_http_client(http),
            settings: self.settings,
        })
    }
}
