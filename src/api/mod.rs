//! Typed client for the ClassMaster REST backend.
//!
//! One submodule per resource area, each adding methods to [`ApiClient`].
//! Every method returns either the parsed body or an [`ApiError`] whose
//! message can be shown to the user; transport and decoding failures never
//! escape in raw form.
//!
//! User-scoped calls read the caller's identity from the client's
//! [`SessionSource`] and send it as the `X-User_ID` header. With no session
//! they fail with [`ApiError::NotAuthenticated`] before any I/O.
//!
//! ```rust,ignore
//! let store = Arc::new(SessionStore::new(FileSlot::new(state_dir)));
//! let api = ApiClient::new("http://localhost:5000".parse()?).with_session(store.clone());
//!
//! store.set(&api.login("a@x.com", "secret").await?);
//! let tasks = api.student_tasks().await?;
//! ```

mod announcements;
mod auth;
mod courses;
mod dashboard;
mod error;
mod grades;
mod leaderboard;
mod schedule;
mod tasks;

use std::borrow::Cow;
use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::session::{Anonymous, SessionSource};
use crate::types::{Role, SessionRecord};

pub use auth::NewAccount;
pub use error::ApiError;

/// Header carrying the caller's user id. Advisory: the backend does its
/// own authorization.
pub const USER_ID_HEADER: &str = "x-user_id";

/// Backend client. Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<dyn SessionSource>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the backend at `base_url`, with no session.
    #[must_use]
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            session: Arc::new(Anonymous),
        }
    }

    /// Use a custom HTTP client (timeouts, connection pool reuse).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Read the caller's identity from `source` on every call.
    #[must_use]
    pub fn with_session(mut self, source: impl SessionSource) -> Self {
        self.session = Arc::new(source);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The identity user-scoped calls will be made as.
    #[must_use]
    pub fn session(&self) -> Option<SessionRecord> {
        self.session.current()
    }

    pub(crate) fn require_session(&self) -> Result<SessionRecord, ApiError> {
        self.session.current().ok_or(ApiError::NotAuthenticated)
    }

    pub(crate) fn require_role(&self, role: Role) -> Result<SessionRecord, ApiError> {
        let record = self.require_session()?;
        if record.role == role {
            Ok(record)
        } else {
            Err(ApiError::Forbidden(format!(
                "Only {role} users can perform this action."
            )))
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Request(format!("{path}: {e}")))
    }

    /// Anonymous request.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.http.request(method, self.endpoint(path)?))
    }

    /// Request made as `identity`.
    pub(crate) fn request_as(
        &self,
        identity: &SessionRecord,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, ApiError> {
        Ok(self
            .request(method, path)?
            .header(USER_ID_HEADER, identity.user_id.to_string()))
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<T, ApiError> {
        let response = Self::dispatch(request, operation).await?;
        response.json::<T>().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Undecodable backend response");
            ApiError::Decode(e.to_string())
        })
    }

    /// Send a read of an optional collection: 404 means "none yet".
    pub(crate) async fn send_list<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<Vec<T>, ApiError> {
        match self.send(request, operation).await {
            Err(ApiError::NotFound(_)) => Ok(Vec::new()),
            other => other,
        }
    }

    /// Send and discard whatever body comes back.
    pub(crate) async fn send_empty(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<(), ApiError> {
        Self::dispatch(request, operation).await.map(drop)
    }

    async fn dispatch(request: RequestBuilder, operation: &'static str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            tracing::warn!(operation, error = %e, "Backend request failed");
            if e.is_builder() {
                ApiError::Request(e.to_string())
            } else {
                ApiError::Connection
            }
        })?;
        Self::ensure_success(response, operation).await
    }

    /// Returns the response on success, or the mapped error.
    async fn ensure_success(
        response: Response,
        operation: &'static str,
    ) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() {
            tracing::error!(operation, status = status.as_u16(), body = %body, "Backend server error");
        } else if status != StatusCode::NOT_FOUND {
            tracing::debug!(operation, status = status.as_u16(), "Backend rejected request");
        }
        Err(ApiError::from_status(status, &body))
    }
}

/// Percent-encode one path segment (course codes may contain spaces).
fn segment(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://backend.local/api".parse().unwrap())
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        assert_eq!(client().base_url().as_str(), "http://backend.local/api/");
        let root = ApiClient::new("http://backend.local".parse().unwrap());
        assert_eq!(root.base_url().as_str(), "http://backend.local/");
    }

    #[test]
    fn endpoints_stay_under_base_path() {
        let url = client().endpoint("/all-courses").unwrap();
        assert_eq!(url.as_str(), "http://backend.local/api/all-courses");
        let url = client()
            .endpoint(&format!("/sections/{}/{}/grades", segment("CS 101"), 2))
            .unwrap();
        assert_eq!(url.as_str(), "http://backend.local/api/sections/CS%20101/2/grades");
    }

    #[test]
    fn anonymous_client_has_no_session() {
        assert_eq!(client().require_session(), Err(ApiError::NotAuthenticated));
    }

    #[test]
    fn identity_header_is_attached() {
        let me = SessionRecord::new(42, "A", "a@x.com", Role::Faculty);
        let request = client()
            .request_as(&me, Method::GET, "/faculty/42/tasks")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.headers()[USER_ID_HEADER], "42");
        assert_eq!(request.url().path(), "/api/faculty/42/tasks");
    }

    #[test]
    fn role_gate() {
        let api = client().with_session(SessionRecord::new(1, "S", "s@x.com", Role::Student));
        assert!(api.require_role(Role::Student).is_ok());
        let err = api.require_role(Role::Admin).unwrap_err();
        assert_eq!(err, ApiError::Forbidden("Only admin users can perform this action.".into()));
    }

    mod backend {
        use axum::Json;
        use axum::http::{HeaderMap, StatusCode};
        use axum::routing::{get, post};
        use serde_json::json;

        use super::*;

        /// Serve `router` on an ephemeral port and point a client at it.
        async fn serve(router: axum::Router) -> ApiClient {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
            ApiClient::new(format!("http://{addr}").parse().unwrap())
        }

        fn as_role(api: ApiClient, role: Role) -> ApiClient {
            api.with_session(SessionRecord::new(42, "A", "a@x.com", role))
        }

        #[tokio::test]
        async fn missing_list_reads_as_empty() {
            let router = axum::Router::new()
                .route("/students/{id}/tasks", get(|| async { StatusCode::NOT_FOUND }));
            let api = as_role(serve(router).await, Role::Student);
            assert_eq!(api.student_tasks().await, Ok(Vec::new()));
        }

        #[tokio::test]
        async fn user_id_header_reaches_backend() {
            let router = axum::Router::new().route(
                "/faculty/{id}/tasks",
                get(|headers: HeaderMap| async move {
                    let seen = headers
                        .get(USER_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("missing")
                        .to_owned();
                    Json(json!([{ "id": 1, "title": seen }]))
                }),
            );
            let api = as_role(serve(router).await, Role::Faculty);
            let tasks = api.faculty_tasks().await.unwrap();
            assert_eq!(tasks.len(), 1);
            assert_eq!(tasks[0].title, "42");
        }

        #[tokio::test]
        async fn backend_message_is_passed_through() {
            let router = axum::Router::new().route(
                "/login",
                post(|| async {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "error": "Wrong email or password" })),
                    )
                }),
            );
            let api = serve(router).await;
            assert_eq!(
                api.login("a@x.com", "nope").await,
                Err(ApiError::Unauthorized("Wrong email or password".into()))
            );
        }

        #[tokio::test]
        async fn login_decodes_wrapped_identity() {
            let router = axum::Router::new().route(
                "/login",
                post(|| async {
                    Json(json!({ "user": { "user_id": 42, "name": "A", "role": "faculty" } }))
                }),
            );
            let api = serve(router).await;
            let me = api.login("a@x.com", "secret").await.unwrap();
            assert_eq!(me.user_id, crate::types::UserId(42));
            assert_eq!(me.role, Role::Faculty);
        }

        #[tokio::test]
        async fn undecodable_body_is_a_decode_error() {
            let router = axum::Router::new().route("/all-courses", get(|| async { "not json" }));
            let api = serve(router).await;
            assert!(matches!(api.all_courses().await, Err(ApiError::Decode(_))));
        }

        #[tokio::test]
        async fn server_errors_hide_backend_text() {
            let router = axum::Router::new().route(
                "/all-sections",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "stack trace") }),
            );
            let api = serve(router).await;
            let err = api.all_sections().await.unwrap_err();
            assert_eq!(err, ApiError::Server { status: 500 });
            assert!(err.is_retryable());
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_connection_error() {
        let api = ApiClient::new("http://127.0.0.1:9".parse().unwrap());
        let request = api.request(Method::GET, "/all-courses").unwrap();
        let result: Result<Vec<serde_json::Value>, _> = api.send(request, "all courses").await;
        assert_eq!(result.unwrap_err(), ApiError::Connection);
    }
}
