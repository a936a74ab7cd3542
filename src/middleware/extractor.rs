use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use super::error::WebError;
use crate::cookies::{SESSION_COOKIE_NAME, decode_session};
use crate::types::SessionRecord;

/// The signed-in user, read from the `user` cookie.
///
/// Rejects with `401` when the cookie is missing or does not decode to a
/// valid record. Pages behind the route guard never see that case.
///
/// ```rust,ignore
/// async fn dashboard(State(state): State<AppState>, CurrentUser(me): CurrentUser) -> String {
///     format!("Hello, {}", me.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionRecord);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE_NAME)
            .and_then(|cookie| decode_session(cookie.value()))
            .map(Self)
            .ok_or(WebError::Unauthenticated)
    }
}
