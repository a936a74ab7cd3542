use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::cookies::SESSION_COOKIE_NAME;
use crate::guard::{GuardDecision, evaluate, is_excluded};

/// Route guard layer. Mount with `axum::middleware::from_fn(route_guard)`.
///
/// Runs on every navigation except excluded paths (API, static assets).
/// Redirects answer `303 See Other` so a guarded form POST lands on a GET.
pub async fn route_guard(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    if is_excluded(path) {
        return next.run(request).await;
    }

    let jar = CookieJar::from_headers(request.headers());
    let cookie = jar.get(SESSION_COOKIE_NAME).map(|c| c.value());
    match evaluate(path, cookie) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(to) => {
            tracing::debug!(path, to = %to, "Route guard redirect");
            Redirect::to(&to).into_response()
        }
    }
}
