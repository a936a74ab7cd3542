use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use super::error::WebError;
use super::state::AppState;
use crate::api::NewAccount;
use crate::cookies;
use crate::guard::{REGISTER_PATH, SIGN_IN_PATH};
use crate::types::SessionRecord;

const SIGN_OUT_PATH: &str = "/auth/signout";

/// Sign-in, registration and sign-out.
pub(super) fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(SIGN_IN_PATH) }))
        .route(SIGN_IN_PATH, get(sign_in_page).post(sign_in))
        .route(REGISTER_PATH, post(register))
        .route(SIGN_OUT_PATH, get(sign_out).post(sign_out))
}

// ── Sign in ────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RedirectParam {
    redirect: Option<String>,
}

#[derive(Serialize)]
struct SignInPage {
    action: &'static str,
    register: &'static str,
    redirect: Option<String>,
}

async fn sign_in_page(Query(params): Query<RedirectParam>) -> Json<SignInPage> {
    Json(SignInPage {
        action: SIGN_IN_PATH,
        register: REGISTER_PATH,
        redirect: params.redirect.filter(|r| is_safe_redirect(r)),
    })
}

#[derive(Deserialize)]
struct SignInForm {
    email: String,
    password: String,
    #[serde(default)]
    redirect: Option<String>,
}

async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignInForm>,
) -> Result<(CookieJar, Redirect), WebError> {
    let record = state.api().login(&form.email, &form.password).await?;
    let target = form
        .redirect
        .filter(|r| is_safe_redirect(r))
        .unwrap_or_else(|| record.role.dashboard().to_owned());
    let jar = start_session(jar, &record, state.secure_cookies())?;
    Ok((jar, Redirect::to(&target)))
}

// ── Register ───────────────────────────────────────────────────────

async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(account): Form<NewAccount>,
) -> Result<(CookieJar, Redirect), WebError> {
    let record = state.api().register(&account).await?;
    let jar = start_session(jar, &record, state.secure_cookies())?;
    Ok((jar, Redirect::to(record.role.dashboard())))
}

// ── Sign out ───────────────────────────────────────────────────────

async fn sign_out(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.add(cookies::clear_session_cookie()), Redirect::to(SIGN_IN_PATH))
}

// ── Helpers ────────────────────────────────────────────────────────

fn start_session(jar: CookieJar, record: &SessionRecord, secure: bool) -> Result<CookieJar, WebError> {
    let cookie = cookies::session_cookie(&record.to_json()?, secure);
    Ok(jar.add(cookie))
}

/// Only same-site absolute paths. Rejects `//host` and `/\host`, which
/// browsers treat as another origin.
fn is_safe_redirect(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//") && !target.starts_with("/\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_redirects() {
        assert!(is_safe_redirect("/faculty/tasks"));
        assert!(is_safe_redirect("/"));
        assert!(!is_safe_redirect("//evil.example"));
        assert!(!is_safe_redirect("/\\evil.example"));
        assert!(!is_safe_redirect("https://evil.example"));
        assert!(!is_safe_redirect(""));
    }
}
