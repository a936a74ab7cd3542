//! Navigation-time authorization.
//!
//! [`evaluate`] decides, from the requested path and the raw `user` cookie
//! alone, whether a navigation goes through or is redirected. It holds no
//! state and performs no I/O.

use crate::cookies::decode_session;
use crate::types::Role;

pub const SIGN_IN_PATH: &str = "/auth/signin";
pub const REGISTER_PATH: &str = "/auth/register";

/// Prefixes the guard never sees (static assets, backend proxy).
const EXCLUDED_PREFIXES: &[&str] = &["/api/", "/static/", "/assets/"];
const EXCLUDED_PATHS: &[&str] = &["/favicon.ico", "/robots.txt"];

/// The three kinds of path the guard distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Under a role root (`/student`, `/faculty`, `/admin`).
    Protected(Role),
    /// `/`, the sign-in page, or the register page.
    PublicAuth,
    Other,
}

/// Outcome of one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

#[must_use]
pub fn classify(path: &str) -> PathClass {
    if path == "/" || path == SIGN_IN_PATH || path == REGISTER_PATH {
        return PathClass::PublicAuth;
    }

    let first_segment = path
        .strip_prefix('/')
        .and_then(|rest| rest.split('/').next())
        .unwrap_or_default();

    match Role::from_segment(first_segment) {
        Some(role) => PathClass::Protected(role),
        None => PathClass::Other,
    }
}

/// Paths filtered out before the guard runs.
#[must_use]
pub fn is_excluded(path: &str) -> bool {
    EXCLUDED_PATHS.contains(&path) || EXCLUDED_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// Decide one navigation.
///
/// `cookie` is the raw `user` cookie value, if the request carried one.
/// A cookie that does not decode to a valid session record counts as no
/// cookie.
#[must_use]
pub fn evaluate(path: &str, cookie: Option<&str>) -> GuardDecision {
    let session = cookie.and_then(decode_session);

    match classify(path) {
        PathClass::Protected(required) => match session {
            None => GuardDecision::Redirect(sign_in_redirect(path)),
            Some(record) if role_matches(record.role, required) => GuardDecision::Allow,
            Some(record) => GuardDecision::Redirect(record.role.dashboard().to_owned()),
        },
        PathClass::PublicAuth if path != "/" => match session {
            Some(record) => GuardDecision::Redirect(record.role.dashboard().to_owned()),
            None => GuardDecision::Allow,
        },
        PathClass::PublicAuth | PathClass::Other => GuardDecision::Allow,
    }
}

fn role_matches(actual: Role, required: Role) -> bool {
    match (actual, required) {
        (Role::Student, Role::Student)
        | (Role::Faculty, Role::Faculty)
        | (Role::Admin, Role::Admin) => true,
        (Role::Student | Role::Faculty | Role::Admin, _) => false,
    }
}

/// `/auth/signin?redirect=<path>`; `/` stays readable in the parameter.
#[must_use]
pub fn sign_in_redirect(path: &str) -> String {
    let encoded = urlencoding::encode(path).replace("%2F", "/");
    format!("{SIGN_IN_PATH}?redirect={encoded}")
}
