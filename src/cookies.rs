//! The `user` cookie: the request-readable mirror of the session record.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::{Duration, OffsetDateTime};

use crate::types::SessionRecord;

pub const SESSION_COOKIE_NAME: &str = "user";
pub const SESSION_TTL_DAYS: i64 = 7;

/// Create the session cookie from the record's JSON form.
///
/// The value is URL-encoded JSON. Not `HttpOnly`: client code reads it too.
pub(crate) fn session_cookie(record_json: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((
        SESSION_COOKIE_NAME,
        urlencoding::encode(record_json).into_owned(),
    ))
    .http_only(false)
    .secure(secure)
    .same_site(SameSite::Lax)
    .path("/")
    .max_age(Duration::days(SESSION_TTL_DAYS))
    .build()
}

/// Create the removal cookie: empty value, already expired.
pub(crate) fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

/// Whether a cookie still carries a session (not a removal cookie).
pub(crate) fn is_live(cookie: &Cookie<'_>) -> bool {
    !cookie.value().is_empty() && cookie.max_age() != Some(Duration::ZERO)
}

/// Decode a raw cookie value into a session record.
///
/// Anything that does not decode to a valid record yields `None`.
#[must_use]
pub fn decode_session(value: &str) -> Option<SessionRecord> {
    let json = urlencoding::decode(value).ok()?;
    SessionRecord::from_json(&json).ok()
}
