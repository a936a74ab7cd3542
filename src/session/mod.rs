//! Client-side session store.
//!
//! A [`SessionStore`] is the single answer to "who is using this client".
//! It writes the [`SessionRecord`] through to two places at once:
//!
//! - a durable [`SessionSlot`] (key `user`), read by page controllers, and
//! - the `user` cookie, read by the route guard on every navigation.
//!
//! Both copies always hold the same JSON.
//!
//! # Failure contract
//!
//! Session lookup is infallible from the caller's point of view. Storage
//! errors and malformed stored values are logged and reported as "no
//! session"; a malformed value is left in the slot until the next
//! [`set`](SessionStore::set) or [`clear`](SessionStore::clear) replaces it.
//!
//! ```rust,ignore
//! let store = SessionStore::new(FileSlot::new(state_dir));
//! store.set(&SessionRecord::new(42, "A", "a@x.com", Role::Faculty));
//! assert!(store.has_role(Role::Faculty));
//! store.clear();
//! assert!(store.get().is_none());
//! ```

mod slot;

use std::sync::Arc;

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;
use parking_lot::Mutex;

use crate::cookies::{self, SESSION_COOKIE_NAME};
use crate::types::{Role, SessionRecord};

pub use slot::{FileSlot, MemorySlot, SessionSlot};

/// Slot key holding the session record.
pub const SESSION_SLOT_KEY: &str = "user";

/// Session store over a durable slot plus the mirrored cookie.
pub struct SessionStore<S> {
    slot: S,
    cookies: Mutex<CookieJar>,
    secure_cookies: bool,
}

impl<S: SessionSlot> SessionStore<S> {
    #[must_use]
    pub fn new(slot: S) -> Self {
        Self {
            slot,
            cookies: Mutex::new(CookieJar::new()),
            secure_cookies: true,
        }
    }

    /// Mark the mirrored cookie `Secure` (default `true`).
    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.secure_cookies = secure;
        self
    }

    /// The current session record, or `None`.
    ///
    /// Re-reads and re-parses the slot on every call. Never fails: a read
    /// error or an unparseable value yields `None`.
    #[must_use]
    pub fn get(&self) -> Option<SessionRecord> {
        let raw = match self.slot.get_item(SESSION_SLOT_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "Session slot read failed");
                return None;
            }
        };

        match SessionRecord::from_json(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed session record");
                None
            }
        }
    }

    /// Replace the session with `record` in both the slot and the cookie.
    ///
    /// The cookie is only updated once the slot write succeeded, so the two
    /// copies never disagree.
    pub fn set(&self, record: &SessionRecord) {
        let json = match record.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Session record serialization failed");
                return;
            }
        };

        if let Err(e) = self.slot.set_item(SESSION_SLOT_KEY, &json) {
            tracing::warn!(error = %e, user_id = %record.user_id, "Session slot write failed");
            return;
        }

        self.replace_cookie(cookies::session_cookie(&json, self.secure_cookies));
        tracing::debug!(user_id = %record.user_id, role = %record.role, "Session stored");
    }

    /// Delete the session: remove the slot entry and expire the cookie.
    ///
    /// If the slot refuses the removal it is blanked instead, which reads
    /// as no session. The cookie is only expired once the slot no longer
    /// yields a record, so the two copies never disagree. Idempotent.
    pub fn clear(&self) {
        if let Err(e) = self.slot.remove_item(SESSION_SLOT_KEY) {
            tracing::warn!(error = %e, "Session slot removal failed, blanking it");
            if let Err(e) = self.slot.set_item(SESSION_SLOT_KEY, "") {
                tracing::warn!(error = %e, "Session slot blanking failed");
            }
        }

        if let Some(record) = self.get() {
            tracing::warn!(user_id = %record.user_id, "Session still stored, keeping cookie");
            return;
        }
        self.replace_cookie(cookies::clear_session_cookie());
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.get().is_some_and(|record| record.role == role)
    }

    /// The mirrored cookie as it should be sent with the next response,
    /// including a removal cookie after [`clear`](Self::clear).
    #[must_use]
    pub fn cookie(&self) -> Option<Cookie<'static>> {
        self.cookies.lock().get(SESSION_COOKIE_NAME).cloned()
    }

    /// Raw value of the live session cookie, as the route guard sees it.
    #[must_use]
    pub fn cookie_value(&self) -> Option<String> {
        self.cookie()
            .filter(cookies::is_live)
            .map(|cookie| cookie.value().to_owned())
    }

    #[must_use]
    pub fn slot(&self) -> &S {
        &self.slot
    }

    fn replace_cookie(&self, cookie: Cookie<'static>) {
        let mut jar = self.cookies.lock();
        *jar = jar.clone().add(cookie);
    }
}

/// Where API calls find the caller's identity.
pub trait SessionSource: Send + Sync + 'static {
    fn current(&self) -> Option<SessionRecord>;
}

impl<S: SessionSlot> SessionSource for SessionStore<S> {
    fn current(&self) -> Option<SessionRecord> {
        self.get()
    }
}

/// A fixed identity, e.g. the record decoded from a request cookie.
impl SessionSource for SessionRecord {
    fn current(&self) -> Option<SessionRecord> {
        Some(self.clone())
    }
}

impl<T: SessionSource + ?Sized> SessionSource for Arc<T> {
    fn current(&self) -> Option<SessionRecord> {
        (**self).current()
    }
}

/// No identity. User-scoped calls fail with "not authenticated".
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl SessionSource for Anonymous {
    fn current(&self) -> Option<SessionRecord> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use proptest::prelude::*;

    use super::*;
    use crate::cookies::decode_session;
    use crate::error::Error;

    fn faculty() -> SessionRecord {
        SessionRecord::new(42, "A", "a@x.com", Role::Faculty)
    }

    fn store() -> SessionStore<MemorySlot> {
        SessionStore::new(MemorySlot::new())
    }

    struct BrokenSlot;

    impl SessionSlot for BrokenSlot {
        fn get_item(&self, _key: &str) -> Result<Option<String>, Error> {
            Err(Error::Storage(std::io::Error::other("disk gone")))
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::Storage(std::io::Error::other("disk gone")))
        }
        fn remove_item(&self, _key: &str) -> Result<(), Error> {
            Err(Error::Storage(std::io::Error::other("disk gone")))
        }
    }

    #[test]
    fn empty_store_has_no_session() {
        let store = store();
        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());
        assert!(!store.has_role(Role::Student));
        assert_eq!(store.cookie_value(), None);
    }

    #[test]
    fn set_then_get_returns_record() {
        let store = store();
        store.set(&faculty());
        assert_eq!(store.get(), Some(faculty()));
        assert!(store.is_authenticated());
        assert!(store.has_role(Role::Faculty));
        assert!(!store.has_role(Role::Admin));
    }

    #[test]
    fn last_write_wins() {
        let store = store();
        store.set(&faculty());
        let admin = SessionRecord::new(1, "Root", "root@x.com", Role::Admin);
        store.set(&admin);
        assert_eq!(store.get(), Some(admin.clone()));
        assert_eq!(decode_session(&store.cookie_value().unwrap()), Some(admin));
    }

    #[test]
    fn slot_and_cookie_hold_identical_json() {
        let store = store();
        store.set(&faculty());
        let slot_json = store.slot().get_item(SESSION_SLOT_KEY).unwrap().unwrap();
        let cookie_json = urlencoding::decode(&store.cookie_value().unwrap())
            .unwrap()
            .into_owned();
        assert_eq!(slot_json, cookie_json);
    }

    #[test]
    fn clear_is_idempotent() {
        let store = store();
        store.set(&faculty());
        store.clear();
        assert_eq!(store.get(), None);
        store.clear();
        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clear_expires_cookie() {
        let store = store();
        store.set(&faculty());
        store.clear();
        let cookie = store.cookie().unwrap();
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        assert!(cookie.value().is_empty());
        assert_eq!(store.cookie_value(), None);
    }

    #[test]
    fn malformed_value_reads_as_absent_and_stays() {
        let store = store();
        store.slot().set_item(SESSION_SLOT_KEY, "{not json").unwrap();
        assert_eq!(store.get(), None);
        assert!(!store.is_authenticated());
        assert_eq!(
            store.slot().get_item(SESSION_SLOT_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn unknown_role_reads_as_absent() {
        let store = store();
        store
            .slot()
            .set_item(SESSION_SLOT_KEY, r#"{"user_id":3,"role":"teacher"}"#)
            .unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn storage_failures_are_swallowed() {
        let store = SessionStore::new(BrokenSlot);
        store.set(&faculty());
        assert_eq!(store.get(), None);
        assert_eq!(store.cookie_value(), None);
        store.clear();
        assert!(!store.is_authenticated());
    }

    /// Memory slot whose removals always fail; writes can be switched off.
    #[derive(Default)]
    struct StuckSlot {
        inner: MemorySlot,
        read_only: AtomicBool,
    }

    impl SessionSlot for StuckSlot {
        fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
            self.inner.get_item(key)
        }
        fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
            if self.read_only.load(Ordering::SeqCst) {
                return Err(Error::Storage(std::io::Error::other("read-only")));
            }
            self.inner.set_item(key, value)
        }
        fn remove_item(&self, _key: &str) -> Result<(), Error> {
            Err(Error::Storage(std::io::Error::other("locked")))
        }
    }

    #[test]
    fn failed_removal_still_signs_out() {
        let store = SessionStore::new(StuckSlot::default());
        store.set(&faculty());
        store.clear();

        assert_eq!(store.get(), None);
        assert!(!store.has_role(Role::Faculty));
        assert_eq!(store.cookie_value(), None);
    }

    #[test]
    fn undeletable_session_keeps_cookie_in_step() {
        let store = SessionStore::new(StuckSlot::default());
        store.set(&faculty());
        store.slot().read_only.store(true, Ordering::SeqCst);
        store.clear();

        assert_eq!(store.get(), Some(faculty()));
        assert_eq!(decode_session(&store.cookie_value().unwrap()), Some(faculty()));
    }

    #[test]
    fn file_backed_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        SessionStore::new(FileSlot::new(dir.path())).set(&faculty());

        let reopened = SessionStore::new(FileSlot::new(dir.path()));
        assert_eq!(reopened.get(), Some(faculty()));
    }

    #[test]
    fn session_sources() {
        assert_eq!(Anonymous.current(), None);
        assert_eq!(faculty().current(), Some(faculty()));

        let shared = Arc::new(store());
        shared.set(&faculty());
        let source: Arc<dyn SessionSource> = shared.clone();
        assert_eq!(source.current(), Some(faculty()));
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::Student), Just(Role::Faculty), Just(Role::Admin)]
    }

    proptest! {
        #[test]
        fn any_record_round_trips(
            user_id in any::<i64>(),
            name in ".*",
            email in ".*",
            role in any_role(),
        ) {
            let store = store();
            let record = SessionRecord::new(user_id, name, email, role);
            store.set(&record);
            prop_assert_eq!(store.get(), Some(record.clone()));
            prop_assert_eq!(decode_session(&store.cookie_value().unwrap()), Some(record));
        }

        #[test]
        fn arbitrary_slot_text_never_panics(raw in ".*") {
            let store = store();
            store.slot().set_item(SESSION_SLOT_KEY, &raw).unwrap();
            let _ = store.get();
        }
    }
}
