use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Backend-issued user identifier.
///
/// Sent on every user-scoped request as the `X-User_ID` header.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    FromStr, From, Into,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// ClassMaster role, fixed at registration.
///
/// Closed set: an unrecognized role string fails to deserialize, so a stored
/// record carrying one is treated the same as no record at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Faculty, Role::Admin];

    /// Path segment owning this role's pages (`student`, `faculty`, `admin`).
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }

    /// Where a signed-in user of this role lands.
    ///
    /// `Admin` points one level below its root; every other role lands on
    /// its root.
    #[must_use]
    pub fn dashboard(self) -> &'static str {
        match self {
            Self::Student => "/student",
            Self::Faculty => "/faculty",
            Self::Admin => "/admin/dashboard",
        }
    }

    /// Parse a path segment into the role that owns it.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.segment() == segment)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.segment())
    }
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_segment(s).ok_or_else(|| Error::InvalidRole(s.to_owned()))
    }
}

/// Identity of whoever is using this client.
///
/// Only `user_id` and `role` are required; `name` and `email` fall back to
/// empty strings. The record is replaced wholesale on sign-in and deleted on
/// sign-out, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
}

impl SessionRecord {
    #[must_use]
    pub fn new(user_id: i64, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: UserId(user_id),
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Parse the JSON form shared by the storage slot and the cookie.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the value is not JSON, lacks `user_id` or
    /// `role`, or names an unknown role.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        serde_json::from_str(raw).map_err(Error::from)
    }

    /// Serialize to the JSON form written to the storage slot and the cookie.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(Error::from)
    }
}
