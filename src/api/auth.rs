use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::types::{Role, SessionRecord};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewAccount {
    fn validate(&self) -> Result<(), ApiError> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Name is required".into()));
        }
        if !self.email.contains('@') {
            return Err(ApiError::Validation("A valid email is required".into()));
        }
        if self.password.is_empty() {
            return Err(ApiError::Validation("Password is required".into()));
        }
        Ok(())
    }
}

/// The backend returns the identity either bare or under `user`.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdentityPayload {
    Wrapped { user: SessionRecord },
    Bare(SessionRecord),
}

impl From<IdentityPayload> for SessionRecord {
    fn from(payload: IdentityPayload) -> Self {
        match payload {
            IdentityPayload::Wrapped { user } | IdentityPayload::Bare(user) => user,
        }
    }
}

impl ApiClient {
    /// Authenticate and return the identity to store as the session.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for empty credentials,
    /// [`ApiError::Unauthorized`] for a wrong email/password pair, or any
    /// transport error.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionRecord, ApiError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::Validation(
                "Email and password are required".into(),
            ));
        }
        let request = self
            .request(Method::POST, "/login")?
            .json(&Credentials { email: email.trim(), password });
        let identity: IdentityPayload = self.send(request, "login").await?;
        let record = SessionRecord::from(identity);
        tracing::info!(user_id = %record.user_id, role = %record.role, "Signed in");
        Ok(record)
    }

    /// Create an account and return its identity.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] for an incomplete form,
    /// [`ApiError::Conflict`] or [`ApiError::Validation`] when the backend
    /// rejects the email, or any transport error.
    pub async fn register(&self, account: &NewAccount) -> Result<SessionRecord, ApiError> {
        account.validate()?;
        let request = self.request(Method::POST, "/register")?.json(account);
        let identity: IdentityPayload = self.send(request, "register").await?;
        let record = SessionRecord::from(identity);
        tracing::info!(user_id = %record.user_id, role = %record.role, "Registered");
        Ok(record)
    }
}
