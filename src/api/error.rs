use reqwest::StatusCode;

/// Failure of a backend call, phrased for the person using the app.
///
/// Every variant displays as a message that can be shown as-is in a toast
/// or an inline error panel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// No session record when the call needs one. Sign in again.
    #[error("You are not signed in. Please sign in and try again.")]
    NotAuthenticated,

    /// 400 / 422, or a form rejected before sending.
    #[error("{0}")]
    Validation(String),

    /// 401
    #[error("{0}")]
    Unauthorized(String),

    /// 403, or a role-gated call made with the wrong role.
    #[error("{0}")]
    Forbidden(String),

    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 409
    #[error("{0}")]
    Conflict(String),

    /// 5xx. The backend's own message is logged, not shown.
    #[error("Server error, please try again later.")]
    Server { status: u16 },

    /// The backend could not be reached.
    #[error("Unable to reach the server. Please check your connection and try again.")]
    Connection,

    /// The backend answered with a body we could not read.
    #[error("Unexpected response from the server: {0}")]
    Decode(String),

    /// The request could not be built (bad base URL, bad path).
    #[error("Invalid request: {0}")]
    Request(String),

    /// Any other status.
    #[error("Request failed ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

impl ApiError {
    /// Map a non-success status and its body to an error.
    ///
    /// A message supplied by the backend (`error`, `message` or `detail`
    /// JSON field, or short plain text) wins over the default wording,
    /// except for 5xx.
    #[must_use]
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = backend_message(body);
        let or_default = |default: &str| message.clone().unwrap_or_else(|| default.to_owned());

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(
                or_default("Please check the submitted information and try again."),
            ),
            StatusCode::UNAUTHORIZED => Self::Unauthorized(or_default(
                "Invalid credentials. Please check your email and password.",
            )),
            StatusCode::FORBIDDEN => Self::Forbidden(or_default(
                "You do not have permission to perform this action.",
            )),
            StatusCode::NOT_FOUND => {
                Self::NotFound(or_default("The requested resource was not found."))
            }
            StatusCode::CONFLICT => {
                Self::Conflict(or_default("This record already exists."))
            }
            s if s.is_server_error() => Self::Server { status: s.as_u16() },
            s => Self::Unexpected {
                status: s.as_u16(),
                message: or_default(s.canonical_reason().unwrap_or("Unknown status")),
            },
        }
    }

    /// Whether offering "Try again" makes sense.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Server { .. } | Self::Connection)
    }
}

impl From<crate::error::Error> for ApiError {
    fn from(e: crate::error::Error) -> Self {
        match e {
            crate::error::Error::Validation(msg) => Self::Validation(msg),
            other => Self::Decode(other.to_string()),
        }
    }
}

/// Extract a human-readable message from an error body.
fn backend_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return ["error", "message", "detail"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
            .map(str::trim)
            .filter(|msg| !msg.is_empty())
            .map(str::to_owned);
    }

    // Plain text is shown; HTML error pages are not.
    (!trimmed.starts_with('<') && trimmed.len() <= 300).then(|| trimmed.to_owned())
}
