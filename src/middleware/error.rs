use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::ApiError;

/// Errors surfaced by the web layer.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// No valid `user` cookie on a request that needs one.
    #[error("Not authenticated")]
    Unauthenticated,

    /// A backend call failed. Its message is shown to the user.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session record could not be encoded.
    #[error("Session error: {0}")]
    Session(#[from] crate::error::Error),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WebError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Api(e) => match e {
                ApiError::NotAuthenticated | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
                ApiError::NotFound(_) => StatusCode::NOT_FOUND,
                ApiError::Conflict(_) => StatusCode::CONFLICT,
                ApiError::Connection => StatusCode::SERVICE_UNAVAILABLE,
                ApiError::Request(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_GATEWAY,
            },
            Self::Session(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Web internal error");
            "Internal error".to_owned()
        } else {
            self.to_string()
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_their_message() {
        let err = WebError::from(ApiError::Conflict("Email already registered".into()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn backend_outages_are_gateway_errors() {
        assert_eq!(WebError::from(ApiError::Connection).status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            WebError::from(ApiError::Server { status: 500 }).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = WebError::Config("secret detail".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
