//! Error taxonomy for the relay.
//!
//! Every failure a handler can produce is one of four cases, and each case
//! is mapped to HTTP exactly once in the [`IntoResponse`] impl below. The
//! handlers themselves only ever construct variants and return early with
//! `?`; no handler writes status codes or error bodies directly.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Missing or malformed client input, e.g. no `code` on the callback.
    #[error("{0}")]
    BadRequest(String),

    /// No usable token on an endpoint meant for programmatic callers.
    #[error("{0}")]
    Unauthorized(String),

    /// No usable token on an interactive endpoint; the browser is sent to
    /// the login flow instead of receiving a JSON error.
    #[error("authentication required")]
    LoginRedirect,

    /// Any failure from the Spotify Web API or its token endpoint. The
    /// diagnostic detail is only populated when the relay runs with debug
    /// errors enabled.
    #[error("{message}")]
    Upstream {
        message: String,
        details: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    /// Builds an upstream failure, attaching the diagnostic detail only
    /// when `debug_errors` is set.
    pub fn upstream(message: impl Into<String>, detail: impl Into<String>, debug_errors: bool) -> Self {
        RelayError::Upstream {
            message: message.into(),
            details: debug_errors.then(|| detail.into()),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::BadRequest(message) => {
                tracing::debug!(message = %message, "Bad request");
                let body = Json(json!({ "error": message }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            RelayError::Unauthorized(message) => {
                tracing::debug!(message = %message, "Unauthorized");
                let body = Json(json!({ "error": message }));
                (StatusCode::UNAUTHORIZED, body).into_response()
            }
            RelayError::LoginRedirect => {
                // 302 exactly; axum's Redirect helpers emit 303/307.
                tracing::debug!("Redirecting unauthenticated request to /login");
                (StatusCode::FOUND, [(header::LOCATION, "/login")]).into_response()
            }
            RelayError::Upstream { message, details } => {
                tracing::error!(message = %message, details = ?details, "Upstream failure");
                let body = match details {
                    Some(details) => json!({ "error": message, "details": details }),
                    None => json!({ "error": message }),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
