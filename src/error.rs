use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified error type for the relay's HTTP surface.
///
/// Every failure a handler can hit maps onto one of these kinds. The
/// `IntoResponse` impl converts them into a generic JSON body; the inner
/// detail strings travel server-side only, as an [`ErrorCause`] response
/// extension the request log middleware picks up together with the matched
/// endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("No stored credential for user {0}")]
    NoCredential(String),

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Upstream request failed: {0}")]
    UpstreamRequestFailed(String),

    #[error("Authorization exchange failed: {0}")]
    AuthExchangeFailed(String),

    #[error("Credential store error: {0}")]
    Store(String),
}

/// Failure detail attached to error responses for the request log.
///
/// Response extensions never reach the wire, so the cause stays out of the
/// body while the logging middleware in `server` can still pair it with the
/// endpoint that produced it.
#[derive(Debug, Clone)]
pub struct ErrorCause(pub String);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::InvalidParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Generic caller-facing message. Upstream and storage internals stay
    /// out of the response body.
    fn public_message(&self) -> &'static str {
        match self {
            ApiError::MissingParameter(name) | ApiError::InvalidParameter(name) => name,
            ApiError::NoCredential(_) | ApiError::RefreshFailed(_) => "Failed to fetch profile",
            ApiError::UpstreamRequestFailed(_) => "Failed to fetch profile",
            ApiError::AuthExchangeFailed(_) => "Failed to get access token",
            ApiError::Store(_) => "Failed to fetch profile",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let cause = self.to_string();

        let body = match self {
            ApiError::MissingParameter(name) => {
                json!({ "error": format!("Missing required parameter: {name}") })
            }
            ApiError::InvalidParameter(name) => {
                json!({ "error": format!("Invalid value for parameter: {name}") })
            }
            ref other => json!({ "error": other.public_message() }),
        };

        let mut response = (self.status(), axum::Json(body)).into_response();
        response.extensions_mut().insert(ErrorCause(cause));
        response
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::UpstreamRequestFailed(e.to_string())
    }
}
