use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failure talking to Spotify or the generation API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} API error {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("{service} response malformed: {reason}")]
    Malformed {
        service: &'static str,
        reason: String,
    },
}

impl UpstreamError {
    /// Short description that is safe to hand back to callers: no bodies, no credentials.
    pub fn summary(&self) -> String {
        match self {
            UpstreamError::Transport { service, .. } => format!("could not reach {}", service),
            UpstreamError::Status { service, status, .. } => {
                format!("{} rejected the request ({})", service, status)
            }
            UpstreamError::Malformed { service, reason } => {
                format!("{} returned an unusable response: {}", service, reason)
            }
        }
    }

    /// Checks the status, keeping the body for logs on failure.
    pub(crate) async fn check(
        service: &'static str,
        res: reqwest::Response,
    ) -> Result<reqwest::Response, UpstreamError> {
        if res.status().is_success() {
            return Ok(res);
        }
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        Err(UpstreamError::Status { service, status, body })
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    MissingCode,
    MissingToken,
    Login(UpstreamError),
    TopArtists(UpstreamError),
    Roast(UpstreamError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::MissingCode => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "missing authorization code" }),
            ),
            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "missing access token" }),
            ),
            AppError::Login(e) => {
                tracing::error!("error getting access token: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "failed to log in" }),
                )
            }
            AppError::TopArtists(e) => {
                tracing::error!("error fetching top artists: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "failed to fetch top artists" }),
                )
            }
            AppError::Roast(e) => {
                tracing::error!("error generating roast: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "failed to generate roast", "details": e.summary() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
