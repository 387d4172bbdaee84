//! HTTP handlers for the roast API.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::roast::Roaster;
use crate::spotify::SpotifyClient;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub spotify: SpotifyClient,
    pub roaster: Roaster,
    pub client_landing_url: String,
}

/// Query parameters for the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// Query parameters for endpoints acting on behalf of the user.
#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub access_token: Option<String>,
}

impl TokenQuery {
    fn token(&self) -> Result<&str, AppError> {
        present(&self.access_token).ok_or(AppError::MissingToken)
    }
}

#[derive(Debug, Serialize)]
pub struct RoastResponse {
    pub roast: String,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// axum's Redirect has no 302 constructor.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn landing_location(landing_url: &str, access_token: &str) -> String {
    let sep = if landing_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}access_token={}",
        landing_url,
        sep,
        urlencoding::encode(access_token)
    )
}

/// GET /health - Health check.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /login - Send the browser to Spotify's consent page.
pub async fn login(State(state): State<AppState>) -> Response {
    found(&state.spotify.authorize_url())
}

/// GET /callback - Exchange the code and hand the token to the browser.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackQuery>,
) -> Result<Response, AppError> {
    let code = present(&params.code).ok_or(AppError::MissingCode)?;

    let token = state
        .spotify
        .exchange_code(code)
        .await
        .map_err(AppError::Login)?;

    tracing::info!("authorization code exchanged");
    Ok(found(&landing_location(&state.client_landing_url, &token)))
}

/// GET /top-artists - Names of the user's top five artists.
pub async fn top_artists(
    State(state): State<AppState>,
    Query(params): Query<TokenQuery>,
) -> Result<impl IntoResponse, AppError> {
    let token = params.token()?;

    let artists = state
        .spotify
        .top_artists(token)
        .await
        .map_err(AppError::TopArtists)?;

    Ok(Json(artists))
}

/// GET /roast - Roast the user's top artists.
pub async fn roast(
    State(state): State<AppState>,
    Query(params): Query<TokenQuery>,
) -> Result<impl IntoResponse, AppError> {
    let token = params.token()?;

    let artists = state
        .spotify
        .top_artists(token)
        .await
        .map_err(AppError::Roast)?;

    let roast = state.roaster.roast(&artists).await.map_err(AppError::Roast)?;

    Ok(Json(RoastResponse { roast }))
}

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/login", get(login))
        .route("/callback", get(callback))
        .route("/top-artists", get(top_artists))
        .route("/roast", get(roast))
}
