pub mod config;
pub mod error;
pub mod handlers;
pub mod roast;
pub mod spotify;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers::{router, AppState};
use crate::roast::Roaster;
use crate::spotify::SpotifyClient;

/// Full application: API routes, the static client as fallback, CORS and tracing.
pub fn app(config: &Config) -> Router {
    let state = AppState {
        spotify: SpotifyClient::new(config),
        roaster: Roaster::new(config),
        client_landing_url: config.client_landing_url.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router()
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
