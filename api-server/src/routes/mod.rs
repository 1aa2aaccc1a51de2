mod answerer;
mod health;
mod verifier;

use crate::config::Settings;
use crate::state::AppState;
use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// All endpoints, mounted under `/api`.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(health::router())
        .merge(verifier::router())
        .merge(answerer::router());
    Router::new().nest("/api", api).with_state(state)
}

/// [`api_router`] with CORS and request tracing.
pub fn app(state: AppState, settings: &Settings) -> Router {
    api_router(state)
        .layer(cors_layer(&settings.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // Credentials rule out wildcards, so methods and headers are mirrored.
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
