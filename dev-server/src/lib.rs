//! Local development server for the web front end: serves the built bundle
//! with history-mode fallback and forwards the API prefix to the backend.

pub mod config;
pub mod proxy;

use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::Router;
use factgraph_core::ProxyRule;
use std::convert::Infallible;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use config::DevSettings;

#[derive(Clone)]
pub struct DevState {
    pub rule: Arc<ProxyRule>,
    pub client: reqwest::Client,
    static_files: ServeDir<ServeFile>,
}

impl DevState {
    pub fn new(rule: ProxyRule, dist_dir: &Path) -> Result<Self, reqwest::Error> {
        // Unknown paths get index.html so client-side routes survive a reload.
        let static_files =
            ServeDir::new(dist_dir).fallback(ServeFile::new(dist_dir.join("index.html")));
        // The target is a local process; ignore any system HTTP proxy.
        let client = reqwest::Client::builder().no_proxy().build()?;
        Ok(Self {
            rule: Arc::new(rule),
            client,
            static_files,
        })
    }
}

pub fn app(state: DevState) -> Router {
    Router::new()
        .fallback(dispatch)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn dispatch(State(state): State<DevState>, req: Request) -> Response {
    if state.rule.matches(req.uri().path()) {
        return match proxy::forward(&state, req).await {
            Ok(res) => res,
            Err(err) => err.into_response(),
        };
    }
    let res: Result<_, Infallible> = state.static_files.clone().oneshot(req).await;
    match res {
        Ok(res) => res.into_response(),
        Err(never) => match never {},
    }
}
