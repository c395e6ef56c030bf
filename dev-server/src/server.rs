use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::any;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::DevServerConfig;
use crate::proxy::{forward, ProxyError};

/// Shared state for the dev server's handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Backend origin without a trailing slash
    pub target: String,
    /// Normalized path prefixes forwarded to `target`
    pub prefixes: Vec<String>,
    /// Built client bundle
    pub dist: PathBuf,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn from_config(config: &DevServerConfig) -> Result<Self, ProxyError> {
        Ok(Self {
            target: config.target_origin()?,
            prefixes: config.prefixes()?,
            dist: config.dist.clone(),
            client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()?,
        })
    }
}

/// Proxy routes for every prefix, the client bundle for everything else.
///
/// Unknown paths fall back to `index.html` so client-side routes survive a reload.
pub fn build_app(state: Arc<AppState>) -> Router {
    let index = state.dist.join("index.html");
    let bundle = ServeDir::new(&state.dist).fallback(ServeFile::new(index));

    let mut router = Router::new();
    for prefix in &state.prefixes {
        router = router
            .route(prefix, any(forward))
            .route(&format!("{prefix}/{{*rest}}"), any(forward));
    }

    router
        .fallback_service(bundle)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
