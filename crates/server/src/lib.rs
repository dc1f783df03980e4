pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tcline_media::process::ProcessOptions;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub struct ServerState {
    pub config: ServerConfig,
    pub options: ProcessOptions,
}

pub fn router(config: ServerConfig) -> Router {
    let state = Arc::new(ServerState {
        options: ProcessOptions {
            ffprobe: config.ffprobe.clone(),
        },
        config: config.clone(),
    });

    let mut app = Router::new()
        .route("/process", post(routes::process_upload))
        .route("/health", get(routes::health));

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
