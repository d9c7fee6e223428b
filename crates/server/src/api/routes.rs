use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::{handlers, stream};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Static UI files path (configurable via env)
    let assets_dir = std::env::var("RELAYCAST_ASSETS_DIR").unwrap_or_else(|_| "public".to_string());

    // Allow for multipart framing on top of the configured asset ceiling;
    // the per-file ceiling itself is enforced while the upload streams in.
    let body_limit = state.config().upload.max_bytes as usize + 1024 * 1024;

    let api_routes = Router::new()
        .route("/start-stream", post(stream::start_stream))
        .route("/stop-stream", post(stream::stop_stream))
        .route("/status", get(stream::get_status))
        .route("/health", get(handlers::health))
        .with_state(state);

    // Serve the web UI with SPA fallback
    let index_path = format!("{}/index.html", assets_dir);
    let serve_dir = ServeDir::new(&assets_dir).fallback(ServeFile::new(&index_path));

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(serve_dir)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
