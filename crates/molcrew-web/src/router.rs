//! Axum router — maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    annotate::api_annotate,
    crew::{run_crew, run_demo},
    monitor::{api_messages, api_snapshots, monitor_page},
    visualize::api_visualize,
};
use crate::sse::sse_handler;

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",              get(monitor_page))

        // SSE streaming
        .route("/api/events",    get(sse_handler))

        // API endpoints
        .route("/api/run-crew",  post(run_crew))
        .route("/api/demo",      post(run_demo))
        .route("/api/messages",  get(api_messages))
        .route("/api/snapshots", get(api_snapshots))
        .route("/api/annotate",  get(api_annotate))
        .route("/api/visualize", get(api_visualize))

        // Static files
        .nest_service("/static", ServeDir::new("static"))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
