use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::defaults::MAX_BATCH_BODY_BYTES;
use crate::server::{handlers, AppState};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::probe_single))
        .route("/batch", post(handlers::probe_batch))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(MAX_BATCH_BODY_BYTES))
        .with_state(state)
}
