//! HTTP front end
//!
//! Routes:
//! - `GET /?host=&port=&token=` probes one target
//! - `POST /batch?token=` probes every `host[:port]` line of the body
//! - `GET /health` liveness check, no auth

mod auth;
mod error;
mod handlers;
mod router;


pub use router::build_router;

use crate::error::{AppError, Result};
use crate::executor::{BatchCoordinator, ProbeAggregator};
use crate::logging::{ErrorEventLogger, LoggerFactory, ProbeLogger};
use crate::models::Config;
use std::sync::Arc;
use tokio::net::TcpListener;

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    aggregator: ProbeAggregator,
    batch: BatchCoordinator,
    token: Option<Arc<str>>,
    probe_logger: ProbeLogger,
    error_logger: ErrorEventLogger,
}

impl AppState {
    pub fn new(aggregator: ProbeAggregator, config: &Config, loggers: &LoggerFactory) -> Self {
        let probe_logger = loggers.create_probe_logger();
        Self {
            batch: BatchCoordinator::new(aggregator.clone()).with_logger(probe_logger.clone()),
            aggregator: aggregator.with_logger(probe_logger.clone()),
            token: config.token().map(Arc::from),
            probe_logger,
            error_logger: loggers.create_error_logger(),
        }
    }
}

/// Serve requests on `listener` until ctrl-c
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::network(format!("HTTP server failed: {}", e)))
}

async fn shutdown_signal() {
    // Without a signal handler the server simply runs until killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
