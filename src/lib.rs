//! TCPing Server
//!
//! An HTTP service that measures TCP reachability of `host:port` targets by
//! repeatedly timing connection handshakes through a bounded worker pool, and
//! reports success, average connect latency and loss for single targets or
//! whole batches.

pub mod app;
pub mod cli;
pub mod config;
pub mod dialer;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod server;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use models::{Config, ProbeOutcome, ProbeSummary, ProbeTarget};
pub use dialer::{Dialer, TcpDialer};
pub use executor::{BatchCoordinator, ExecutionConfig, ProbeAggregator, WorkerPool};
pub use stats::ProbeStatistics;
pub use output::PingResult;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build metadata exported by `build.rs`
pub const BUILD_TIME: &str = env!("BUILD_TIME");
pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";
    pub const DEFAULT_LISTEN_PORT: u32 = 8080;
    pub const DEFAULT_ATTEMPTS: u32 = 5;
    pub const DEFAULT_WORKER_COUNT: u32 = 32;
    pub const DEFAULT_DIAL_TIMEOUT: Duration = Duration::from_millis(2000);
    pub const DEFAULT_TARGET_PORT: u16 = 80;
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    /// Largest accepted `/batch` request body
    pub const MAX_BATCH_BODY_BYTES: usize = 1024 * 1024;
}
