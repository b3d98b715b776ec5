//! Application wiring: configuration to pool to HTTP server

use crate::{
    cli::Cli,
    config::{display_config_summary, load_config, validate_config},
    dialer::{Dialer, TcpDialer},
    error::{AppError, Result},
    executor::{ExecutionConfig, ProbeAggregator, WorkerPool},
    logging::LoggerFactory,
    models::Config,
    output::StartupBanner,
    server::{self, AppState},
};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    loggers: LoggerFactory,
}

impl App {
    /// Build the application from command-line arguments
    pub fn from_cli(cli: Cli) -> Result<Self> {
        Ok(Self::new(load_config(cli)?))
    }

    pub fn new(config: Config) -> Self {
        let loggers = LoggerFactory::new(config.clone());
        Self { config, loggers }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start the worker pool and assemble handler state.
    ///
    /// Must be called inside a tokio runtime.
    pub fn build_state(&self, dialer: Arc<dyn Dialer>) -> Result<AppState> {
        let exec = ExecutionConfig::from(&self.config);

        let pool = WorkerPool::start(&exec, dialer, Some(self.loggers.create_network_logger()))?;
        let aggregator = ProbeAggregator::new(pool, &exec);
        Ok(AppState::new(aggregator, &self.config, &self.loggers))
    }

    /// Bind the configured listen address
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = self.config.listen_addr()?;
        TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::network(format!("Failed to bind {}: {}", addr, e)))
    }

    /// Run the server until ctrl-c
    pub async fn run(self) -> Result<()> {
        let warnings = validate_config(&self.config)?;

        if self.config.debug {
            println!("Configuration Summary:");
            println!("{}", display_config_summary(&self.config));
            println!();
        }

        let logger = self.loggers.create_logger("APP");

        let dialer = TcpDialer::with_logger(self.loggers.create_network_logger());
        let state = self.build_state(Arc::new(dialer))?;
        crate::log_debug!(
            logger,
            "Worker pool started: {} workers, {} attempts per probe",
            self.config.worker_count,
            self.config.attempts
        );
        let listener = self.bind().await?;
        let local_addr = listener.local_addr()?;

        let banner = StartupBanner::new(&self.config, local_addr)
            .with_warnings(warnings.iter().map(|w| w.format(self.config.enable_color)).collect());
        print!("{}", banner.render());
        println!("HTTP server listening at http://{}", local_addr);

        server::serve(listener, state).await?;
        crate::log_info!(logger, "Server on {} shut down", local_addr);
        Ok(())
    }
}
