//! Probe execution engine
//!
//! This module contains the concurrent core of the server:
//! - A fixed worker pool that performs dial attempts with bounded concurrency
//! - The per-target aggregator that fans attempts out and reduces them
//! - The batch coordinator that probes many targets in parallel

pub mod aggregator;
pub mod batch;
pub mod pool;

pub use aggregator::ProbeAggregator;
pub use batch::BatchCoordinator;
pub use pool::{ProbeJob, WorkerPool};

use crate::error::{AppError, Result};
use crate::models::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Execution parameters shared by the pool and the aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Number of pool workers, and so the maximum of concurrent dials
    pub worker_count: usize,
    /// Dial attempts per probed target
    pub attempts_per_probe: u32,
    /// Timeout for a single dial
    pub dial_timeout: Duration,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            worker_count: crate::defaults::DEFAULT_WORKER_COUNT as usize,
            attempts_per_probe: crate::defaults::DEFAULT_ATTEMPTS,
            dial_timeout: crate::defaults::DEFAULT_DIAL_TIMEOUT,
        }
    }
}

impl ExecutionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.worker_count == 0 {
            return Err(AppError::config("Worker count must be greater than 0"));
        }
        if self.attempts_per_probe == 0 {
            return Err(AppError::config("Attempts per probe must be greater than 0"));
        }
        if self.dial_timeout.is_zero() {
            return Err(AppError::config("Dial timeout must be greater than 0"));
        }
        Ok(())
    }
}

impl From<&Config> for ExecutionConfig {
    fn from(config: &Config) -> Self {
        Self {
            worker_count: config.worker_count as usize,
            attempts_per_probe: config.attempts,
            dial_timeout: config.dial_timeout(),
        }
    }
}

#[cfg(test)]
mod comprehensive_tests;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_config_from_config() {
        let config = Config {
            attempts: 7,
            worker_count: 3,
            timeout_ms: 150,
            ..Default::default()
        };

        let exec_config = ExecutionConfig::from(&config);
        assert_eq!(exec_config.worker_count, 3);
        assert_eq!(exec_config.attempts_per_probe, 7);
        assert_eq!(exec_config.dial_timeout, Duration::from_millis(150));
        assert!(exec_config.validate().is_ok());
    }

    #[test]
    fn test_execution_config_defaults() {
        let exec_config = ExecutionConfig::default();
        assert_eq!(exec_config.worker_count, 32);
        assert_eq!(exec_config.attempts_per_probe, 5);
        assert_eq!(exec_config.dial_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_execution_config_validation() {
        let zero_workers = ExecutionConfig { worker_count: 0, ..Default::default() };
        assert!(zero_workers.validate().is_err());

        let zero_attempts = ExecutionConfig { attempts_per_probe: 0, ..Default::default() };
        assert!(zero_attempts.validate().is_err());

        let zero_timeout = ExecutionConfig { dial_timeout: Duration::ZERO, ..Default::default() };
        assert!(zero_timeout.validate().is_err());
    }
}
