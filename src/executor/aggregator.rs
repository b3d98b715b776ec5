//! Per-target probing: fan attempts out to the pool, reduce the outcomes

use crate::executor::{ExecutionConfig, WorkerPool};
use crate::logging::ProbeLogger;
use crate::models::{ProbeSummary, ProbeTarget};
use crate::stats::ProbeStatistics;
use std::time::Instant;
use tokio::sync::mpsc;

/// Runs the configured number of attempts against one target
#[derive(Clone)]
pub struct ProbeAggregator {
    pool: WorkerPool,
    attempts: u32,
    logger: Option<ProbeLogger>,
}

impl ProbeAggregator {
    pub fn new(pool: WorkerPool, config: &ExecutionConfig) -> Self {
        Self {
            pool,
            attempts: config.attempts_per_probe,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: ProbeLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Probe `target` and summarize its attempts.
    ///
    /// Each attempt is submitted to the pool independently. Outcomes are
    /// gathered in whatever order they finish; an attempt the pool could not
    /// take counts as a failure.
    pub async fn probe(&self, target: &ProbeTarget) -> ProbeSummary {
        let start = Instant::now();

        // Room for every outcome, so workers never wait on this probe
        let (reply, mut outcomes) = mpsc::channel(self.attempts.max(1) as usize);

        for _ in 0..self.attempts {
            if self.pool.submit(target.clone(), reply.clone()).await.is_err() {
                break;
            }
        }
        drop(reply);

        let mut stats = ProbeStatistics::new();
        while let Some(outcome) = outcomes.recv().await {
            stats.record(&outcome);
        }
        for _ in stats.attempts..self.attempts {
            stats.record_missing();
        }

        if let Some(logger) = &self.logger {
            logger.log_probe(target, &stats, start.elapsed()).await;
        }

        stats.into_summary(target.clone())
    }
}
