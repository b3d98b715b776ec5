//! Batch probing of many targets in parallel

use crate::executor::ProbeAggregator;
use crate::logging::ProbeLogger;
use crate::models::{parse_batch, ProbeSummary, ProbeTarget};
use futures::future::join_all;
use std::time::Instant;

/// Probes a list of targets concurrently, one task per target
///
/// Every target's attempts still go through the shared pool, so the batch
/// never dials more than `worker_count` connections at once.
#[derive(Clone)]
pub struct BatchCoordinator {
    aggregator: ProbeAggregator,
    logger: Option<ProbeLogger>,
}

impl BatchCoordinator {
    pub fn new(aggregator: ProbeAggregator) -> Self {
        Self {
            aggregator,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: ProbeLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Probe every target and return one summary per target, in input order
    pub async fn probe_batch(&self, targets: Vec<ProbeTarget>) -> Vec<ProbeSummary> {
        self.probe_batch_traced(targets, None).await
    }

    /// Parse a newline-delimited body and probe the well-formed lines
    pub async fn probe_body(&self, body: &str, correlation_id: Option<&str>) -> Vec<ProbeSummary> {
        self.probe_batch_traced(parse_batch(body), correlation_id).await
    }

    async fn probe_batch_traced(
        &self,
        targets: Vec<ProbeTarget>,
        correlation_id: Option<&str>,
    ) -> Vec<ProbeSummary> {
        let start = Instant::now();
        let count = targets.len();

        let tasks = targets.iter().cloned().map(|target| {
            let aggregator = self.aggregator.clone();
            tokio::spawn(async move { aggregator.probe(&target).await })
        });
        let joined = join_all(tasks).await;

        let mut summaries = Vec::with_capacity(count);
        for (result, target) in joined.into_iter().zip(targets) {
            match result {
                Ok(summary) => summaries.push(summary),
                Err(e) => {
                    if let Some(logger) = &self.logger {
                        logger.log_task_failure(&target, &e.to_string()).await;
                    }
                    summaries.push(ProbeSummary::unreachable(target));
                }
            }
        }

        if let Some(logger) = &self.logger {
            let reachable = summaries.iter().filter(|s| s.success).count();
            logger
                .log_batch_summary(correlation_id, count, reachable, start.elapsed())
                .await;
        }

        summaries
    }
}
