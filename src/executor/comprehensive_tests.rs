//! Comprehensive tests for the probe execution engine
//!
//! All tests run against in-process dialers so that timing and outcomes are
//! fully controlled.

use super::{BatchCoordinator, ExecutionConfig, ProbeAggregator, WorkerPool};
use crate::dialer::Dialer;
use crate::models::{ProbeOutcome, ProbeTarget};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Replays a fixed sequence of outcomes, one per dial, wrapping around
struct ScriptedDialer {
    script: Vec<Option<f64>>,
    next: AtomicUsize,
}

impl ScriptedDialer {
    fn new(script: &[Option<f64>]) -> Self {
        Self {
            script: script.to_vec(),
            next: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Dialer for ScriptedDialer {
    async fn dial(&self, _target: &ProbeTarget, _timeout: Duration) -> ProbeOutcome {
        let i = self.next.fetch_add(1, Ordering::SeqCst) % self.script.len();
        match self.script[i] {
            Some(ms) => ProbeOutcome::success(ms),
            None => ProbeOutcome::failed(),
        }
    }
}

/// Refuses every connection
struct RefusingDialer;

#[async_trait]
impl Dialer for RefusingDialer {
    async fn dial(&self, _target: &ProbeTarget, _timeout: Duration) -> ProbeOutcome {
        ProbeOutcome::failed()
    }
}

/// Holds each dial open for a while and records peak concurrency
#[derive(Default)]
struct CountingDialer {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

#[async_trait]
impl Dialer for CountingDialer {
    async fn dial(&self, _target: &ProbeTarget, _timeout: Duration) -> ProbeOutcome {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(15)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        ProbeOutcome::success(15.0)
    }
}

fn exec_config(workers: usize, attempts: u32) -> ExecutionConfig {
    ExecutionConfig {
        worker_count: workers,
        attempts_per_probe: attempts,
        dial_timeout: Duration::from_millis(500),
    }
}

fn aggregator(dialer: Arc<dyn Dialer>, workers: usize, attempts: u32) -> ProbeAggregator {
    let config = exec_config(workers, attempts);
    let pool = WorkerPool::start(&config, dialer, None).unwrap();
    ProbeAggregator::new(pool, &config)
}

mod aggregation_tests {
    use super::*;

    #[tokio::test]
    async fn all_attempts_succeed() {
        let dialer = ScriptedDialer::new(&[Some(10.0), Some(12.0), Some(11.0), Some(9.0), Some(13.0)]);
        let aggregator = aggregator(Arc::new(dialer), 4, 5);

        let summary = aggregator.probe(&ProbeTarget::new("example.com", 80)).await;

        assert!(summary.success);
        assert_eq!(summary.average_latency_ms, Some(11.0));
        assert_eq!(summary.loss_percent, Some(0.0));
    }

    #[tokio::test]
    async fn half_the_attempts_fail() {
        let dialer = ScriptedDialer::new(&[Some(20.0), None, Some(30.0), None]);
        let aggregator = aggregator(Arc::new(dialer), 2, 4);

        let summary = aggregator.probe(&ProbeTarget::new("example.com", 443)).await;

        assert!(summary.success);
        assert_eq!(summary.average_latency_ms, Some(25.0));
        assert_eq!(summary.loss_percent, Some(50.0));
    }

    #[tokio::test]
    async fn unreachable_target_has_no_statistics() {
        let aggregator = aggregator(Arc::new(RefusingDialer), 4, 5);

        let summary = aggregator.probe(&ProbeTarget::new("127.0.0.1", 1)).await;

        assert!(!summary.success);
        assert!(summary.average_latency_ms.is_none());
        assert!(summary.loss_percent.is_none());
        assert_eq!(summary.target, ProbeTarget::new("127.0.0.1", 1));
    }

    #[tokio::test]
    async fn repeated_probes_of_stable_target_agree() {
        let aggregator = aggregator(Arc::new(ScriptedDialer::new(&[Some(5.0)])), 3, 5);
        let target = ProbeTarget::new("stable.example", 22);

        let first = aggregator.probe(&target).await;
        let second = aggregator.probe(&target).await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn more_attempts_than_workers_completes() {
        let dialer = Arc::new(CountingDialer::default());
        let aggregator = aggregator(dialer.clone(), 1, 10);

        let summary = tokio::time::timeout(
            Duration::from_secs(5),
            aggregator.probe(&ProbeTarget::new("example.com", 80)),
        )
        .await
        .expect("probe must not deadlock when attempts exceed workers");

        assert!(summary.success);
        assert_eq!(dialer.calls.load(Ordering::SeqCst), 10);
        assert_eq!(dialer.peak.load(Ordering::SeqCst), 1);
    }
}

mod concurrency_tests {
    use super::*;

    #[tokio::test]
    async fn concurrent_dials_never_exceed_workers() {
        let dialer = Arc::new(CountingDialer::default());
        let aggregator = aggregator(dialer.clone(), 3, 4);
        let batch = BatchCoordinator::new(aggregator);

        let targets: Vec<_> = (0..5)
            .map(|i| ProbeTarget::new(format!("host{}.example", i), 80))
            .collect();
        let summaries = batch.probe_batch(targets).await;

        assert_eq!(summaries.len(), 5);
        assert_eq!(dialer.calls.load(Ordering::SeqCst), 20);
        assert!(dialer.peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn parallel_requests_share_the_pool() {
        let dialer = Arc::new(CountingDialer::default());
        let aggregator = aggregator(dialer.clone(), 2, 3);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let aggregator = aggregator.clone();
                tokio::spawn(async move {
                    aggregator.probe(&ProbeTarget::new(format!("h{}", i), 80)).await
                })
            })
            .collect();

        for handle in handles {
            let summary = handle.await.unwrap();
            assert!(summary.success);
            assert_eq!(summary.loss_percent, Some(0.0));
        }

        assert_eq!(dialer.calls.load(Ordering::SeqCst), 24);
        assert!(dialer.peak.load(Ordering::SeqCst) <= 2);
    }
}

mod batch_tests {
    use super::*;

    #[tokio::test]
    async fn malformed_lines_are_skipped() {
        let aggregator = aggregator(Arc::new(ScriptedDialer::new(&[Some(3.0)])), 4, 2);
        let batch = BatchCoordinator::new(aggregator);

        let summaries = batch.probe_body("a.com\nb.com:99999\nc.com:443", None).await;

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].target, ProbeTarget::new("a.com", 80));
        assert_eq!(summaries[1].target, ProbeTarget::new("c.com", 443));
        assert!(summaries.iter().all(|s| s.success));
    }

    #[tokio::test]
    async fn empty_batch_returns_nothing() {
        let aggregator = aggregator(Arc::new(RefusingDialer), 1, 1);
        let batch = BatchCoordinator::new(aggregator);

        assert!(batch.probe_body("", None).await.is_empty());
        assert!(batch.probe_body("\n\n:80\n", None).await.is_empty());
        assert!(batch.probe_batch(Vec::new()).await.is_empty());
    }

    #[tokio::test]
    async fn batch_preserves_input_order() {
        let aggregator = aggregator(Arc::new(CountingDialer::default()), 2, 1);
        let batch = BatchCoordinator::new(aggregator);

        let targets: Vec<_> = (1..=6).map(|p| ProbeTarget::new("order.example", p)).collect();
        let summaries = batch.probe_batch(targets.clone()).await;

        let returned: Vec<_> = summaries.into_iter().map(|s| s.target).collect();
        assert_eq!(returned, targets);
    }

    #[tokio::test]
    async fn duplicate_targets_are_probed_independently() {
        let dialer = Arc::new(CountingDialer::default());
        let aggregator = aggregator(dialer.clone(), 4, 2);
        let batch = BatchCoordinator::new(aggregator);

        let summaries = batch.probe_body("a.com\na.com", None).await;

        assert_eq!(summaries.len(), 2);
        assert_eq!(dialer.calls.load(Ordering::SeqCst), 4);
    }
}
