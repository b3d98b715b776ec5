//! Reduction of raw attempt outcomes into per-target statistics
//!
//! The aggregation is order-independent: it only keeps counts and sums, so
//! outcomes may be fed in whatever order the workers finish them.

use crate::models::probe::{ProbeOutcome, ProbeSummary, ProbeTarget};
use serde::{Deserialize, Serialize};

/// Running statistics over the attempts of one probe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeStatistics {
    /// Attempts recorded so far
    pub attempts: u32,
    /// Attempts that completed a handshake
    pub successes: u32,
    /// Attempts that hit the dial timeout
    pub timeouts: u32,
    /// Sum of successful latencies (milliseconds)
    pub total_latency_ms: f64,
    /// Fastest successful attempt (milliseconds)
    pub min_latency_ms: Option<f64>,
    /// Slowest successful attempt (milliseconds)
    pub max_latency_ms: Option<f64>,
}

impl ProbeStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build statistics from a complete set of outcomes
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a ProbeOutcome>,
    {
        let mut stats = Self::new();
        for outcome in outcomes {
            stats.record(outcome);
        }
        stats
    }

    /// Fold one outcome into the statistics
    pub fn record(&mut self, outcome: &ProbeOutcome) {
        self.attempts += 1;

        if outcome.is_successful() {
            let latency = outcome.latency_ms;
            self.successes += 1;
            self.total_latency_ms += latency;
            self.min_latency_ms = Some(self.min_latency_ms.map_or(latency, |m| m.min(latency)));
            self.max_latency_ms = Some(self.max_latency_ms.map_or(latency, |m| m.max(latency)));
        } else if matches!(outcome.status, crate::types::AttemptStatus::Timeout) {
            self.timeouts += 1;
        }
    }

    /// Count an attempt whose outcome never arrived as a failure
    pub fn record_missing(&mut self) {
        self.attempts += 1;
    }

    pub fn failures(&self) -> u32 {
        self.attempts - self.successes
    }

    /// Mean latency over successful attempts; `None` when nothing succeeded
    pub fn average_latency_ms(&self) -> Option<f64> {
        if self.successes == 0 {
            None
        } else {
            Some(self.total_latency_ms / self.successes as f64)
        }
    }

    /// Percentage of failed attempts; `None` when nothing succeeded
    pub fn loss_percent(&self) -> Option<f64> {
        if self.successes == 0 {
            None
        } else {
            let attempts = self.attempts as f64;
            Some((attempts - self.successes as f64) / attempts * 100.0)
        }
    }

    /// Success rate as a percentage, defined even when nothing succeeded
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            (self.successes as f64 / self.attempts as f64) * 100.0
        }
    }

    /// Turn the statistics into the summary reported for `target`
    pub fn into_summary(self, target: ProbeTarget) -> ProbeSummary {
        match (self.average_latency_ms(), self.loss_percent()) {
            (Some(avg), Some(loss)) => ProbeSummary::reachable(target, avg, loss),
            _ => ProbeSummary::unreachable(target),
        }
    }
}
