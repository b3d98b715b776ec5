//! Output formatting
//!
//! Two audiences are served here:
//! - HTTP clients, who receive [`PingResult`] documents as JSON
//! - The operator's terminal, which gets a startup banner

mod banner;

pub use banner::StartupBanner;

use crate::error::Result;
use crate::models::ProbeSummary;
use serde::{Deserialize, Serialize};

/// Response document for one probed target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<PingData>,
}

/// Target details and measurements inside a [`PingResult`]
///
/// `ping` and `loss` are pre-formatted with exactly two decimals and are
/// only present when at least one attempt succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PingData {
    pub host: String,
    pub port: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ping: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss: Option<String>,
}

impl From<&ProbeSummary> for PingResult {
    fn from(summary: &ProbeSummary) -> Self {
        Self {
            success: summary.success,
            data: Some(PingData {
                host: summary.target.host().to_string(),
                port: summary.target.port().to_string(),
                ping: summary.average_latency_ms.map(format_millis),
                loss: summary.loss_percent.map(format_millis),
            }),
        }
    }
}

impl From<ProbeSummary> for PingResult {
    fn from(summary: ProbeSummary) -> Self {
        Self::from(&summary)
    }
}

/// Format a measurement with two decimals, e.g. `11.00`
pub fn format_millis(value: f64) -> String {
    format!("{:.2}", value)
}

/// Serialize one result as a JSON document
pub fn render_single(summary: &ProbeSummary) -> Result<String> {
    Ok(serde_json::to_string(&PingResult::from(summary))?)
}

/// Serialize batch results as a JSON array, in the order given
pub fn render_batch(summaries: &[ProbeSummary]) -> Result<String> {
    let results: Vec<PingResult> = summaries.iter().map(PingResult::from).collect();
    Ok(serde_json::to_string(&results)?)
}
