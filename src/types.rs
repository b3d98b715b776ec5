//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::time::Duration;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Result of a single connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptStatus {
    /// Handshake completed within the timeout
    Success,
    /// Connection refused, unreachable, or name resolution failed
    Failed,
    /// No handshake before the dial timeout elapsed
    Timeout,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Timeout => "timeout",
        }
    }
}

/// Convert an elapsed duration to fractional milliseconds.
///
/// Microsecond resolution; anything finer is noise for a TCP handshake.
pub fn duration_to_millis(duration: Duration) -> f64 {
    duration.as_micros() as f64 / 1000.0
}
