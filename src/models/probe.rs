//! Probe targets, per-attempt outcomes and per-target summaries

use crate::types::{duration_to_millis, AppError, AttemptStatus, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

const INVALID_PORT_MESSAGE: &str =
    "Invalid port number. Please enter a port number between 0 and 65535.";

/// A `host:port` pair to probe
///
/// The port is always a validated `u16`; the host is passed through to the
/// dialer untouched, so name resolution happens there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProbeTarget {
    host: String,
    port: u16,
}

impl ProbeTarget {
    pub fn new<S: Into<String>>(host: S, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Build a target from request parameters.
    ///
    /// A missing or empty port falls back to the default target port.
    pub fn from_request(host: Option<&str>, port: Option<&str>) -> Result<Self> {
        let host = match host {
            Some(h) if !h.is_empty() => h,
            _ => return Err(AppError::validation("Missing host parameter")),
        };

        let port = match port {
            None | Some("") => crate::defaults::DEFAULT_TARGET_PORT,
            Some(p) => parse_port(p).ok_or_else(|| AppError::validation(INVALID_PORT_MESSAGE))?,
        };

        Ok(Self::new(host, port))
    }

    /// Parse one line of a batch body, returning `None` for lines to skip.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        // Bracketed IPv6, with or without a port
        if let Some(rest) = line.strip_prefix('[') {
            let (host, tail) = rest.split_once(']')?;
            if host.is_empty() {
                return None;
            }
            return match tail {
                "" => Some(Self::new(host, crate::defaults::DEFAULT_TARGET_PORT)),
                _ => {
                    let port = parse_port(tail.strip_prefix(':')?)?;
                    Some(Self::new(host, port))
                }
            };
        }

        let mut parts = line.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(host), Some(port), None) => {
                if host.is_empty() {
                    return None;
                }
                Some(Self::new(host, parse_port(port)?))
            }
            // No colon, or a bare IPv6 literal: the whole line is the host
            _ => Some(Self::new(line, crate::defaults::DEFAULT_TARGET_PORT)),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Address string suitable for `TcpStream::connect`
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}

/// Parse a port string, accepting only integers in 0-65535
pub fn parse_port(value: &str) -> Option<u16> {
    value.parse::<u16>().ok()
}

/// Parse a newline-delimited batch body into targets, dropping malformed lines.
pub fn parse_batch(body: &str) -> Vec<ProbeTarget> {
    body.lines().filter_map(ProbeTarget::parse_line).collect()
}

/// Outcome of one connection attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub status: AttemptStatus,
    /// Handshake latency; only meaningful when `status` is `Success`
    pub latency_ms: f64,
}

impl ProbeOutcome {
    pub fn success(latency_ms: f64) -> Self {
        Self {
            status: AttemptStatus::Success,
            latency_ms,
        }
    }

    pub fn from_elapsed(elapsed: Duration) -> Self {
        Self::success(duration_to_millis(elapsed))
    }

    pub fn failed() -> Self {
        Self {
            status: AttemptStatus::Failed,
            latency_ms: 0.0,
        }
    }

    pub fn timed_out() -> Self {
        Self {
            status: AttemptStatus::Timeout,
            latency_ms: 0.0,
        }
    }

    pub fn is_successful(&self) -> bool {
        matches!(self.status, AttemptStatus::Success)
    }
}

/// Reduced result of all attempts against one target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeSummary {
    pub target: ProbeTarget,
    /// True iff at least one attempt succeeded
    pub success: bool,
    /// Mean latency of the successful attempts; present iff `success`
    pub average_latency_ms: Option<f64>,
    /// Share of failed attempts, 0-100; present iff `success`
    pub loss_percent: Option<f64>,
}

impl ProbeSummary {
    /// Summary for a target none of whose attempts succeeded
    pub fn unreachable(target: ProbeTarget) -> Self {
        Self {
            target,
            success: false,
            average_latency_ms: None,
            loss_percent: None,
        }
    }

    pub fn reachable(target: ProbeTarget, average_latency_ms: f64, loss_percent: f64) -> Self {
        Self {
            target,
            success: true,
            average_latency_ms: Some(average_latency_ms),
            loss_percent: Some(loss_percent),
        }
    }
}
