//! Configuration validation beyond the hard limits in `Config::validate`

use crate::{
    error::Result,
    models::Config,
};
use colored::*;
use std::net::IpAddr;

/// Attempts above this make every request slow
const MAX_REASONABLE_ATTEMPTS: u32 = 100;
/// Workers above this risk exhausting file descriptors
const MAX_REASONABLE_WORKERS: u32 = 1024;
/// Timeouts above this delay failure reporting considerably
const MAX_REASONABLE_TIMEOUT_MS: u64 = 60_000;

/// Configuration validator producing non-fatal warnings
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration with comprehensive checks
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_listener(config));
        warnings.extend(Self::validate_probe_settings(config));
        Ok(warnings)
    }

    fn validate_listener(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.listen_port == 0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "Port 0 selects an ephemeral port; check the startup banner for the actual address".to_string(),
            ));
        }

        let loopback = config
            .listen_host
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false);

        if config.token().is_some() && !loopback {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Token is sent in clear text; {} is reachable from other hosts and no TLS is configured",
                    config.listen_host
                ),
            ));
        }

        if config.token().is_none() && !loopback {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "No token configured; anyone who can reach the server can use it to open connections".to_string(),
            ));
        }

        warnings
    }

    fn validate_probe_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.attempts > MAX_REASONABLE_ATTEMPTS {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("{} attempts per probe will make every request slow", config.attempts),
            ));
        }

        if config.worker_count > MAX_REASONABLE_WORKERS {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "{} workers may exhaust the process file descriptor limit",
                    config.worker_count
                ),
            ));
        }

        if config.timeout_ms > MAX_REASONABLE_TIMEOUT_MS {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Dial timeout of {}s will hold workers for a long time on unreachable targets",
                    config.timeout_ms / 1000
                ),
            ));
        }

        warnings
    }
}

/// Validation warning levels
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
    Error,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    fn color(&self) -> Color {
        match self {
            Self::Info => Color::Blue,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        let tag = if use_color {
            tag.color(self.level.color()).to_string()
        } else {
            tag
        };
        format!("{} {}", tag, self.message)
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
