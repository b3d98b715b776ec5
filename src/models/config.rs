//! Configuration data model and validation

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to
    #[serde(default = "default_listen_host")]
    pub listen_host: String,

    /// Port the HTTP server listens on (0-65535)
    #[serde(default = "default_listen_port")]
    pub listen_port: u32,

    /// Connection attempts per probe
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Number of dial workers, i.e. the ceiling on concurrent outbound connects
    #[serde(default = "default_worker_count")]
    pub worker_count: u32,

    /// Per-attempt dial timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Shared secret required on every probe request, if set
    #[serde(default)]
    pub token: Option<String>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_host: default_listen_host(),
            listen_port: default_listen_port(),
            attempts: default_attempts(),
            worker_count: default_worker_count(),
            timeout_ms: default_timeout_ms(),
            token: None,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the dial timeout as Duration
    pub fn dial_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Configured token, treating an empty string as "no token"
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Socket address the server binds to
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip = IpAddr::from_str(&self.listen_host)
            .map_err(|e| AppError::config(format!("Invalid listen address '{}': {}", self.listen_host, e)))?;
        let port = u16::try_from(self.listen_port).map_err(|_| {
            AppError::config("Invalid port number. Please enter a port number between 0 and 65535.")
        })?;
        Ok(SocketAddr::new(ip, port))
    }

    /// Validate the configuration and return the first error found
    pub fn validate(&self) -> Result<()> {
        if self.listen_port > u16::MAX as u32 {
            return Err(AppError::config(
                "Invalid port number. Please enter a port number between 0 and 65535.",
            ));
        }

        if IpAddr::from_str(&self.listen_host).is_err() {
            return Err(AppError::config(format!("Invalid listen address: {}", self.listen_host)));
        }

        if self.worker_count == 0 {
            return Err(AppError::config(
                "Invalid worker count. Please enter a worker count greater than 0.",
            ));
        }

        if self.attempts == 0 {
            return Err(AppError::config(
                "Invalid attempts number. Please enter attempts greater than 0.",
            ));
        }

        if self.timeout_ms == 0 {
            return Err(AppError::config("Dial timeout must be greater than 0 milliseconds"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(bind) = std::env::var("TCPING_BIND") {
            self.listen_host = bind.trim().to_string();
        }

        if let Some(port) = parse_env("TCPING_PORT")? {
            self.listen_port = port;
        }

        if let Some(attempts) = parse_env("TCPING_ATTEMPTS")? {
            self.attempts = attempts;
        }

        if let Some(workers) = parse_env("TCPING_WORKERS")? {
            self.worker_count = workers;
        }

        if let Some(timeout) = parse_env("TCPING_TIMEOUT_MS")? {
            self.timeout_ms = timeout;
        }

        if let Ok(token) = std::env::var("TCPING_TOKEN") {
            self.token = Some(token);
        }

        if let Some(enable_color) = parse_env("TCPING_ENABLE_COLOR")? {
            self.enable_color = enable_color;
        }

        Ok(())
    }
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e))),
        Err(_) => Ok(None),
    }
}

// Default value functions for serde
fn default_listen_host() -> String {
    crate::defaults::DEFAULT_LISTEN_HOST.to_string()
}

fn default_listen_port() -> u32 {
    crate::defaults::DEFAULT_LISTEN_PORT
}

fn default_attempts() -> u32 {
    crate::defaults::DEFAULT_ATTEMPTS
}

fn default_worker_count() -> u32 {
    crate::defaults::DEFAULT_WORKER_COUNT
}

fn default_timeout_ms() -> u64 {
    crate::defaults::DEFAULT_DIAL_TIMEOUT.as_millis() as u64
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
