//! Structured logging for the tcping server
//!
//! This module provides:
//! - Structured log entries with levels, fields and correlation IDs
//! - Console and JSON output formats
//! - Specialized loggers for dial attempts, probe summaries and errors

use crate::error::AppError;
use crate::models::{Config, ProbeOutcome, ProbeSummary, ProbeTarget};
use crate::stats::ProbeStatistics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug level - per-attempt details
    Debug = 0,
    /// Info level - general application information
    Info = 1,
    /// Warning level - anomalies that do not stop the service
    Warn = 2,
    /// Error level - failed requests or internal faults
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn colorize(&self, text: &str) -> String {
        use colored::Colorize;
        match self {
            LogLevel::Debug => text.cyan().to_string(),
            LogLevel::Info => text.green().to_string(),
            LogLevel::Warn => text.yellow().to_string(),
            LogLevel::Error => text.red().to_string(),
        }
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp when log entry was created
    pub timestamp: DateTime<Utc>,
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Correlation ID for tracking related events
    pub correlation_id: Option<String>,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
    /// File and line information
    pub location: Option<LogLocation>,
}

/// Source code location information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLocation {
    pub file: String,
    pub line: u32,
    pub module: Option<String>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON format for structured logging
    Json,
}

/// Logger implementation with console and JSON output
#[derive(Clone)]
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    include_location: bool,
    format: LogFormat,
    name: String,
    session_id: Option<Arc<str>>,
}

impl Logger {
    /// Create a logger whose level and format follow the configuration
    ///
    /// `--debug` selects debug level with JSON output and source locations,
    /// `--verbose` selects info level, otherwise only warnings are written.
    pub fn with_config(name: String, config: &Config) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color,
            include_location: config.debug,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            name,
            session_id: None,
        }
    }

    /// Tag every entry from this logger with a session ID
    pub fn with_session_id(mut self, session_id: &str) -> Self {
        self.session_id = Some(Arc::from(session_id));
        self
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn write_entry(&self, mut entry: LogEntry) {
        if !self.would_log(entry.level) {
            return;
        }

        if let Some(session_id) = &self.session_id {
            entry.fields.insert("session_id".to_string(), serde_json::Value::String(session_id.to_string()));
        }

        let output = match self.format {
            LogFormat::Console => self.format_console(&entry),
            LogFormat::Json => self.format_json(&entry),
        };

        // Warnings and worse go to stderr
        if entry.level >= LogLevel::Warn {
            let _ = writeln!(io::stderr(), "{}", output);
        } else {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level = format!("{:>5}", entry.level.as_str());
        let level = if self.use_color { entry.level.colorize(&level) } else { level };

        let mut output = format!("{} {} [{}] {}", timestamp, level, entry.logger, entry.message);

        if let Some(correlation_id) = &entry.correlation_id {
            let short = correlation_id.get(..8).unwrap_or(correlation_id);
            output.push_str(&format!(" [{}]", short));
        }

        if !entry.fields.is_empty() {
            let mut fields: Vec<String> = entry.fields.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields.sort();
            output.push_str(&format!(" {{{}}}", fields.join(", ")));
        }

        if self.include_location {
            if let Some(location) = &entry.location {
                output.push_str(&format!(" @ {}:{}", location.file, location.line));
            }
        }

        output
    }

    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}", entry.message),
        }
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                correlation_id: None,
                fields: HashMap::new(),
                location: None,
            },
        }
    }

    /// Add a correlation ID
    pub fn correlation_id(mut self, id: &str) -> Self {
        self.entry.correlation_id = Some(id.to_string());
        self
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add location information
    pub fn location(mut self, file: &str, line: u32, module: Option<&str>) -> Self {
        self.entry.location = Some(LogLocation {
            file: file.to_string(),
            line,
            module: module.map(String::from),
        });
        self
    }

    /// Add target host and port
    pub fn target(self, target: &ProbeTarget) -> Self {
        self.field("host", target.host())
            .field("port", target.port())
    }

    /// Add error information
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_exit_code", error.exit_code())
    }

    /// Finalize and write the log entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry);
    }
}

/// Logger for individual dial attempts, used by pool workers
#[derive(Clone)]
pub struct NetworkLogger {
    logger: Logger,
}

impl NetworkLogger {
    fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Log the outcome of one connection attempt
    pub async fn log_attempt(&self, target: &ProbeTarget, outcome: &ProbeOutcome, error: Option<&str>) {
        let mut builder = self.logger.debug(&format!("Dial {} -> {}", target, outcome.status.as_str()))
            .target(target)
            .field("status", outcome.status.as_str());

        if outcome.is_successful() {
            builder = builder.field("latency_ms", outcome.latency_ms);
        }
        if let Some(err) = error {
            builder = builder.field("error", err);
        }

        builder.log().await;
    }

    /// Log a connection that opened but did not close cleanly
    pub async fn log_close_failure(&self, target: &ProbeTarget, error: &str) {
        self.logger.warn(&format!("Connection to {} failed to close: {}", target, error))
            .target(target)
            .field("error", error)
            .log()
            .await;
    }

    /// Log a result that could not be delivered to its probe
    pub async fn log_undelivered(&self, target: &ProbeTarget) {
        self.logger.debug(&format!("Result for {} dropped, probe no longer waiting", target))
            .target(target)
            .log()
            .await;
    }
}

/// Logger for probe and batch summaries
#[derive(Clone)]
pub struct ProbeLogger {
    logger: Logger,
}

impl ProbeLogger {
    fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Log a finished probe with its statistics
    pub async fn log_probe(&self, target: &ProbeTarget, stats: &ProbeStatistics, elapsed: Duration) {
        let mut builder = self.logger.debug(&format!(
            "Probe {} finished: {}/{} attempts succeeded",
            target, stats.successes, stats.attempts
        ))
            .target(target)
            .field("attempts", stats.attempts)
            .field("successes", stats.successes)
            .field("timeouts", stats.timeouts)
            .field("elapsed_ms", elapsed.as_secs_f64() * 1000.0);

        if let Some(avg) = stats.average_latency_ms() {
            builder = builder.field("avg_ms", avg)
                .field("min_ms", stats.min_latency_ms)
                .field("max_ms", stats.max_latency_ms);
        }

        builder.log().await;
    }

    /// Log a single-target request
    pub async fn log_request(&self, correlation_id: &str, summary: &ProbeSummary, elapsed: Duration) {
        self.logger.info(&format!("Probed {} (success: {})", summary.target, summary.success))
            .correlation_id(correlation_id)
            .target(&summary.target)
            .field("success", summary.success)
            .field("avg_ms", summary.average_latency_ms)
            .field("loss_percent", summary.loss_percent)
            .field("elapsed_ms", elapsed.as_secs_f64() * 1000.0)
            .log()
            .await;
    }

    /// Log a batch task that died before producing a summary
    pub async fn log_task_failure(&self, target: &ProbeTarget, error: &str) {
        self.logger.error(&format!("Probe task for {} failed: {}", target, error))
            .target(target)
            .field("error", error)
            .log()
            .await;
    }

    /// Log batch summary with aggregate timing information
    pub async fn log_batch_summary(
        &self,
        correlation_id: Option<&str>,
        targets: usize,
        reachable: usize,
        total_duration: Duration,
    ) {
        let message = format!(
            "Batch summary: {} targets probed in {:.3}s ({} reachable)",
            targets,
            total_duration.as_secs_f64(),
            reachable
        );

        let mut builder = self.logger.info(&message)
            .field("batch_size", targets)
            .field("reachable", reachable)
            .field("total_duration_seconds", total_duration.as_secs_f64());

        if let Some(id) = correlation_id {
            builder = builder.correlation_id(id);
        }

        builder.log().await;
    }
}

/// Error event logger with enhanced context
#[derive(Clone)]
pub struct ErrorEventLogger {
    logger: Logger,
}

impl ErrorEventLogger {
    fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Log an application error with full context
    pub async fn log_error(&self, error: &AppError, context: Option<&str>, correlation_id: Option<&str>) {
        let message = match context {
            Some(ctx) => format!("{}: {}", ctx, error),
            None => error.to_string(),
        };

        // Rejected requests are routine, faults are not
        let level = if error.is_client_error() { LogLevel::Info } else { LogLevel::Error };

        let mut builder = self.logger.log(level, &message).error_info(error);

        if let Some(id) = correlation_id {
            builder = builder.correlation_id(id);
        }
        if let Some(ctx) = context {
            builder = builder.field("context", ctx);
        }

        builder.log().await;
    }
}

/// Builds named and specialized loggers sharing one session ID
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger with a specific name
    pub fn create_logger(&self, name: &str) -> Logger {
        Logger::with_config(name.to_string(), &self.config).with_session_id(&self.session_id)
    }

    pub fn create_network_logger(&self) -> NetworkLogger {
        NetworkLogger::new(self.create_logger("NET"))
    }

    pub fn create_probe_logger(&self) -> ProbeLogger {
        ProbeLogger::new(self.create_logger("PROBE"))
    }

    pub fn create_error_logger(&self) -> ErrorEventLogger {
        ErrorEventLogger::new(self.create_logger("ERR"))
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Fresh correlation ID for one request
pub fn new_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Convenience macros for logging with location information
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(&format!($($arg)*))
            .location(file!(), line!(), Some(module_path!()))
            .log()
            .await
    };
}
