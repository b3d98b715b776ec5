//! Startup banner printed when the server comes up

use crate::models::Config;
use colored::*;
use std::fmt::Write as _;
use std::net::SocketAddr;

/// Colors used by the banner
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub label: Color,
    pub value: Color,
    pub warning: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            label: Color::BrightBlack,
            value: Color::Cyan,
            warning: Color::Yellow,
        }
    }
}

/// Summary of the effective configuration, shown once at startup
pub struct StartupBanner {
    listen_addr: SocketAddr,
    attempts: u32,
    worker_count: u32,
    timeout_ms: u64,
    auth_enabled: bool,
    warnings: Vec<String>,
    use_color: bool,
    scheme: ColorScheme,
}

impl StartupBanner {
    pub fn new(config: &Config, listen_addr: SocketAddr) -> Self {
        Self {
            listen_addr,
            attempts: config.attempts,
            worker_count: config.worker_count,
            timeout_ms: config.timeout_ms,
            auth_enabled: config.token().is_some(),
            warnings: Vec::new(),
            use_color: config.enable_color,
            scheme: ColorScheme::default(),
        }
    }

    /// Attach configuration warnings to show under the summary
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        let title = format!("{} v{}", crate::PKG_NAME, crate::VERSION);
        let build = match crate::GIT_COMMIT {
            Some(commit) => format!("built {} ({})", crate::BUILD_TIME, commit),
            None => format!("built {}", crate::BUILD_TIME),
        };
        let _ = writeln!(out, "{} {}", self.paint(&title, self.scheme.header, true), self.paint(&build, self.scheme.label, false));

        let rows = [
            ("Listening", format!("http://{}", self.listen_addr)),
            ("Attempts", self.attempts.to_string()),
            ("Workers", self.worker_count.to_string()),
            ("Timeout", format!("{}ms", self.timeout_ms)),
            ("Auth", if self.auth_enabled { "token required".to_string() } else { "disabled".to_string() }),
        ];
        for (label, value) in rows {
            let label = format!("  {:<10}", label);
            let _ = writeln!(out, "{}{}", self.paint(&label, self.scheme.label, false), self.paint(&value, self.scheme.value, false));
        }

        for warning in &self.warnings {
            let _ = writeln!(out, "  {}", self.paint(warning, self.scheme.warning, false));
        }

        out
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let painted = text.color(color);
        if bold {
            painted.bold().to_string()
        } else {
            painted.to_string()
        }
    }
}
