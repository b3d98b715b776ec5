//! Command-line interface

use clap::Parser;

/// TCPing Server - measure TCP reachability, connect latency and loss over HTTP
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tcping-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Port for the HTTP server to listen on (0-65535)
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u32>,

    /// Address for the HTTP server to bind to
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Connection attempts per probed target
    #[arg(short, long, value_name = "N")]
    pub attempts: Option<u32>,

    /// Number of dial workers (maximum concurrent outbound connects)
    #[arg(short, long, visible_alias = "threads", value_name = "N")]
    pub workers: Option<u32>,

    /// Timeout for a single connection attempt, in milliseconds
    #[arg(short = 'o', long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Token clients must present with every probe request
    #[arg(short, long, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Check flag values that clap cannot express on its own
    pub fn validate(&self) -> Result<(), String> {
        if let Some(port) = self.port {
            if port > u16::MAX as u32 {
                return Err("Invalid port number. Please enter a port number between 0 and 65535.".to_string());
            }
        }

        if self.attempts == Some(0) {
            return Err("Invalid attempts number. Please enter attempts greater than 0.".to_string());
        }

        if self.workers == Some(0) {
            return Err("Invalid worker count. Please enter a worker count greater than 0.".to_string());
        }

        if self.timeout_ms == Some(0) {
            return Err("Dial timeout must be greater than 0 milliseconds".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        !self.no_color && supports_color()
    }
}

/// Detect whether the terminal supports colors
fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    match std::env::var("TERM") {
        Ok(term) => term != "dumb",
        Err(_) => cfg!(windows),
    }
}
