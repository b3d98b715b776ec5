//! Configuration management module

pub mod env;
pub mod parser;
pub mod validation;

// Re-export main functionality
pub use env::EnvManager;
pub use parser::{display_config_summary, load_config, ConfigParser};
pub use validation::{validate_config, ConfigValidator, ValidationLevel, ValidationWarning};

// Re-export from models for convenience
pub use crate::models::Config;

/// Process environment is global; tests touching it take this lock
#[cfg(test)]
pub(crate) mod tests_support {
    use std::sync::Mutex;

    pub static ENV_LOCK: Mutex<()> = Mutex::new(());

    pub fn clear_env() {
        for name in [
            "TCPING_BIND",
            "TCPING_PORT",
            "TCPING_ATTEMPTS",
            "TCPING_WORKERS",
            "TCPING_TIMEOUT_MS",
            "TCPING_TOKEN",
            "TCPING_ENABLE_COLOR",
        ] {
            std::env::remove_var(name);
        }
    }
}
