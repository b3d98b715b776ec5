//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::{AppError, Result},
    models::Config,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the effective configuration.
    ///
    /// Precedence, lowest first: defaults, `.env`, environment, CLI flags.
    pub fn parse(&self) -> Result<Config> {
        self.cli.validate().map_err(AppError::config)?;

        let mut config = Config::default();

        EnvManager::load_env_file(self.cli.debug)?;
        config.merge_from_env()?;

        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref bind) = self.cli.bind {
            config.listen_host = bind.clone();
        }
        if let Some(port) = self.cli.port {
            config.listen_port = port;
        }
        if let Some(attempts) = self.cli.attempts {
            config.attempts = attempts;
        }
        if let Some(workers) = self.cli.workers {
            config.worker_count = workers;
        }
        if let Some(timeout_ms) = self.cli.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(ref token) = self.cli.token {
            config.token = Some(token.clone());
        }

        if self.cli.no_color {
            config.enable_color = false;
        }

        // CLI-only
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Configuration summary for debug output; the token value is never shown
pub fn display_config_summary(config: &Config) -> String {
    let summary = [
        format!("Listen: {}:{}", config.listen_host, config.listen_port),
        format!("Attempts: {}", config.attempts),
        format!("Workers: {}", config.worker_count),
        format!("Dial Timeout: {}ms", config.timeout_ms),
        format!("Token: {}", if config.token().is_some() { "set" } else { "none" }),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ];

    summary.join("\n")
}
