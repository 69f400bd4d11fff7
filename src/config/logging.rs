//! Logging configuration

use serde::Deserialize;
use std::env;
use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::error::{ConfigError, ValidationError};

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG` when set
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    /// Filter applied by [`LoggingConfig::init_tracing`]
    pub fn env_filter(&self) -> EnvFilter {
        env::var("RUST_LOG")
            .ok()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new(&self.level))
    }

    /// Install the global tracing subscriber.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TracingInit` if a global subscriber is
    /// already installed.
    pub fn init_tracing(&self) -> Result<(), ConfigError> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        let result = if self.json {
            registry
                .with(fmt::layer().with_target(true).with_writer(io::stdout).json())
                .try_init()
        } else {
            registry
                .with(fmt::layer().with_target(true).with_writer(io::stdout))
                .try_init()
        };

        result.map_err(|e| ConfigError::TracingInit(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|_| ValidationError::InvalidLogFilter(self.level.clone()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info,portion_tracker=debug".to_string()
}
