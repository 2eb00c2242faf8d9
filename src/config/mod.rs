//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `MODEL_BOT` prefix and nested values use double underscores as separators.
//!
//! Every section has defaults, so an empty environment yields a working
//! configuration.
//!
//! # Example
//!
//! ```no_run
//! use model_bot_bridge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Projects under {}", config.projects.root);
//! ```

mod bot;
mod engines;
mod error;
mod logging;
mod projects;
mod session;

pub use bot::BotConfig;
pub use engines::EnginesConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use projects::ProjectsConfig;
pub use session::SessionConfig;

use serde::Deserialize;

use crate::adapters::PythonSessionConfig;
use crate::application::BotSettings;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Python interpreter configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Names used inside the scripting session
    #[serde(default)]
    pub bot: BotConfig,

    /// Fallback engine ids
    #[serde(default)]
    pub engines: EnginesConfig,

    /// Project store location
    #[serde(default)]
    pub projects: ProjectsConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MODEL_BOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MODEL_BOT__SESSION__PYTHON_PATH=/usr/bin/python3` -> `session.python_path`
    /// - `MODEL_BOT__ENGINES__MODEL=...` -> `engines.model`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MODEL_BOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.session.validate()?;
        self.bot.validate()?;
        self.engines.validate()?;
        self.projects.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Handler settings built from the bot and engine sections
    pub fn bot_settings(&self) -> Result<BotSettings, ValidationError> {
        self.bot.settings(self.engines.defaults())
    }

    /// Settings for spawning a Python session
    pub fn python_session_config(&self) -> PythonSessionConfig {
        self.session.python_session_config()
    }
}
