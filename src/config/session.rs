//! Scripting session configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::PythonSessionConfig;

/// Python interpreter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Interpreter executable
    #[serde(default = "default_python_path")]
    pub python_path: String,

    /// Per-command timeout in seconds (0 disables the limit)
    #[serde(default = "default_command_timeout")]
    pub command_timeout_secs: u64,

    /// Working directory the interpreter starts in
    pub working_directory: Option<String>,
}

impl SessionConfig {
    /// Get the timeout as a Duration, if one is set
    pub fn command_timeout(&self) -> Option<Duration> {
        (self.command_timeout_secs > 0).then(|| Duration::from_secs(self.command_timeout_secs))
    }

    /// Settings for spawning a Python session
    pub fn python_session_config(&self) -> PythonSessionConfig {
        PythonSessionConfig {
            python_path: self.python_path.clone(),
            command_timeout: self.command_timeout(),
            working_directory: self.working_directory.as_ref().map(PathBuf::from),
        }
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.python_path.trim().is_empty() {
            return Err(ValidationError::MissingRequired("SESSION__PYTHON_PATH"));
        }
        if self.command_timeout_secs > 3600 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            python_path: default_python_path(),
            command_timeout_secs: default_command_timeout(),
            working_directory: None,
        }
    }
}

fn default_python_path() -> String {
    "python3".to_string()
}

fn default_command_timeout() -> u64 {
    300
}
