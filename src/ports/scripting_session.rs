//! Scripting Session Port - the interpreter that hosts the bot.
//!
//! A session keeps a global namespace alive between calls. The bridge only
//! ever talks to it through structured [`ScriptCommand`]s; implementations
//! decide how to render and transport them.
//!
//! # Contract
//!
//! - Calls are made one at a time per caller and may block for as long as
//!   the script runs. Any timeout belongs to the implementation.
//! - Failures raised by the script itself are `ScriptError::Execution`, with
//!   `kind` set to the interpreter's exception name (e.g. `NameError`).

use async_trait::async_trait;

use crate::domain::foundation::ScriptSessionId;
use crate::domain::script::ScriptCommand;

/// Errors reported by a scripting session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("{kind}: {message}")]
    Execution { kind: String, message: String },

    #[error("Unexpected output from session: {0}")]
    UnexpectedOutput(String),

    #[error("Session transport failed: {0}")]
    Transport(String),

    #[error("Script timed out after {0} seconds")]
    Timeout(u64),
}

impl ScriptError {
    pub fn execution(kind: impl Into<String>, message: impl Into<String>) -> Self {
        ScriptError::Execution {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// True when the script referenced a name the session does not define.
    pub fn is_name_error(&self) -> bool {
        matches!(self, ScriptError::Execution { kind, .. } if kind == "NameError")
    }

    /// Transport failures and timeouts may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, ScriptError::Transport(_) | ScriptError::Timeout(_))
    }
}

/// Port for executing commands in a long-lived scripting session.
#[async_trait]
pub trait ScriptingSession: Send + Sync {
    /// Identity of this session instance. Stable for its lifetime.
    fn session_id(&self) -> ScriptSessionId;

    /// Execute a command and return its textual result.
    async fn run(&self, command: &ScriptCommand) -> Result<String, ScriptError>;

    /// Execute a command, discarding any result.
    async fn run_no_result(&self, command: &ScriptCommand) -> Result<(), ScriptError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_error_displays_kind_and_message() {
        let err = ScriptError::execution("NameError", "name 'my_bot' is not defined");
        assert_eq!(err.to_string(), "NameError: name 'my_bot' is not defined");
        assert!(err.is_name_error());
    }

    #[test]
    fn other_execution_errors_are_not_name_errors() {
        assert!(!ScriptError::execution("ImportError", "no module").is_name_error());
        assert!(!ScriptError::Timeout(5).is_name_error());
    }

    #[test]
    fn transience() {
        assert!(ScriptError::Timeout(1).is_transient());
        assert!(ScriptError::Transport("eof".into()).is_transient());
        assert!(!ScriptError::execution("ValueError", "x").is_transient());
        assert!(!ScriptError::UnexpectedOutput("x".into()).is_transient());
    }
}
