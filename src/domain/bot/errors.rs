//! Bot-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::{ProjectLookupError, ScriptError};

/// Errors surfaced by the load and query handlers.
///
/// Nothing is retried or swallowed inside the crate; each variant reaches the
/// caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    /// No project could be resolved, or the project could not be loaded.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The resolved project could not be loaded.
    #[error("Project lookup failed: {0}")]
    ProjectLookup(#[from] ProjectLookupError),

    /// The scripting session failed while probing, bootstrapping or querying.
    #[error("Scripting session failed: {0}")]
    SessionExecution(#[from] ScriptError),

    /// The raw query was not valid percent-encoded UTF-8.
    #[error("Could not decode query: {0}")]
    Decoding(String),

    /// A routed command was missing a required parameter.
    #[error("Missing required parameter '{0}'")]
    MissingParameter(String),

    /// A routed command name is not known.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
}

impl BotError {
    pub fn configuration(message: impl Into<String>) -> Self {
        BotError::Configuration(message.into())
    }

    pub fn decoding(message: impl Into<String>) -> Self {
        BotError::Decoding(message.into())
    }

    pub fn missing_parameter(name: impl Into<String>) -> Self {
        BotError::MissingParameter(name.into())
    }

    /// Both a missing project context and an unloadable project are
    /// configuration problems on the operator's side.
    pub fn is_configuration(&self) -> bool {
        matches!(self, BotError::Configuration(_) | BotError::ProjectLookup(_))
    }

    /// Configuration and input errors are never worth retrying; session
    /// failures might be, at the caller's discretion.
    pub fn is_retryable(&self) -> bool {
        match self {
            BotError::SessionExecution(err) => err.is_transient(),
            _ => false,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BotError::Configuration(_) => ErrorCode::ProjectContextMissing,
            BotError::ProjectLookup(ProjectLookupError::NotFound(_)) => ErrorCode::ProjectNotFound,
            BotError::ProjectLookup(_) => ErrorCode::InternalError,
            BotError::SessionExecution(ScriptError::Timeout(_)) => ErrorCode::ScriptTimeout,
            BotError::SessionExecution(ScriptError::Transport(_)) => ErrorCode::SessionUnavailable,
            BotError::SessionExecution(_) => ErrorCode::ScriptExecutionFailed,
            BotError::Decoding(_) => ErrorCode::InvalidEncoding,
            BotError::MissingParameter(_) => ErrorCode::MissingParameter,
            BotError::UnknownCommand(_) => ErrorCode::UnknownCommand,
        }
    }
}

impl From<ValidationError> for BotError {
    fn from(err: ValidationError) -> Self {
        BotError::Configuration(err.to_string())
    }
}

impl From<BotError> for DomainError {
    fn from(err: BotError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match &err {
            BotError::SessionExecution(ScriptError::Execution { kind, .. }) => {
                domain.with_detail("kind", kind.clone())
            }
            BotError::MissingParameter(name) => domain.with_detail("parameter", name.clone()),
            _ => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProjectId;

    #[test]
    fn session_errors_convert_via_from() {
        let err: BotError = ScriptError::execution("NameError", "name 'my_bot' is not defined").into();
        assert!(matches!(err, BotError::SessionExecution(_)));
        assert_eq!(err.code(), ErrorCode::ScriptExecutionFailed);
    }

    #[test]
    fn configuration_is_not_retryable() {
        assert!(!BotError::configuration("no project").is_retryable());
        assert!(!BotError::decoding("bad escape").is_retryable());
    }

    #[test]
    fn transport_failures_are_retryable() {
        let err = BotError::SessionExecution(ScriptError::Transport("pipe closed".into()));
        assert!(err.is_retryable());
        assert_eq!(err.code(), ErrorCode::SessionUnavailable);
    }

    #[test]
    fn project_lookup_maps_to_not_found_code() {
        let lookup = ProjectLookupError::NotFound(ProjectId::new("p1").unwrap());
        let err: BotError = lookup.into();
        assert!(err.is_configuration());
        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::ProjectNotFound);
    }

    #[test]
    fn domain_error_carries_script_error_kind() {
        let err = BotError::SessionExecution(ScriptError::execution("KeyError", "'x'"));
        let domain: DomainError = err.into();
        assert_eq!(domain.details.get("kind"), Some(&"KeyError".to_string()));
    }
}
