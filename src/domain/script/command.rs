//! Structured commands sent to a scripting session.

use super::{BootstrapScript, ScriptEncoder, ScriptIdentifier, ScriptLiteral};
use crate::ports::ScriptError;

/// How a session should execute a rendered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMode {
    /// A single expression whose value is returned.
    Eval,
    /// A block of statements; nothing is returned.
    Exec,
}

/// A unit of work for the scripting session.
///
/// Handlers build these instead of script text; [`ScriptCommand::render`] is
/// the only place text is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Whether `name` is bound in the session's global namespace.
    HasGlobal { name: ScriptIdentifier },
    /// Set up the module path and instantiate the bot.
    Bootstrap(BootstrapScript),
    /// `target.method(key=value, ...)`
    CallMethod {
        target: ScriptIdentifier,
        method: ScriptIdentifier,
        kwargs: Vec<(ScriptIdentifier, ScriptLiteral)>,
    },
}

impl ScriptCommand {
    pub fn has_global(name: ScriptIdentifier) -> Self {
        ScriptCommand::HasGlobal { name }
    }

    pub fn call_method(
        target: ScriptIdentifier,
        method: ScriptIdentifier,
        kwargs: Vec<(ScriptIdentifier, ScriptLiteral)>,
    ) -> Self {
        ScriptCommand::CallMethod {
            target,
            method,
            kwargs,
        }
    }

    pub fn mode(&self) -> ScriptMode {
        match self {
            ScriptCommand::HasGlobal { .. } | ScriptCommand::CallMethod { .. } => ScriptMode::Eval,
            ScriptCommand::Bootstrap(_) => ScriptMode::Exec,
        }
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ScriptCommand::HasGlobal { .. } => "probe",
            ScriptCommand::Bootstrap(_) => "bootstrap",
            ScriptCommand::CallMethod { .. } => "call",
        }
    }

    pub fn render(&self) -> String {
        match self {
            ScriptCommand::HasGlobal { name } => {
                format!("{} in globals()", ScriptEncoder::string(name.as_str()))
            }
            ScriptCommand::Bootstrap(script) => script.render(),
            ScriptCommand::CallMethod {
                target,
                method,
                kwargs,
            } => {
                let args = kwargs
                    .iter()
                    .map(|(key, value)| format!("{}={}", key, ScriptEncoder::literal(value)))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}.{}({})", target, method, args)
            }
        }
    }
}

/// Interprets the output of a [`ScriptCommand::HasGlobal`] probe.
///
/// Only an unambiguous boolean is accepted. Output such as `"falsehood"` is
/// rejected rather than guessed at.
pub fn parse_probe(output: &str) -> Result<bool, ScriptError> {
    let value = output.trim().trim_matches(|c| c == '"' || c == '\'');
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ScriptError::UnexpectedOutput(format!(
            "expected a boolean from the existence probe, got {:?}",
            output
        )))
    }
}
