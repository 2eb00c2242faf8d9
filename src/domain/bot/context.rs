//! Project context resolution.

use super::BotError;
use crate::domain::foundation::ProjectId;

/// Resolves which project a command is scoped to.
pub struct ProjectContext;

impl ProjectContext {
    /// The explicit override wins; otherwise the caller's default project.
    /// With neither, the command cannot locate the bot's files and fails.
    pub fn resolve(
        explicit: Option<&ProjectId>,
        default: Option<&ProjectId>,
    ) -> Result<ProjectId, BotError> {
        explicit.or(default).cloned().ok_or_else(|| {
            BotError::configuration("Must set the context project to reference the bot files")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProjectId {
        ProjectId::new(s).unwrap()
    }

    #[test]
    fn override_takes_precedence() {
        let resolved = ProjectContext::resolve(Some(&pid("override")), Some(&pid("default")));
        assert_eq!(resolved.unwrap().as_str(), "override");
    }

    #[test]
    fn default_used_without_override() {
        let resolved = ProjectContext::resolve(None, Some(&pid("default")));
        assert_eq!(resolved.unwrap().as_str(), "default");
    }

    #[test]
    fn neither_is_a_configuration_error() {
        assert!(matches!(
            ProjectContext::resolve(None, None),
            Err(BotError::Configuration(_))
        ));
    }
}
