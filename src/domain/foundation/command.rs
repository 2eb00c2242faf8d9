//! Command infrastructure for bot handlers.
//!
//! `CommandMetadata` is the context that flows through every handler: which
//! insight issued the command, which project it is scoped to, and the
//! correlation id used in log spans.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{InsightId, ProjectId};

/// Metadata context for command handlers.
///
/// The project is resolved from `context_project_id` when set (an explicit
/// override naming the project whose bot files should be used), falling back
/// to `project_id` (the project the insight itself belongs to).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The insight executing this command.
    pub insight_id: InsightId,

    /// Explicit project override.
    #[serde(skip_serializing_if = "Option::is_none")]
    context_project_id: Option<ProjectId>,

    /// The insight's own project, used when no override is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    project_id: Option<ProjectId>,

    /// Links related operations across a single user request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for an insight with no project set.
    pub fn new(insight_id: InsightId) -> Self {
        Self {
            insight_id,
            context_project_id: None,
            project_id: None,
            correlation_id: None,
        }
    }

    /// Builder: Set the explicit context project override.
    pub fn with_context_project(mut self, project: ProjectId) -> Self {
        self.context_project_id = Some(project);
        self
    }

    /// Builder: Set the insight's default project.
    pub fn with_project(mut self, project: ProjectId) -> Self {
        self.project_id = Some(project);
        self
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the explicit context project, if any.
    pub fn context_project_id(&self) -> Option<&ProjectId> {
        self.context_project_id.as_ref()
    }

    /// Returns the insight's default project, if any.
    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the correlation ID only if explicitly set.
    pub fn correlation_id_opt(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture scoped to a default project.
    ///
    /// Only available in test builds.
    pub fn test_fixture() -> Self {
        Self::new(InsightId::new())
            .with_project(ProjectId::new("test-project").unwrap())
            .with_correlation_id("test-correlation-id")
    }
}
