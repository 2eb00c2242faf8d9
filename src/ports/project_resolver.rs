//! Project Context Resolver Port - project lookup.
//!
//! Maps a project id to its configuration properties and its asset
//! directory. How projects are stored is up to the adapter.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::bot::{BotError, ProjectContext};
use crate::domain::foundation::ProjectId;

/// Errors that can occur while loading a project.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProjectLookupError {
    #[error("Project not found: {0}")]
    NotFound(ProjectId),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Malformed project configuration: {0}")]
    Malformed(String),
}

/// Port for resolving project context.
#[async_trait]
pub trait ProjectContextResolver: Send + Sync {
    /// Picks the project a command is scoped to.
    ///
    /// The default implementation applies override-then-default precedence.
    fn resolve(
        &self,
        explicit: Option<&ProjectId>,
        default: Option<&ProjectId>,
    ) -> Result<ProjectId, BotError> {
        ProjectContext::resolve(explicit, default)
    }

    /// Project configuration as key/value strings.
    async fn get_config(
        &self,
        project_id: &ProjectId,
    ) -> Result<HashMap<String, String>, ProjectLookupError>;

    /// The project's asset directory, as stored (separators not normalised).
    async fn get_asset_directory(&self, project_id: &ProjectId)
        -> Result<String, ProjectLookupError>;
}
