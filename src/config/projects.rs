//! Project store configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::foundation::ProjectId;

/// Where projects live on disk
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectsConfig {
    /// Directory holding `<id>.smss` files and `<id>/` asset folders
    #[serde(default = "default_root")]
    pub root: String,

    /// Project used when a command names none
    pub default_project: Option<String>,
}

impl ProjectsConfig {
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root)
    }

    /// The configured default project, if any
    pub fn default_project_id(&self) -> Option<ProjectId> {
        self.default_project
            .as_deref()
            .and_then(|id| ProjectId::new(id).ok())
    }

    /// Validate project configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.root.trim().is_empty() {
            return Err(ValidationError::MissingRequired("PROJECTS__ROOT"));
        }
        if let Some(id) = &self.default_project {
            ProjectId::new(id.as_str()).map_err(|_| ValidationError::InvalidProjectId)?;
        }
        Ok(())
    }
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            default_project: None,
        }
    }
}

fn default_root() -> String {
    "./projects".to_string()
}
