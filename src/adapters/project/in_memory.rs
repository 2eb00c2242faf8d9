//! In-Memory Project Resolver Adapter
//!
//! Holds project properties and asset directories in memory.
//! Useful for testing and for hosts that already have projects loaded.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::ProjectId;
use crate::ports::{ProjectContextResolver, ProjectLookupError};

#[derive(Debug, Clone)]
struct ProjectRecord {
    properties: HashMap<String, String>,
    asset_directory: String,
}

/// In-memory project store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectResolver {
    projects: Arc<RwLock<HashMap<ProjectId, ProjectRecord>>>,
}

impl InMemoryProjectResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a project.
    pub async fn insert(
        &self,
        project_id: ProjectId,
        asset_directory: impl Into<String>,
        properties: HashMap<String, String>,
    ) {
        self.projects.write().await.insert(
            project_id,
            ProjectRecord {
                properties,
                asset_directory: asset_directory.into(),
            },
        );
    }

    /// Sets one configuration property on an existing project.
    pub async fn set_property(
        &self,
        project_id: &ProjectId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ProjectLookupError> {
        let mut projects = self.projects.write().await;
        let record = projects
            .get_mut(project_id)
            .ok_or_else(|| ProjectLookupError::NotFound(project_id.clone()))?;
        record.properties.insert(key.into(), value.into());
        Ok(())
    }

    /// Number of registered projects.
    pub async fn project_count(&self) -> usize {
        self.projects.read().await.len()
    }
}

#[async_trait]
impl ProjectContextResolver for InMemoryProjectResolver {
    async fn get_config(
        &self,
        project_id: &ProjectId,
    ) -> Result<HashMap<String, String>, ProjectLookupError> {
        self.projects
            .read()
            .await
            .get(project_id)
            .map(|record| record.properties.clone())
            .ok_or_else(|| ProjectLookupError::NotFound(project_id.clone()))
    }

    async fn get_asset_directory(
        &self,
        project_id: &ProjectId,
    ) -> Result<String, ProjectLookupError> {
        self.projects
            .read()
            .await
            .get(project_id)
            .map(|record| record.asset_directory.clone())
            .ok_or_else(|| ProjectLookupError::NotFound(project_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(s: &str) -> ProjectId {
        ProjectId::new(s).unwrap()
    }

    #[tokio::test]
    async fn returns_registered_project() {
        let resolver = InMemoryProjectResolver::new();
        let mut props = HashMap::new();
        props.insert("MODEL_ENGINE_ID".to_string(), "m-1".to_string());
        resolver.insert(pid("p1"), "/assets/p1", props).await;

        let config = resolver.get_config(&pid("p1")).await.unwrap();
        assert_eq!(config.get("MODEL_ENGINE_ID"), Some(&"m-1".to_string()));
        assert_eq!(resolver.get_asset_directory(&pid("p1")).await.unwrap(), "/assets/p1");
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let resolver = InMemoryProjectResolver::new();
        assert!(matches!(
            resolver.get_config(&pid("missing")).await,
            Err(ProjectLookupError::NotFound(_))
        ));
        assert!(matches!(
            resolver.get_asset_directory(&pid("missing")).await,
            Err(ProjectLookupError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn set_property_updates_config() {
        let resolver = InMemoryProjectResolver::new();
        resolver.insert(pid("p1"), "/a", HashMap::new()).await;
        resolver
            .set_property(&pid("p1"), "TRANSLATE_MODEL_ID", "t-9")
            .await
            .unwrap();

        let config = resolver.get_config(&pid("p1")).await.unwrap();
        assert_eq!(config.get("TRANSLATE_MODEL_ID"), Some(&"t-9".to_string()));
    }

    #[tokio::test]
    async fn set_property_on_unknown_project_fails() {
        let resolver = InMemoryProjectResolver::new();
        assert!(resolver.set_property(&pid("nope"), "k", "v").await.is_err());
    }

    #[test]
    fn default_resolve_prefers_override() {
        let resolver = InMemoryProjectResolver::new();
        let resolved = resolver.resolve(Some(&pid("a")), Some(&pid("b"))).unwrap();
        assert_eq!(resolved.as_str(), "a");
    }
}
