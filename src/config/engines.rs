//! Default engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::bot::{
    EngineDefaults, DEFAULT_EMBEDDING_ENGINE_ID, DEFAULT_MODEL_ENGINE_ID,
    DEFAULT_TRANSLATE_ENGINE_ID,
};

/// Engine ids used when a project leaves its own unset
#[derive(Debug, Clone, Deserialize)]
pub struct EnginesConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_embedding")]
    pub embedding: String,

    #[serde(default = "default_translate")]
    pub translate: String,
}

impl EnginesConfig {
    pub fn defaults(&self) -> EngineDefaults {
        EngineDefaults {
            model: self.model.trim().to_string(),
            embedding: self.embedding.trim().to_string(),
            translate: self.translate.trim().to_string(),
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::BlankEngineId("model"));
        }
        if self.embedding.trim().is_empty() {
            return Err(ValidationError::BlankEngineId("embedding"));
        }
        if self.translate.trim().is_empty() {
            return Err(ValidationError::BlankEngineId("translate"));
        }
        Ok(())
    }
}

impl Default for EnginesConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            embedding: default_embedding(),
            translate: default_translate(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL_ENGINE_ID.to_string()
}

fn default_embedding() -> String {
    DEFAULT_EMBEDDING_ENGINE_ID.to_string()
}

fn default_translate() -> String {
    DEFAULT_TRANSLATE_ENGINE_ID.to_string()
}
