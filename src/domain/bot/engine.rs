//! Engine roles and their resolution from project configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default model engine when a project does not configure one.
pub const DEFAULT_MODEL_ENGINE_ID: &str = "f5f7fd76-a3e5-4dba-8cbb-ededf0f612b4";
/// Default embedding engine when a project does not configure one.
pub const DEFAULT_EMBEDDING_ENGINE_ID: &str = "1c9320a1-52a7-4f6d-9599-fb7c33a0572e";
/// Default translation engine when a project does not configure one.
pub const DEFAULT_TRANSLATE_ENGINE_ID: &str = "5b0c6586-4ab8-4905-83e4-1bab3b6a1966";

/// The three engines a bot is composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineRole {
    Model,
    Embedding,
    Translate,
}

impl EngineRole {
    pub const ALL: [EngineRole; 3] = [EngineRole::Model, EngineRole::Embedding, EngineRole::Translate];

    /// Project configuration key holding this role's engine id.
    pub fn config_key(&self) -> &'static str {
        match self {
            EngineRole::Model => "MODEL_ENGINE_ID",
            EngineRole::Embedding => "EMBEDDING_MODEL_ID",
            EngineRole::Translate => "TRANSLATE_MODEL_ID",
        }
    }

    /// Session variable the engine is bound to; also the bot constructor's keyword.
    pub fn script_variable(&self) -> &'static str {
        match self {
            EngineRole::Model => "modelEngine",
            EngineRole::Embedding => "embeddingModelEngine",
            EngineRole::Translate => "translateModelEngine",
        }
    }

    /// Built-in default engine id.
    pub fn default_engine_id(&self) -> &'static str {
        match self {
            EngineRole::Model => DEFAULT_MODEL_ENGINE_ID,
            EngineRole::Embedding => DEFAULT_EMBEDDING_ENGINE_ID,
            EngineRole::Translate => DEFAULT_TRANSLATE_ENGINE_ID,
        }
    }
}

impl fmt::Display for EngineRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EngineRole::Model => "model",
            EngineRole::Embedding => "embedding",
            EngineRole::Translate => "translate",
        };
        f.write_str(s)
    }
}

/// Fallback engine ids, one per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineDefaults {
    pub model: String,
    pub embedding: String,
    pub translate: String,
}

impl EngineDefaults {
    pub fn get(&self, role: EngineRole) -> &str {
        match role {
            EngineRole::Model => &self.model,
            EngineRole::Embedding => &self.embedding,
            EngineRole::Translate => &self.translate,
        }
    }
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL_ENGINE_ID.to_string(),
            embedding: DEFAULT_EMBEDDING_ENGINE_ID.to_string(),
            translate: DEFAULT_TRANSLATE_ENGINE_ID.to_string(),
        }
    }
}

/// The engine chosen for one role, and whether it came from the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineAssignment {
    pub engine_id: String,
    pub from_default: bool,
}

/// Engine ids for all three roles, resolved for one initialisation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineBinding {
    model: EngineAssignment,
    embedding: EngineAssignment,
    translate: EngineAssignment,
}

impl EngineBinding {
    /// Resolves each role from `properties`, falling back to `defaults` when
    /// the key is missing or blank.
    ///
    /// Values are trimmed, and a blank value counts as unset rather than
    /// being handed to the engine as an empty id.
    pub fn resolve(properties: &HashMap<String, String>, defaults: &EngineDefaults) -> Self {
        let assign = |role: EngineRole| {
            match properties
                .get(role.config_key())
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
            {
                Some(configured) => EngineAssignment {
                    engine_id: configured.to_string(),
                    from_default: false,
                },
                None => EngineAssignment {
                    engine_id: defaults.get(role).to_string(),
                    from_default: true,
                },
            }
        };

        Self {
            model: assign(EngineRole::Model),
            embedding: assign(EngineRole::Embedding),
            translate: assign(EngineRole::Translate),
        }
    }

    pub fn engine_id(&self, role: EngineRole) -> &str {
        &self.assignment(role).engine_id
    }

    pub fn is_default(&self, role: EngineRole) -> bool {
        self.assignment(role).from_default
    }

    pub fn assignment(&self, role: EngineRole) -> &EngineAssignment {
        match role {
            EngineRole::Model => &self.model,
            EngineRole::Embedding => &self.embedding,
            EngineRole::Translate => &self.translate,
        }
    }
}
