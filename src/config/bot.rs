//! Bot layout and naming configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::BotSettings;
use crate::domain::bot::EngineDefaults;
use crate::domain::script::{BotLayout, ScriptIdentifier};

/// Names the bridge uses inside the scripting session
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Session variable holding the bot
    #[serde(default = "default_variable")]
    pub variable: String,

    /// Subdirectory of the project assets holding the bot's modules
    #[serde(default = "default_asset_subdirectory")]
    pub asset_subdirectory: String,

    #[serde(default = "default_bot_module")]
    pub bot_module: String,

    #[serde(default = "default_bot_class")]
    pub bot_class: String,

    #[serde(default = "default_engine_module")]
    pub engine_module: String,

    #[serde(default = "default_engine_class")]
    pub engine_class: String,

    /// Bot method answering a question
    #[serde(default = "default_query_method")]
    pub query_method: String,

    /// Keyword argument carrying the question
    #[serde(default = "default_query_argument")]
    pub query_argument: String,
}

impl BotConfig {
    /// Build handler settings, checking every name is a usable identifier
    pub fn settings(&self, engine_defaults: EngineDefaults) -> Result<BotSettings, ValidationError> {
        Ok(BotSettings {
            variable: identifier("variable", &self.variable)?,
            layout: BotLayout {
                asset_subdirectory: self.asset_subdirectory.clone(),
                bot_module: identifier("bot_module", &self.bot_module)?,
                bot_class: identifier("bot_class", &self.bot_class)?,
                engine_module: identifier("engine_module", &self.engine_module)?,
                engine_class: identifier("engine_class", &self.engine_class)?,
            },
            engine_defaults,
            query_method: identifier("query_method", &self.query_method)?,
            query_argument: identifier("query_argument", &self.query_argument)?,
        })
    }

    /// Validate bot configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.settings(EngineDefaults::default()).map(|_| ())
    }
}

fn identifier(field: &'static str, value: &str) -> Result<ScriptIdentifier, ValidationError> {
    ScriptIdentifier::new(value).map_err(|e| ValidationError::InvalidIdentifier {
        field,
        reason: e.to_string(),
    })
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            variable: default_variable(),
            asset_subdirectory: default_asset_subdirectory(),
            bot_module: default_bot_module(),
            bot_class: default_bot_class(),
            engine_module: default_engine_module(),
            engine_class: default_engine_class(),
            query_method: default_query_method(),
            query_argument: default_query_argument(),
        }
    }
}

fn default_variable() -> String {
    "my_bot".to_string()
}

fn default_asset_subdirectory() -> String {
    "py".to_string()
}

fn default_bot_module() -> String {
    "model_bot".to_string()
}

fn default_bot_class() -> String {
    "ModelBot".to_string()
}

fn default_engine_module() -> String {
    "gaas_gpt_model".to_string()
}

fn default_engine_class() -> String {
    "ModelEngine".to_string()
}

fn default_query_method() -> String {
    "query".to_string()
}

fn default_query_argument() -> String {
    "question".to_string()
}
