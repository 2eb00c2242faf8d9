//! Settings shared by the bot handlers.

use crate::domain::bot::EngineDefaults;
use crate::domain::script::{BotLayout, ScriptIdentifier};

/// Names and defaults that describe how the bot is built and addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    /// Session variable holding the bot.
    pub variable: ScriptIdentifier,
    /// Where the bot's modules live and what they are called.
    pub layout: BotLayout,
    /// Engine ids used when a project does not configure its own.
    pub engine_defaults: EngineDefaults,
    /// Bot method that answers a question.
    pub query_method: ScriptIdentifier,
    /// Keyword argument carrying the question.
    pub query_argument: ScriptIdentifier,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            variable: ScriptIdentifier::from_static("my_bot"),
            layout: BotLayout::default(),
            engine_defaults: EngineDefaults::default(),
            query_method: ScriptIdentifier::from_static("query"),
            query_argument: ScriptIdentifier::from_static("question"),
        }
    }
}
