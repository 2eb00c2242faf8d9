//! The bot as seen from outside the scripting session.

use serde::{Deserialize, Serialize};

use super::EngineBinding;
use crate::domain::foundation::{ProjectId, ScriptSessionId, Timestamp};
use crate::domain::script::ScriptIdentifier;

/// How the bot came to be registered for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotOrigin {
    /// This process ran the bootstrap script.
    Bootstrapped,
    /// The probe found a bot that some earlier caller had created.
    Adopted,
}

/// A bot living in a particular scripting session.
///
/// For an adopted bot, `binding` is what the current configuration resolves
/// to, which may differ from the engines the bot was actually built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotHandle {
    pub session_id: ScriptSessionId,
    pub variable: ScriptIdentifier,
    pub project_id: ProjectId,
    pub binding: EngineBinding,
    pub origin: BotOrigin,
    pub registered_at: Timestamp,
}

impl BotHandle {
    pub fn new(
        session_id: ScriptSessionId,
        variable: ScriptIdentifier,
        project_id: ProjectId,
        binding: EngineBinding,
        origin: BotOrigin,
    ) -> Self {
        Self {
            session_id,
            variable,
            project_id,
            binding,
            origin,
            registered_at: Timestamp::now(),
        }
    }

    pub fn was_bootstrapped(&self) -> bool {
        self.origin == BotOrigin::Bootstrapped
    }
}
