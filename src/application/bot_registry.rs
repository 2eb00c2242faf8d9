//! Registry of bots by scripting session.
//!
//! Each session gets one slot: an async mutex around the session's
//! `BotHandle`, if any. The load handler holds the slot lock across the
//! probe and the bootstrap, so concurrent initialisers of the same session
//! run one after another and the second sees the first one's handle.
//! Different sessions never contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::bot::BotHandle;
use crate::domain::foundation::ScriptSessionId;

pub(crate) type BotSlot = Arc<tokio::sync::Mutex<Option<BotHandle>>>;

/// Session id to bot handle mapping shared by the load and query handlers.
#[derive(Debug, Default)]
pub struct BotRegistry {
    slots: Mutex<HashMap<ScriptSessionId, BotSlot>>,
}

impl BotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session's slot, creating an empty one if needed.
    pub(crate) fn slot(&self, session_id: ScriptSessionId) -> BotSlot {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.entry(session_id).or_default().clone()
    }

    fn existing_slot(&self, session_id: &ScriptSessionId) -> Option<BotSlot> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.get(session_id).cloned()
    }

    /// The bot registered for a session.
    ///
    /// Waits for an in-flight initialisation of that session to finish.
    pub async fn get(&self, session_id: &ScriptSessionId) -> Option<BotHandle> {
        let slot = self.existing_slot(session_id)?;
        let handle = slot.lock().await;
        handle.clone()
    }

    /// Forgets a session. Call this when the session is torn down.
    ///
    /// Returns whether the session was known.
    pub fn evict(&self, session_id: &ScriptSessionId) -> bool {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let removed = slots.remove(session_id).is_some();
        if removed {
            tracing::debug!(session_id = %session_id, "Evicted bot registration");
        }
        removed
    }

    /// Number of sessions with a slot (registered or in progress).
    pub fn len(&self) -> usize {
        self.slots.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
