//! Bot module - the vocabulary of bot initialisation and querying.
//!
//! - `EngineBinding` - which engine backs each role, with defaults
//! - `ProjectContext` - override/default project resolution
//! - `Query` / `QueryResult` - sanitised input and opaque output
//! - `BotHandle` - a bot registered against a scripting session
//! - `BotError` - the error taxonomy surfaced to callers

mod context;
mod engine;
mod errors;
mod handle;
mod query;

pub use context::ProjectContext;
pub use engine::{
    EngineAssignment, EngineBinding, EngineDefaults, EngineRole, DEFAULT_EMBEDDING_ENGINE_ID,
    DEFAULT_MODEL_ENGINE_ID, DEFAULT_TRANSLATE_ENGINE_ID,
};
pub use errors::BotError;
pub use handle::{BotHandle, BotOrigin};
pub use query::{BotAnswer, Query, QueryResult};
