//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the bridge and the systems it orchestrates. Adapters implement these ports.
//!
//! - `ScriptingSession` - executes commands in the interpreter hosting the bot
//! - `ProjectContextResolver` - project configuration and asset lookup

mod project_resolver;
mod scripting_session;

pub use project_resolver::{ProjectContextResolver, ProjectLookupError};
pub use scripting_session::{ScriptError, ScriptingSession};
