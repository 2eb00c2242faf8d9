//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the bridge to external systems:
//! - `project` - project configuration and assets (in-memory, filesystem)
//! - `session` - scripting sessions (Python child process, simulated)

pub mod project;
pub mod session;

pub use project::{FilesystemProjectResolver, InMemoryProjectResolver};
pub use session::{PythonProcessSession, PythonSessionConfig, SimulatedScriptingSession};
