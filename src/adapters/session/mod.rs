//! Scripting session adapters.
//!
//! - `PythonProcessSession` - a Python interpreter in a child process
//! - `SimulatedScriptingSession` - in-memory interpreter stand-in for tests

mod python_process;
mod simulated;

pub use python_process::{PythonProcessSession, PythonSessionConfig};
pub use simulated::{SimulatedScriptingSession, SimulatedValue};
