//! Script module - structured commands for the scripting session.
//!
//! Identifiers are validated on construction and every literal goes through
//! one encoder, so the rendered text cannot be steered by user input or
//! project configuration.

mod bootstrap;
mod command;
mod identifier;
mod literal;

pub use bootstrap::{normalize_separators, BootstrapScript, BotLayout};
pub use command::{parse_probe, ScriptCommand, ScriptMode};
pub use identifier::ScriptIdentifier;
pub use literal::{ScriptEncoder, ScriptLiteral};
