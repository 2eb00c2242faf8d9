//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The bot registry is the only state it owns.

pub mod bot_registry;
pub mod handlers;
pub mod settings;

pub use bot_registry::BotRegistry;
pub use handlers::{
    BotCommand, BotCommandRouter, CommandOutput, LoadBotCommand, LoadBotHandler, LoadBotResult,
    OutputKind, RunQueryCommand, RunQueryHandler, QUESTION_PARAMETER,
};
pub use settings::BotSettings;
