//! Application handlers.
//!
//! Command handlers that orchestrate the bot through the ports.

pub mod bot;

pub use bot::{
    BotCommand, BotCommandRouter, CommandOutput, LoadBotCommand, LoadBotHandler, LoadBotResult,
    OutputKind, RunQueryCommand, RunQueryHandler, QUESTION_PARAMETER,
};
