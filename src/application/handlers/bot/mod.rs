//! Bot handlers: load the bot into a session, then query it.

mod command_router;
mod load_bot;
mod run_query;

pub use command_router::{BotCommand, BotCommandRouter, CommandOutput, OutputKind, QUESTION_PARAMETER};
pub use load_bot::{LoadBotCommand, LoadBotHandler, LoadBotResult};
pub use run_query::{RunQueryCommand, RunQueryHandler};
