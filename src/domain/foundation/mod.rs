//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, command metadata, timestamps and error types
//! that form the vocabulary of the bot bridge.

mod command;
mod errors;
mod ids;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{InsightId, ProjectId, ScriptSessionId};
pub use timestamp::Timestamp;
