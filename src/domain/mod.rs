//! Domain layer - pure types with no I/O.

pub mod bot;
pub mod foundation;
pub mod script;
