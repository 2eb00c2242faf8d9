//! Model Bot Bridge - project-scoped model bots in a scripting session
//!
//! This crate brings a project's model bot to life inside a long-lived
//! scripting session, once per session, and then forwards sanitised user
//! questions to it.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
