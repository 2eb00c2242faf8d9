//! Project resolver adapters.
//!
//! - `InMemoryProjectResolver` - projects registered in memory
//! - `FilesystemProjectResolver` - `.smss` property files and asset folders on disk

mod filesystem;
mod in_memory;

pub use filesystem::{parse_properties, FilesystemProjectResolver};
pub use in_memory::InMemoryProjectResolver;
