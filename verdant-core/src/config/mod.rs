//! Configuration types
//!
//! Playback settings persisted next to the active recipe, as text or as
//! postcard binary data.

pub mod parse;
pub mod persist;
pub mod types;

pub use parse::parse_config;
pub use types::*;
