//! Generator configuration
//!
//! Provides the section types and loading for TOML and JSON5 config files.

pub mod loader;
pub mod schema;

pub use schema::*;
