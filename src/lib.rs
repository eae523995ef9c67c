//! Skyfall - validated runtime documents for particle and weather scenes
//!
//! This library provides functionality to:
//! - Validate and clamp emitter, force, obstacle, sequencing and capture settings
//! - Derive those settings from loosely-specified requests via per-document agents
//! - Serialize the results as versioned JSON documents for the simulation runtime

pub mod agents;
pub mod cli;
pub mod config;
pub mod generate;
pub mod schema;
pub mod validate;
