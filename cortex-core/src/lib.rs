//! # cortex-core
//!
//! Data model, configuration, error taxonomy, and collaborator trait
//! boundaries for the Cortex cognitive scheduling core. Every other crate
//! in the workspace depends on this one and nothing here depends back on
//! them — it is the shared vocabulary the rest of the core is written in.

pub mod config;
pub mod errors;
pub mod models;
pub mod quality;
pub mod traits;

pub use errors::{CortexError, CortexResult};
