//! # cortex-engine
//!
//! The query deliberation pipeline (C14, §4.14) and [`handle::CoreHandle`],
//! the aggregator that wires every subsystem crate in this workspace into
//! one running brain and exposes the public API of the core (§6).

pub mod handle;
pub mod pipeline;
mod tracing_init;

pub use handle::{CoreHandle, IngestResult};
pub use pipeline::{CompetitionPath, CompetitionResult, DeliberationPipeline, PipelineCollaborators};
pub use tracing_init::init_tracing;
