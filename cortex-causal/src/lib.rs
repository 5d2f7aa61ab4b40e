//! # cortex-causal
//!
//! The in-process link graph backing orphan protection and delete-cascade
//! for the reference engram store. Links live on the owning `Engram` as a
//! relation keyed by ids (§3), never as in-memory pointers; this crate is
//! the derived index a store rebuilds before a prune pass to answer
//! "does anything still point at this engram".

mod cascade;
mod graph;
mod orphan;

pub use cascade::cascade_unlink;
pub use graph::{EdgeWeight, LinkGraph};
pub use orphan::select_prune_candidates;
