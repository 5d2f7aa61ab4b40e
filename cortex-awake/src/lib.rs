//! # cortex-awake
//!
//! The AwakeEngine (C6, §4.6): the background reasoner whose mode machine,
//! bidding contract, and workload queue consume whatever the market's
//! auction hands it.

mod bidding;
mod engine;
mod mode;
mod queue;

pub use bidding::construct_bid;
pub use engine::{AwakeEngine, Collaborators};
pub use mode::{mode_after_allocation, mode_after_energy, AllocationSignal, AwakeMode};
pub use queue::{WorkloadItem, WorkloadQueue};
