pub mod axiom;
pub mod engram;
pub mod impasse;
pub mod market;
pub mod proof;
pub mod reconsolidation;
pub mod snapshot;
pub mod working_memory;

pub use axiom::{Axiom, AxiomSource};
pub use engram::{
    clamp, Engram, EngramMetadata, Link, VerificationAction, VerificationEntry, SALIENCE_MAX,
    SALIENCE_MIN,
};
pub use impasse::{Impasse, ImpasseType};
pub use market::{AgentId, Allocation, Bid, GrantRequest, ResourceKind};
pub use proof::{ProofResult, Proposition};
pub use reconsolidation::{ReconsolidationModification, ReconsolidationWindow};
pub use snapshot::{BrainSnapshot, ComponentStatus};
pub use working_memory::MemoryItem;
