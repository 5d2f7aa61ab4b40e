//! `SemanticBridge`: converts between engrams and logical propositions/axioms (§6).

use async_trait::async_trait;

use crate::errors::CortexResult;
use crate::models::{Engram, ProofResult, Proposition};

#[async_trait]
pub trait SemanticBridge: Send + Sync {
    async fn engram_to_axiom(&self, engram: &Engram) -> CortexResult<Option<Proposition>>;
    async fn axiom_to_engram(&self, proof: &ProofResult) -> CortexResult<Engram>;
}
