//! `ProofProvider`: the external symbolic theorem prover (§6).

use async_trait::async_trait;

use crate::errors::CortexResult;
use crate::models::ProofResult;

#[async_trait]
pub trait ProofProvider: Send + Sync {
    async fn prove(&self, query: &str, domain: &str) -> CortexResult<ProofResult>;
}
