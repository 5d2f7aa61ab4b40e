//! Types exchanged with the symbolic proof collaborator and the bridge
//! between engrams and axioms (§6).

use serde::{Deserialize, Serialize};

/// A logical proposition extracted from an engram by `SemanticBridge`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposition {
    pub statement: String,
    pub domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofResult {
    pub proven: bool,
    pub confidence: f64,
    pub verifier: String,
    pub steps: Vec<String>,
    pub axioms_used: Vec<String>,
    pub error: Option<String>,
    pub proof_tree: Option<String>,
}

impl ProofResult {
    pub fn failed(verifier: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            proven: false,
            confidence: 0.0,
            verifier: verifier.into(),
            steps: Vec::new(),
            axioms_used: Vec::new(),
            error: Some(error.into()),
            proof_tree: None,
        }
    }
}
