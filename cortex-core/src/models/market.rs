//! Shared vocabulary between the resource market (C4) and its bidders
//! (principally C6 AwakeEngine). Lives in `cortex-core` so neither crate
//! needs to depend on the other to agree on what a bid looks like.

use serde::{Deserialize, Serialize};

pub type AgentId = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    ComputeRpm,
    MemorySlot,
    PowerLease,
}

/// A bid for a resource, submitted once per tick by each agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bid {
    pub agent: AgentId,
    pub resource: ResourceKind,
    pub amount: f64,
    pub value: f64,
    pub exclusive: bool,
}

impl Bid {
    pub fn new(agent: impl Into<String>, resource: ResourceKind, amount: f64, value: f64) -> Self {
        Self {
            agent: agent.into(),
            resource,
            amount,
            value,
            exclusive: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.value > 0.0 && self.amount > 0.0
    }
}

/// A proposal for an innovation grant (§4.4 step 4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantRequest {
    pub proposer: AgentId,
    pub cost: f64,
    pub utility: f64,
}

/// One resolved allocation handed back to a winning bidder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Allocation {
    pub winner: AgentId,
    pub resource: ResourceKind,
    pub amount: f64,
    pub cost: f64,
}
