//! `BiddingAgent`: the Heartbeat's view of anything that participates in
//! the resource market (§4.5 step 5). Pure CPU-bound arithmetic under a
//! lock, so this is a synchronous trait, not an async one (§5).

use crate::models::{Allocation, Bid, GrantRequest};

pub trait BiddingAgent: Send + Sync {
    fn agent_id(&self) -> &str;

    /// Build this tick's bid(s) and any pending innovation-grant proposals.
    fn construct_bid(&self) -> (Vec<Bid>, Vec<GrantRequest>);

    /// Receive the market's verdict on this tick's bids.
    fn receive_allocation(&self, allocations: &[Allocation]);
}
