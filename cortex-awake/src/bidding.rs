//! `construct_bid` (§4.6): turns queue pressure into a market bid and,
//! once the queue is badly backed up, an innovation-grant proposal asking
//! for a dedicated power lease to burn through it.

use cortex_core::models::{Bid, GrantRequest, ResourceKind};

const BAILOUT_QUEUE_THRESHOLD: usize = 50;
const LOW_QUALITY_THRESHOLD: f64 = 0.5;

pub fn construct_bid(agent_id: &str, queue_size: usize, avg_quality: f64) -> (Vec<Bid>, Vec<GrantRequest>) {
    let mut bid = Bid::new(agent_id, ResourceKind::ComputeRpm, 10.0, 1.0);
    let mut grants = Vec::new();

    if queue_size > BAILOUT_QUEUE_THRESHOLD {
        let cost = 5.0 * queue_size as f64;
        let utility = 2.0 * cost;
        grants.push(GrantRequest {
            proposer: agent_id.to_string(),
            cost,
            utility,
        });
        bid = Bid::new(agent_id, ResourceKind::PowerLease, 60.0, cost / 60.0);
    } else if queue_size > 0 {
        bid.value += 0.5 * queue_size as f64;
        bid.amount = 30.0;
    }

    if avg_quality < LOW_QUALITY_THRESHOLD && queue_size > 0 {
        bid.value += 10.0;
        bid.resource = ResourceKind::PowerLease;
    }

    (vec![bid], grants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_queue_bids_the_base_amount() {
        let (bids, grants) = construct_bid("awake", 0, 1.0);
        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0].amount, 10.0);
        assert_eq!(bids[0].value, 1.0);
        assert!(grants.is_empty());
    }

    #[test]
    fn moderate_queue_raises_value_and_amount() {
        let (bids, _) = construct_bid("awake", 10, 1.0);
        assert_eq!(bids[0].amount, 30.0);
        assert_eq!(bids[0].value, 6.0);
    }

    #[test]
    fn backed_up_queue_requests_a_bailout_lease() {
        let (bids, grants) = construct_bid("awake", 100, 0.9);
        assert_eq!(bids[0].resource, ResourceKind::PowerLease);
        assert_eq!(bids[0].amount, 60.0);
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].cost, 500.0);
        assert_eq!(grants[0].utility, 1000.0);
    }

    #[test]
    fn low_average_quality_escalates_to_power_lease() {
        let (bids, _) = construct_bid("awake", 5, 0.2);
        assert_eq!(bids[0].resource, ResourceKind::PowerLease);
        assert_eq!(bids[0].value, 2.5 + 10.0);
    }
}
