//! # cortex-market
//!
//! The internal resource market (C4, §4.4): ephemeral credits, an auction
//! over fixed per-tick resources, a single exclusive power lease, energy
//! and surge pricing, and innovation grants funded by [`SeekingDrive`].
//!
//! Mutated only by [`Heartbeat`](../cortex_heartbeat)'s tick; readable by
//! anyone holding a shared reference. Not internally thread-safe on its
//! own — callers wrap it in a lock (§5).

mod seeking_drive;

pub use seeking_drive::{SeekingDrive, SeekingDriveConfig};

use std::collections::{HashMap, VecDeque};

use cortex_core::config::MarketConfig;
use cortex_core::errors::MarketError;
use cortex_core::models::{AgentId, Allocation, Bid, GrantRequest, ResourceKind};

/// Fixed per-tick resource supply (§4.4 step 7).
pub const COMPUTE_RPM: f64 = 60.0;
pub const MEMORY_SLOT: f64 = 1.0;
pub const POWER_LEASE_UNITS: f64 = 1.0;

fn capacity_for(resource: ResourceKind) -> f64 {
    match resource {
        ResourceKind::ComputeRpm => COMPUTE_RPM,
        ResourceKind::MemorySlot => MEMORY_SLOT,
        ResourceKind::PowerLease => POWER_LEASE_UNITS,
    }
}

#[derive(Debug, Clone)]
pub struct PowerLease {
    pub holder: AgentId,
    pub started_at_tick: u64,
    pub duration_ticks: u64,
    pub cost: f64,
}

impl PowerLease {
    fn is_expired(&self, current_tick: u64) -> bool {
        current_tick.saturating_sub(self.started_at_tick) >= self.duration_ticks
    }
}

#[derive(Debug, Default, Clone)]
pub struct MarketStats {
    pub ticks: u64,
    pub total_minted: f64,
    pub total_grants_approved: u64,
    pub interrupts: u64,
}

/// Everything the auction needs to know about the outcome of one tick.
#[derive(Debug, Clone, Default)]
pub struct TickResult {
    pub allocations: Vec<Allocation>,
    pub minted: f64,
    pub energy_level: f64,
    pub scarcity_multiplier: f64,
    pub lease_active: bool,
}

pub struct Market {
    config: MarketConfig,
    wallets: HashMap<AgentId, f64>,
    power_lease: Option<PowerLease>,
    energy_level: f64,
    pending_grants: VecDeque<GrantRequest>,
    seeking_drive: SeekingDrive,
    current_tick: u64,
    stats: MarketStats,
}

impl Market {
    pub fn new(config: MarketConfig, seeking_drive: SeekingDrive) -> Self {
        Self {
            config,
            wallets: HashMap::new(),
            power_lease: None,
            energy_level: 100.0,
            pending_grants: VecDeque::new(),
            seeking_drive,
            current_tick: 0,
            stats: MarketStats::default(),
        }
    }

    pub fn register_agent(&mut self, agent: impl Into<AgentId>) {
        self.wallets.entry(agent.into()).or_insert(0.0);
    }

    pub fn wallet(&self, agent: &str) -> f64 {
        self.wallets.get(agent).copied().unwrap_or(0.0)
    }

    pub fn energy_level(&self) -> f64 {
        self.energy_level
    }

    pub fn lease_holder(&self) -> Option<&str> {
        self.power_lease.as_ref().map(|l| l.holder.as_str())
    }

    pub fn stats(&self) -> &MarketStats {
        &self.stats
    }

    pub fn submit_grant(&mut self, grant: GrantRequest) {
        self.pending_grants.push_back(grant);
    }

    /// Atomically move credits between two registered wallets (§4.4 Cooperation).
    pub fn transfer_credits(&mut self, sender: &str, receiver: &str, amount: f64) -> Result<(), MarketError> {
        if amount <= 0.0 {
            return Err(MarketError::InvalidBid);
        }
        let sender_balance = *self
            .wallets
            .get(sender)
            .ok_or_else(|| MarketError::UnknownAgent {
                agent: sender.to_string(),
            })?;
        if !self.wallets.contains_key(receiver) {
            return Err(MarketError::UnknownAgent {
                agent: receiver.to_string(),
            });
        }
        if sender_balance < amount {
            return Err(MarketError::InsufficientFunds {
                agent: sender.to_string(),
                available: sender_balance,
                needed: amount,
            });
        }
        *self.wallets.get_mut(sender).unwrap() -= amount;
        *self.wallets.get_mut(receiver).unwrap() += amount;
        Ok(())
    }

    /// Run one full tick of the market protocol (§4.4).
    #[tracing::instrument(skip(self, bids), fields(tick = self.current_tick))]
    pub fn tick(&mut self, bids: &[Bid], dt_seconds: f64) -> TickResult {
        self.current_tick += 1;
        let dt = dt_seconds.max(0.0);

        // Step 2: ephemeral reset — wallets zeroed before any grant lands.
        for balance in self.wallets.values_mut() {
            *balance = 0.0;
        }

        // Step 3: UBI grant.
        let minted = self.seeking_drive.mint_currency(dt);
        self.stats.total_minted += minted;
        if !self.wallets.is_empty() {
            let share = minted / self.wallets.len() as f64;
            for balance in self.wallets.values_mut() {
                *balance += share;
            }
        }

        // Step 4: innovation grants.
        while let Some(grant) = self.pending_grants.pop_front() {
            if self.seeking_drive.evaluate_proposal(grant.cost, grant.utility) {
                *self.wallets.entry(grant.proposer.clone()).or_insert(0.0) += grant.cost;
                self.stats.total_grants_approved += 1;
            }
        }

        // Step 5: scarcity multiplier.
        let scarcity_multiplier = if self.energy_level < 20.0 { 10.0 } else { 1.0 };

        // Expire a stale lease before arbitration.
        if let Some(lease) = &self.power_lease {
            if lease.is_expired(self.current_tick) {
                self.power_lease = None;
            }
        }

        // Step 6: lease arbitration.
        if let Some(lease) = self.power_lease.clone() {
            let interrupt_threshold = self.config.interrupt_multiplier * lease.cost;
            let winner = bids
                .iter()
                .filter(|b| b.is_valid() && b.value > interrupt_threshold)
                .max_by(|a, b| a.value.partial_cmp(&b.value).unwrap());

            let Some(winner) = winner else {
                // Normal bids are rejected while the lease holds.
                let lease_active = true;
                let result = self.update_energy(Vec::new(), minted, scarcity_multiplier, lease_active, dt);
                return result;
            };

            self.power_lease = None;
            self.stats.interrupts += 1;
            let cost = winner.value * scarcity_multiplier;
            // Interrupt-class bids may overdraw (§4.4 step 6, §5 starvation avoidance).
            *self.wallets.entry(winner.agent.clone()).or_insert(0.0) -= cost;
            let allocation = Allocation {
                winner: winner.agent.clone(),
                resource: winner.resource,
                amount: winner.amount,
                cost,
            };
            return self.update_energy(vec![allocation], minted, scarcity_multiplier, false, dt);
        }

        // Step 7: standard auction.
        let mut remaining: HashMap<ResourceKind, f64> = [
            (ResourceKind::ComputeRpm, capacity_for(ResourceKind::ComputeRpm)),
            (ResourceKind::MemorySlot, capacity_for(ResourceKind::MemorySlot)),
            (ResourceKind::PowerLease, capacity_for(ResourceKind::PowerLease)),
        ]
        .into_iter()
        .collect();

        let mut sorted_bids: Vec<&Bid> = bids.iter().filter(|b| b.is_valid()).collect();
        sorted_bids.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap());

        let mut allocations = Vec::new();
        let mut lease_granted = false;

        for bid in sorted_bids {
            let left = *remaining.get(&bid.resource).unwrap_or(&0.0);
            if bid.amount > left {
                continue;
            }
            let cost = bid.value * scarcity_multiplier;
            let balance = self.wallets.entry(bid.agent.clone()).or_insert(0.0);
            if *balance < cost {
                continue;
            }
            *balance -= cost;
            *remaining.get_mut(&bid.resource).unwrap() -= bid.amount;

            if bid.resource == ResourceKind::PowerLease {
                self.power_lease = Some(PowerLease {
                    holder: bid.agent.clone(),
                    started_at_tick: self.current_tick,
                    duration_ticks: 60,
                    cost,
                });
                // A power lease win claims all compute for the tick.
                remaining.insert(ResourceKind::ComputeRpm, 0.0);
                lease_granted = true;
            }

            allocations.push(Allocation {
                winner: bid.agent.clone(),
                resource: bid.resource,
                amount: bid.amount,
                cost,
            });
        }

        self.update_energy(allocations, minted, scarcity_multiplier, lease_granted, dt)
    }

    fn update_energy(
        &mut self,
        allocations: Vec<Allocation>,
        minted: f64,
        scarcity_multiplier: f64,
        lease_active: bool,
        dt: f64,
    ) -> TickResult {
        let total_compute: f64 = allocations
            .iter()
            .filter(|a| a.resource == ResourceKind::ComputeRpm)
            .map(|a| a.amount)
            .sum();
        let busy = total_compute > 15.0 || lease_active;
        if busy {
            let drain = self.config.drain_rate_base * dt * if lease_active { 3.0 } else { 1.0 };
            self.energy_level -= drain;
        } else {
            self.energy_level += self.config.recharge_rate * dt;
        }
        self.energy_level = self.energy_level.clamp(0.0, 100.0);

        TickResult {
            allocations,
            minted,
            energy_level: self.energy_level,
            scarcity_multiplier,
            lease_active: lease_active || self.power_lease.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market() -> Market {
        let mut m = Market::new(MarketConfig::default(), SeekingDrive::default());
        m.register_agent("awake");
        m.register_agent("other");
        m
    }

    #[test]
    fn ephemeral_reset_zeroes_wallets_before_grants() {
        let mut m = market();
        m.tick(&[], 1.0);
        // after tick 1, wallets hold UBI, not zero — the invariant is about
        // the pre-grant instant, which we verify indirectly: repeated ticks
        // never accumulate beyond one tick's worth of UBI.
        let after_first = m.wallet("awake");
        m.tick(&[], 1.0);
        let after_second = m.wallet("awake");
        assert!((after_first - after_second).abs() < 1e-6, "wallets must not accumulate across ticks");
    }

    #[test]
    fn wallets_never_go_negative_without_an_interrupt() {
        let mut m = market();
        let bid = Bid::new("awake", ResourceKind::ComputeRpm, 10.0, 1_000_000.0);
        m.tick(&[bid], 1.0);
        assert!(m.wallet("awake") >= 0.0);
    }

    #[test]
    fn power_lease_claims_all_compute_and_enables_interrupt_path() {
        let mut m = market();
        for _ in 0..20 {
            m.tick(&[], 1.0); // let UBI build wallets up via repeated minting
        }
        let lease_bid = Bid::new("awake", ResourceKind::PowerLease, 60.0, 5.0);
        let result = m.tick(&[lease_bid], 1.0);
        assert!(result.lease_active);
        assert_eq!(m.lease_holder(), Some("awake"));
    }

    #[test]
    fn interrupt_bid_can_overdraw_and_clear_lease() {
        let mut m = market();
        for _ in 0..20 {
            m.tick(&[], 1.0);
        }
        let lease_bid = Bid::new("awake", ResourceKind::PowerLease, 60.0, 20.0);
        m.tick(&[lease_bid], 1.0);
        assert_eq!(m.lease_holder(), Some("awake"));

        let interrupt = Bid::new("other", ResourceKind::ComputeRpm, 10.0, 1500.0);
        let result = m.tick(&[interrupt], 1.0);
        assert_eq!(m.lease_holder(), None);
        assert_eq!(result.allocations.len(), 1);
        assert_eq!(result.allocations[0].winner, "other");
        assert!(m.wallet("other") < 0.0);
    }

    #[test]
    fn scarcity_multiplier_applies_under_low_energy() {
        let mut m = market();
        m.energy_level = 10.0;
        let bid = Bid::new("awake", ResourceKind::ComputeRpm, 10.0, 5.0);
        let result = m.tick(&[bid], 1.0);
        assert_eq!(result.scarcity_multiplier, 10.0);
    }

    #[test]
    fn transfer_credits_moves_between_wallets() {
        let mut m = market();
        m.tick(&[], 1.0);
        let sender_before = m.wallet("awake");
        if sender_before > 0.0 {
            m.transfer_credits("awake", "other", sender_before / 2.0).unwrap();
            assert!(m.wallet("other") > 0.0);
        }
    }
}
