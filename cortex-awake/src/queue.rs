//! The shared workload queue (§4.6): a mutex-protected list with aging
//! urgency, ruthless pruning, and a periodic reaper.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

const HARD_CAP: usize = 500;
const PRUNE_KEEP_FRACTION: f64 = 0.9;
const REAP_EVERY_N_IDLE_SCANS: u32 = 10;
const REAP_MIN_AGE_HOURS: i64 = 1;
const REAP_MAX_QUALITY: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct WorkloadItem {
    pub engram_id: String,
    pub quality_score: f64,
    pub enqueued_at: DateTime<Utc>,
    pub lease_pending: bool,
}

impl WorkloadItem {
    pub fn new(engram_id: impl Into<String>, quality_score: f64) -> Self {
        Self {
            engram_id: engram_id.into(),
            quality_score,
            enqueued_at: Utc::now(),
            lease_pending: false,
        }
    }

    /// `urgency = quality_score + age_minutes/10` (§4.6).
    pub fn urgency(&self, now: DateTime<Utc>) -> f64 {
        let age_minutes = (now - self.enqueued_at).num_seconds().max(0) as f64 / 60.0;
        self.quality_score + age_minutes / 10.0
    }
}

pub struct WorkloadQueue {
    items: Mutex<Vec<WorkloadItem>>,
    idle_scans: AtomicU32,
}

impl Default for WorkloadQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkloadQueue {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            idle_scans: AtomicU32::new(0),
        }
    }

    pub fn push(&self, item: WorkloadItem) {
        let mut items = self.items.lock();
        items.push(item);
        Self::prune_ruthless_locked(&mut items);
    }

    /// Pop the item with the highest aging urgency score, sorting descending
    /// before popping so languishing low-quality items eventually win.
    pub fn pop(&self) -> Option<WorkloadItem> {
        let mut items = self.items.lock();
        if items.is_empty() {
            return None;
        }
        let now = Utc::now();
        let idx = items
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.urgency(now).partial_cmp(&b.urgency(now)).unwrap())
            .map(|(i, _)| i)?;
        Some(items.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn avg_quality(&self) -> f64 {
        let items = self.items.lock();
        if items.is_empty() {
            return 0.0;
        }
        items.iter().map(|i| i.quality_score).sum::<f64>() / items.len() as f64
    }

    /// On entering a step, if queue length exceeds the hard cap, keep only
    /// the top 90% by urgency (§4.6).
    fn prune_ruthless_locked(items: &mut Vec<WorkloadItem>) {
        if items.len() <= HARD_CAP {
            return;
        }
        let now = Utc::now();
        items.sort_by(|a, b| b.urgency(now).partial_cmp(&a.urgency(now)).unwrap());
        let keep = ((items.len() as f64) * PRUNE_KEEP_FRACTION) as usize;
        items.truncate(keep);
    }

    /// Called once per IDLE scan; every 10th call drops stale, low-quality,
    /// lease-free items (§4.6 "Reaper").
    pub fn reap_on_idle_scan(&self) {
        let scans = self.idle_scans.fetch_add(1, Ordering::SeqCst) + 1;
        if scans % REAP_EVERY_N_IDLE_SCANS != 0 {
            return;
        }
        let mut items = self.items.lock();
        let now = Utc::now();
        items.retain(|item| {
            let age_hours = (now - item.enqueued_at).num_seconds() as f64 / 3600.0;
            !(age_hours > REAP_MIN_AGE_HOURS as f64 && item.quality_score < REAP_MAX_QUALITY && !item.lease_pending)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn pop_returns_highest_urgency_first() {
        let queue = WorkloadQueue::new();
        queue.push(WorkloadItem::new("low", 0.1));
        let mut stale = WorkloadItem::new("old-but-low-quality", 0.1);
        stale.enqueued_at = Utc::now() - Duration::minutes(100);
        queue.push(stale);
        let popped = queue.pop().unwrap();
        assert_eq!(popped.engram_id, "old-but-low-quality");
    }

    #[test]
    fn ruthless_pruning_keeps_top_ninety_percent_over_hard_cap() {
        let queue = WorkloadQueue::new();
        for i in 0..600 {
            queue.push(WorkloadItem::new(format!("e{i}"), (i % 10) as f64 / 10.0));
        }
        assert!(queue.len() <= 600);
        assert!(queue.len() < 600);
    }

    #[test]
    fn reaper_only_runs_every_tenth_idle_scan() {
        let queue = WorkloadQueue::new();
        let mut stale = WorkloadItem::new("stale", 0.1);
        stale.enqueued_at = Utc::now() - Duration::hours(2);
        queue.push(stale);
        for _ in 0..9 {
            queue.reap_on_idle_scan();
        }
        assert_eq!(queue.len(), 1, "reaper should not have fired yet");
        queue.reap_on_idle_scan();
        assert_eq!(queue.len(), 0, "reaper should fire on the 10th scan");
    }

    #[test]
    fn reaper_spares_items_with_a_pending_lease() {
        let queue = WorkloadQueue::new();
        let mut stale = WorkloadItem::new("stale-but-leased", 0.1);
        stale.enqueued_at = Utc::now() - Duration::hours(5);
        stale.lease_pending = true;
        queue.push(stale);
        for _ in 0..10 {
            queue.reap_on_idle_scan();
        }
        assert_eq!(queue.len(), 1);
    }
}
