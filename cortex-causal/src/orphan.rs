//! Selecting prune candidates: orphaned and low quality, per §3 — "destroyed
//! by prune (orphan + low quality)" — with the cluster protection carve-out.

use std::collections::HashMap;

use cortex_core::models::Engram;

use crate::graph::LinkGraph;

/// Ids eligible for pruning: no incoming causal link, `quality_score` below
/// `min_quality`, and not the last surviving member of a non-noise cluster.
pub fn select_prune_candidates(engrams: &[Engram], graph: &LinkGraph, min_quality: f64) -> Vec<String> {
    let mut cluster_counts: HashMap<&str, usize> = HashMap::new();
    for engram in engrams {
        if let Some(tag) = engram.cluster_tag.as_deref() {
            *cluster_counts.entry(tag).or_insert(0) += 1;
        }
    }

    engrams
        .iter()
        .filter(|e| e.quality_score() < min_quality && graph.is_orphan(&e.id))
        .filter(|e| {
            let size_after_removal = match e.cluster_tag.as_deref() {
                Some(tag) => cluster_counts.get(tag).copied().unwrap_or(1).saturating_sub(1),
                None => return true,
            };
            !e.is_last_cluster_member(size_after_removal)
        })
        .map(|e| e.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_core::models::EngramMetadata;

    fn low_quality_engram(id: &str) -> Engram {
        let mut e = Engram::new(id, "content", EngramMetadata::new("test"));
        e.set_quality_score(0.1);
        e
    }

    #[test]
    fn orphaned_low_quality_engram_is_selected() {
        let e = low_quality_engram("a");
        let graph = LinkGraph::new();
        let candidates = select_prune_candidates(&[e], &graph, 0.4);
        assert_eq!(candidates, vec!["a".to_string()]);
    }

    #[test]
    fn high_quality_engram_is_never_selected() {
        let mut e = Engram::new("a", "content", EngramMetadata::new("test"));
        e.set_quality_score(0.9);
        let graph = LinkGraph::new();
        let candidates = select_prune_candidates(&[e], &graph, 0.4);
        assert!(candidates.is_empty());
    }

    #[test]
    fn non_orphan_is_never_selected_regardless_of_quality() {
        let mut a = low_quality_engram("a");
        a.add_link("b", "supports", 0.5);
        let b = low_quality_engram("b");

        let mut graph = LinkGraph::new();
        graph.sync(&[a.clone(), b.clone()]);

        // b has an incoming link from a, so it is not an orphan.
        let candidates = select_prune_candidates(&[a, b], &graph, 0.4);
        assert_eq!(candidates, vec!["a".to_string()]);
    }

    #[test]
    fn last_cluster_member_is_protected_even_if_orphaned_and_low_quality() {
        let mut e = low_quality_engram("a");
        e.cluster_tag = Some("cluster-1".to_string());
        let graph = LinkGraph::new();

        let candidates = select_prune_candidates(&[e], &graph, 0.4);
        assert!(candidates.is_empty());
    }

    #[test]
    fn non_last_cluster_member_is_still_eligible() {
        let mut a = low_quality_engram("a");
        a.cluster_tag = Some("cluster-1".to_string());
        let mut b = low_quality_engram("b");
        b.cluster_tag = Some("cluster-1".to_string());

        let graph = LinkGraph::new();
        let candidates = select_prune_candidates(&[a, b], &graph, 0.4);
        assert_eq!(candidates.len(), 2);
    }
}
