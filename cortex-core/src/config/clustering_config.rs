//! Clustering is a Non-goal (the algorithm itself is external); this is the
//! cluster-tag vocabulary the core reads when applying orphan protection
//! and the reranking/rerank_min_score knob §6 groups alongside it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClusteringMetric {
    Euclidean,
    Cosine,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub min_cluster_size: u32,
    pub min_samples: u32,
    pub metric: ClusteringMetric,
    pub epsilon: f64,
    pub prediction_data: bool,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: 5,
            min_samples: 3,
            metric: ClusteringMetric::Euclidean,
            epsilon: 0.5,
            prediction_data: true,
        }
    }
}
