//! A directed graph over engram ids, rebuilt from each engram's `links`.
//!
//! The store is the source of truth for links (they live on the owning
//! `Engram`, never as in-memory pointers — §3's circular-reference note);
//! this graph is a derived index kept around only long enough to answer
//! in-degree queries for a single prune pass.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use cortex_core::models::Engram;

#[derive(Debug, Clone)]
pub struct EdgeWeight {
    pub link_type: String,
    pub weight: f64,
}

#[derive(Debug, Default)]
pub struct LinkGraph {
    graph: DiGraph<String, EdgeWeight>,
    index: HashMap<String, NodeIndex>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from scratch over the current engram set. A link target that
    /// doesn't correspond to any engram in `engrams` still gets a node, so
    /// dangling links don't panic — they just show up with in-degree 0 and
    /// no outgoing edges of their own.
    pub fn sync<'a>(&mut self, engrams: impl IntoIterator<Item = &'a Engram>) {
        self.graph.clear();
        self.index.clear();
        let engrams: Vec<&Engram> = engrams.into_iter().collect();

        for engram in &engrams {
            let idx = self.graph.add_node(engram.id.clone());
            self.index.insert(engram.id.clone(), idx);
        }
        for engram in &engrams {
            let source_idx = self.index[&engram.id];
            for link in &engram.links {
                let target_idx = match self.index.get(&link.target) {
                    Some(&idx) => idx,
                    None => {
                        let idx = self.graph.add_node(link.target.clone());
                        self.index.insert(link.target.clone(), idx);
                        idx
                    }
                };
                self.graph.add_edge(
                    source_idx,
                    target_idx,
                    EdgeWeight {
                        link_type: link.link_type.clone(),
                        weight: link.weight,
                    },
                );
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn in_degree(&self, id: &str) -> usize {
        match self.index.get(id) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .count(),
            None => 0,
        }
    }

    /// No engram links to `id`. An id not in the graph at all counts as an
    /// orphan too — nothing could possibly be pointing at it.
    pub fn is_orphan(&self, id: &str) -> bool {
        self.in_degree(id) == 0
    }
}
