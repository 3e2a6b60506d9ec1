//! Graph construction from crawl records.
//!
//! # Overview
//!
//! Turns an ordered slice of [`PageRecord`]s into a [`petgraph`] directed
//! graph whose node indices are dense (`0..N`) and assigned in first-seen
//! order. Every engine downstream indexes its score vectors by these
//! indices, so the build must be deterministic for a given input order.
//!
//! ## Index Order
//!
//! 1. Every record's own URL, in input order.
//! 2. A second pass over the records in input order: each record's outbound
//!    link targets (in list order), then its parent URL, as they are first
//!    seen.
//!
//! Targets that were never crawled therefore land after all crawled pages
//! and end up as nodes with out-degree 0.
//!
//! ## Edges
//!
//! An edge `A → B` means "page A links to page B". A record's `parent_url`
//! adds the implicit edge `parent → url`. Repeated links collapse to a single
//! edge. Self-loops are kept (once) and count toward both degrees.
//!
//! ## Content Hash
//!
//! [`LinkGraph::content_hash`] is a BLAKE3 hash over the node labels and the
//! edge list in index order. Two snapshots that build the same graph share a
//! hash.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};
use tracing::{debug, instrument};

use crate::error::{AnalysisError, Result};
use crate::record::PageRecord;

// ---------------------------------------------------------------------------
// LinkGraph
// ---------------------------------------------------------------------------

/// An immutable directed page graph.
///
/// Nodes are URLs. Node `i` is the `i`-th distinct URL encountered during
/// the build. There is no way to mutate a `LinkGraph` after construction;
/// a new crawl snapshot needs a fresh build.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    in_degree: Vec<usize>,
    out_degree: Vec<usize>,
    content_hash: String,
}

impl LinkGraph {
    /// Build a [`LinkGraph`] from crawl records.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::GraphConstruction`] if `records` is empty.
    #[instrument(skip(records), fields(records = records.len()))]
    pub fn from_records(records: &[PageRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(AnalysisError::GraphConstruction(
                "no page records supplied".to_string(),
            ));
        }

        let mut builder = Builder::default();

        // Crawled pages claim the lowest indices.
        for record in records {
            builder.intern(&record.url);
        }

        for record in records {
            let page = builder.intern(&record.url);
            for link in &record.outbound_links {
                let target = builder.intern(link);
                builder.link(page, target);
            }
            if let Some(parent) = &record.parent_url {
                let parent = builder.intern(parent);
                builder.link(parent, page);
            }
        }

        let graph = builder.finish();
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            hash = %graph.content_hash,
            "link graph built"
        );
        Ok(graph)
    }

    /// Number of nodes (distinct URLs).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct directed edges, self-loops included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The URL label of node `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= node_count()`.
    #[must_use]
    pub fn url(&self, idx: usize) -> &str {
        &self.graph[NodeIndex::new(idx)]
    }

    /// Look up the node index for a URL.
    #[must_use]
    pub fn index_of(&self, url: &str) -> Option<usize> {
        self.node_map.get(url).map(|idx| idx.index())
    }

    /// All URLs in index order.
    pub fn urls(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Number of distinct pages linking to node `idx`.
    #[must_use]
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_degree[idx]
    }

    /// Number of distinct pages node `idx` links to.
    #[must_use]
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_degree[idx]
    }

    /// In-degree of every node, in index order.
    #[must_use]
    pub fn in_degrees(&self) -> &[usize] {
        &self.in_degree
    }

    /// Out-degree of every node, in index order.
    #[must_use]
    pub fn out_degrees(&self) -> &[usize] {
        &self.out_degree
    }

    /// A node with no outgoing edge. A self-loop counts as an outgoing edge.
    #[must_use]
    pub fn is_dangling(&self, idx: usize) -> bool {
        self.out_degree[idx] == 0
    }

    /// Indices of the pages linking to `idx`.
    pub fn in_neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Incoming)
            .map(NodeIndex::index)
    }

    /// Indices of the pages `idx` links to.
    pub fn out_neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Outgoing)
            .map(NodeIndex::index)
    }

    /// Whether the edge `from → to` exists.
    #[must_use]
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// The underlying petgraph graph (read-only).
    #[must_use]
    pub const fn graph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// BLAKE3 hash of the node and edge lists, `blake3:<hex>`.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Builder {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    edges: HashSet<(NodeIndex, NodeIndex)>,
}

impl Builder {
    /// Return the node for `url`, adding it if this is its first sighting.
    fn intern(&mut self, url: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(url) {
            return idx;
        }
        let idx = self.graph.add_node(url.to_string());
        self.node_map.insert(url.to_string(), idx);
        idx
    }

    /// Add `from → to` unless it is already present.
    fn link(&mut self, from: NodeIndex, to: NodeIndex) {
        if self.edges.insert((from, to)) {
            self.graph.add_edge(from, to, ());
        }
    }

    fn finish(self) -> LinkGraph {
        let n = self.graph.node_count();
        let mut in_degree = vec![0; n];
        let mut out_degree = vec![0; n];
        for edge in self.graph.raw_edges() {
            out_degree[edge.source().index()] += 1;
            in_degree[edge.target().index()] += 1;
        }

        let content_hash = compute_content_hash(&self.graph);

        LinkGraph {
            graph: self.graph,
            node_map: self.node_map,
            in_degree,
            out_degree,
            content_hash,
        }
    }
}

/// Hash node labels then edges, both in index order.
fn compute_content_hash(graph: &DiGraph<String, ()>) -> String {
    let mut hasher = blake3::Hasher::new();
    for url in graph.node_weights() {
        hasher.update(url.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for edge in graph.raw_edges() {
        hasher.update(&(edge.source().index() as u64).to_le_bytes());
        hasher.update(&(edge.target().index() as u64).to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
