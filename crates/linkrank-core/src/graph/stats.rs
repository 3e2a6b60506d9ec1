//! Basic statistics for a link graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: distinct URLs and distinct links.
//! - **density**: `edge_count / (node_count * (node_count - 1))`. Zero for
//!   graphs with fewer than two nodes. Self-loops count as edges, so a tiny
//!   graph full of self-loops can exceed 1.0.
//! - **weakly_connected_component_count**: components when edge direction
//!   is ignored. `is_weakly_connected` is true when this is exactly 1.
//! - **dangling_count**: nodes with out-degree 0 (uncrawled targets and
//!   pages without links).
//! - **isolated_node_count**: nodes with no edges at all.
//! - **self_loop_count**: pages linking to themselves.
//! - **max_in_degree** / **max_out_degree**.

use petgraph::algo::connected_components;
use serde::Serialize;

use super::build::LinkGraph;

/// Summary statistics for a [`LinkGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub is_weakly_connected: bool,
    pub weakly_connected_component_count: usize,
    pub dangling_count: usize,
    pub isolated_node_count: usize,
    pub self_loop_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
}

impl GraphStats {
    /// Compute statistics from a built graph.
    #[must_use]
    pub fn from_graph(graph: &LinkGraph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let wcc = connected_components(graph.graph());

        let dangling_count = (0..node_count).filter(|&i| graph.is_dangling(i)).count();

        let isolated_node_count = (0..node_count)
            .filter(|&i| graph.in_degree(i) == 0 && graph.out_degree(i) == 0)
            .count();

        let self_loop_count = graph
            .graph()
            .raw_edges()
            .iter()
            .filter(|e| e.source() == e.target())
            .count();

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            is_weakly_connected: wcc == 1,
            weakly_connected_component_count: wcc,
            dangling_count,
            isolated_node_count,
            self_loop_count,
            max_in_degree: graph.in_degrees().iter().copied().max().unwrap_or(0),
            max_out_degree: graph.out_degrees().iter().copied().max().unwrap_or(0),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    edge_count as f64 / (node_count * (node_count - 1)) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PageRecord;

    fn build(records: &[PageRecord]) -> LinkGraph {
        LinkGraph::from_records(records).expect("build graph")
    }

    #[test]
    fn single_page() {
        let stats = GraphStats::from_graph(&build(&[PageRecord::new("a")]));
        assert_eq!(stats.node_count, 1);
        assert_eq!(stats.edge_count, 0);
        assert!(stats.density.abs() < f64::EPSILON);
        assert!(stats.is_weakly_connected);
        assert_eq!(stats.isolated_node_count, 1);
        assert_eq!(stats.dangling_count, 1);
    }

    #[test]
    fn chain_statistics() {
        let stats = GraphStats::from_graph(&build(&[
            PageRecord::new("a").with_links(["b"]),
            PageRecord::new("b").with_links(["c"]),
        ]));
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert!((stats.density - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(stats.dangling_count, 1);
        assert_eq!(stats.max_in_degree, 1);
        assert_eq!(stats.max_out_degree, 1);
        assert!(stats.is_weakly_connected);
    }

    #[test]
    fn disconnected_components_counted() {
        let stats = GraphStats::from_graph(&build(&[
            PageRecord::new("a").with_links(["b"]),
            PageRecord::new("c").with_links(["d"]),
            PageRecord::new("e"),
        ]));
        assert_eq!(stats.weakly_connected_component_count, 3);
        assert!(!stats.is_weakly_connected);
        assert_eq!(stats.isolated_node_count, 1);
    }

    #[test]
    fn self_loops_counted() {
        let stats = GraphStats::from_graph(&build(&[
            PageRecord::new("a").with_links(["a", "b"]),
            PageRecord::new("b").with_links(["b"]),
        ]));
        assert_eq!(stats.self_loop_count, 2);
        assert_eq!(stats.dangling_count, 0);
    }
}
