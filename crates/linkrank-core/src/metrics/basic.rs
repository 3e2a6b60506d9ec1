//! Degree centrality and the combined centrality bundle.
//!
//! Degrees are read straight from the cached arrays on [`LinkGraph`]; the
//! only real work here is betweenness.

use tracing::instrument;

use crate::graph::LinkGraph;

use super::betweenness::betweenness_centrality;

/// In-degree, out-degree and raw betweenness, indexed by node.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityResult {
    /// How many pages link to this page.
    pub in_degree: Vec<usize>,
    /// How many pages this page links to.
    pub out_degree: Vec<usize>,
    /// Raw shortest-path betweenness.
    pub betweenness: Vec<f64>,
}

/// Compute all centrality measures for `graph`.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn centrality(graph: &LinkGraph) -> CentralityResult {
    CentralityResult {
        in_degree: graph.in_degrees().to_vec(),
        out_degree: graph.out_degrees().to_vec(),
        betweenness: betweenness_centrality(graph),
    }
}
