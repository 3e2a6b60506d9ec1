//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a page lies on shortest link
//! paths between other pairs of pages. High-betweenness pages are bridges
//! between otherwise separate parts of a site.
//!
//! # Algorithm
//!
//! Brandes' algorithm (2001) for unweighted directed graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Each intermediate node `v` on a shortest `s → t` path receives
//! `σ(s,v)·σ(v,t) / σ(s,t)`, i.e. the fraction of shortest paths through it.
//! Unreachable pairs contribute nothing. Self-loops never lie on a shortest
//! path and are ignored.
//!
//! Complexity: O(V * E).
//!
//! # Output
//!
//! Raw (un-normalized) scores indexed by node. [`normalize_betweenness`]
//! divides by `(n-1)*(n-2)` when a report asks for it.

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::LinkGraph;

/// Compute raw betweenness centrality for every node.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn betweenness_centrality(graph: &LinkGraph) -> Vec<f64> {
    let n = graph.node_count();

    let mut cb: Vec<f64> = vec![0.0; n];

    // Per-source scratch space, reset between sources.
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut delta: Vec<f64> = vec![0.0; n];
    let mut queue: VecDeque<usize> = VecDeque::new();

    for s in 0..n {
        stack.clear();
        predecessors.iter_mut().for_each(Vec::clear);
        sigma.fill(0.0);
        dist.fill(None);
        delta.fill(0.0);

        sigma[s] = 1.0;
        dist[s] = Some(0);
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let Some(dv) = dist[v] else { continue };

            for w in graph.out_neighbors(v) {
                // First visit to w?
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    cb
}

/// Scale raw scores into `[0, 1]` by dividing by `(n-1)*(n-2)`, the number
/// of ordered pairs that exclude a given node.
///
/// A no-op for graphs with fewer than three nodes, where no node can sit
/// between two others.
#[allow(clippy::cast_precision_loss)]
pub fn normalize_betweenness(scores: &mut [f64]) {
    let n = scores.len();
    if n < 3 {
        return;
    }
    let scale = ((n - 1) * (n - 2)) as f64;
    for s in scores.iter_mut() {
        *s /= scale;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PageRecord;

    fn build(nodes: &[&str], edges: &[(&str, &str)]) -> LinkGraph {
        let records: Vec<PageRecord> = nodes
            .iter()
            .map(|n| {
                PageRecord::new(*n)
                    .with_links(edges.iter().filter(|(a, _)| a == n).map(|(_, b)| *b))
            })
            .collect();
        LinkGraph::from_records(&records).expect("build graph")
    }

    fn bc(g: &LinkGraph, scores: &[f64], url: &str) -> f64 {
        scores[g.index_of(url).expect("known url")]
    }

    #[test]
    fn single_node_is_zero() {
        let g = build(&["A"], &[]);
        assert_eq!(betweenness_centrality(&g), vec![0.0]);
    }

    #[test]
    fn chain_middle_nodes() {
        // A → B → C → D
        // Paths through B: A→C, A→D. Paths through C: A→D, B→D.
        let g = build(&["A", "B", "C", "D"], &[("A", "B"), ("B", "C"), ("C", "D")]);
        let s = betweenness_centrality(&g);
        assert!((bc(&g, &s, "A")).abs() < 1e-12);
        assert!((bc(&g, &s, "B") - 2.0).abs() < 1e-12);
        assert!((bc(&g, &s, "C") - 2.0).abs() < 1e-12);
        assert!((bc(&g, &s, "D")).abs() < 1e-12);
    }

    #[test]
    fn diamond_splits_credit() {
        // A → B → D, A → C → D: two shortest A→D paths.
        let g = build(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")],
        );
        let s = betweenness_centrality(&g);
        assert!((bc(&g, &s, "B") - 0.5).abs() < 1e-12);
        assert!((bc(&g, &s, "C") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn cycle_is_symmetric() {
        // A → B → C → A: each node is the midpoint of exactly one pair.
        let g = build(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let s = betweenness_centrality(&g);
        for v in &s {
            assert!((v - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn self_loop_does_not_count() {
        let g = build(&["A", "B", "C"], &[("A", "B"), ("B", "B"), ("B", "C")]);
        let s = betweenness_centrality(&g);
        assert!((bc(&g, &s, "B") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn disconnected_pairs_contribute_nothing() {
        let g = build(&["A", "B", "C", "D"], &[("A", "B"), ("C", "D")]);
        assert!(betweenness_centrality(&g).iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn normalization_divides_by_pair_count() {
        let mut scores = vec![2.0, 0.0, 6.0, 0.0];
        normalize_betweenness(&mut scores);
        assert!((scores[0] - 2.0 / 6.0).abs() < 1e-12);
        assert!((scores[2] - 1.0).abs() < 1e-12);

        let mut tiny = vec![1.0, 1.0];
        normalize_betweenness(&mut tiny);
        assert_eq!(tiny, vec![1.0, 1.0]);
    }
}
