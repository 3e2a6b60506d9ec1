//! PageRank by damped power iteration.
//!
//! # Overview
//!
//! PageRank identifies pages that are linked to by other important pages.
//! A page's score is the stationary probability of a random surfer who
//! follows a uniformly chosen outbound link with probability `d` and jumps
//! to a uniformly chosen page otherwise.
//!
//! # Algorithm
//!
//! ```text
//! PR(v) = (1 - d) / N + d * Σ PR(u) / out_degree(u)   for each u → v
//!                     + d * D / N
//! ```
//!
//! where `D` is the total score held by dangling nodes (out-degree 0).
//! Redistributing `D` uniformly keeps Σ PR = 1 at every iteration. A node
//! whose only out-edge is a self-loop has out-degree 1 and is not dangling.
//!
//! Scores start at `1/N`. Iteration stops when the L1 distance between
//! successive vectors drops below `tolerance`, or after `max_iter`
//! iterations. Hitting the cap is not an error: the last vector is returned
//! with `converged = false`.
//!
//! # Output
//!
//! A [`PageRankResult`] whose `scores[i]` belongs to node `i` of the
//! [`LinkGraph`].

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{AnalysisError, Result};
use crate::graph::LinkGraph;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for PageRank computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRankConfig {
    /// Damping factor (probability of following a link vs teleporting).
    /// Must lie strictly between 0 and 1. Default: 0.85.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Convergence threshold: stop when L1 norm of rank delta < tolerance.
    /// Default: 1e-6.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Maximum number of iterations.
    /// Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

impl PageRankConfig {
    /// Check every knob is inside its legal range.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfiguration`] if `damping` is not in
    /// `(0, 1)`, `tolerance` is not a positive finite number, or `max_iter`
    /// is zero.
    pub fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "pagerank.damping must be in (0, 1), got {}",
                self.damping
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "pagerank.tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iter == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "pagerank.max_iter must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a PageRank computation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// PageRank scores indexed by node index.
    pub scores: Vec<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
    /// L1 distance between the last two vectors.
    pub residual: f64,
}

// ---------------------------------------------------------------------------
// PageRank
// ---------------------------------------------------------------------------

/// Compute PageRank over `graph`.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfiguration`] if `config` fails
/// [`PageRankConfig::validate`].
#[instrument(skip(graph, config), fields(nodes = graph.node_count()))]
#[allow(clippy::cast_precision_loss)]
pub fn pagerank(graph: &LinkGraph, config: &PageRankConfig) -> Result<PageRankResult> {
    config.validate()?;

    let n = graph.node_count();
    if n == 0 {
        return Ok(PageRankResult {
            scores: Vec::new(),
            iterations: 0,
            converged: true,
            residual: 0.0,
        });
    }

    let mut ranks = vec![1.0 / n as f64; n];
    let mut new_ranks = vec![0.0_f64; n];

    let mut iterations = 0;
    let mut converged = false;
    let mut residual = f64::INFINITY;

    for _ in 0..config.max_iter {
        iterations += 1;

        pagerank_step(graph, config.damping, &ranks, &mut new_ranks);

        residual = l1_distance(&ranks, &new_ranks);

        std::mem::swap(&mut ranks, &mut new_ranks);

        if residual < config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, residual, "pagerank converged");
    } else {
        warn!(
            iterations,
            residual, "pagerank hit max_iter before converging"
        );
    }

    Ok(PageRankResult {
        scores: ranks,
        iterations,
        converged,
        residual,
    })
}

/// Run one PageRank iteration: read `ranks`, write `next`.
///
/// `next` is fully overwritten; nothing in `ranks` is modified, so callers
/// never observe a partially updated vector. When `ranks` sums to 1, so does
/// `next`.
///
/// # Panics
///
/// Panics if either slice length differs from `graph.node_count()`.
#[allow(clippy::cast_precision_loss)]
pub fn pagerank_step(graph: &LinkGraph, damping: f64, ranks: &[f64], next: &mut [f64]) {
    let n = graph.node_count();
    assert_eq!(ranks.len(), n, "rank vector length must match node count");
    assert_eq!(next.len(), n, "output vector length must match node count");

    let n_f64 = n as f64;

    // Mass parked on dangling nodes is spread over every node.
    let dangling_mass: f64 = (0..n)
        .filter(|&i| graph.is_dangling(i))
        .map(|i| ranks[i])
        .sum();
    let base = (1.0 - damping) / n_f64 + damping * dangling_mass / n_f64;

    for (v, slot) in next.iter_mut().enumerate() {
        let inflow: f64 = graph
            .in_neighbors(v)
            .map(|u| ranks[u] / graph.out_degree(u) as f64)
            .sum();
        *slot = base + damping * inflow;
    }
}

fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
