//! HITS (Hyperlink-Induced Topic Search) algorithm.
//!
//! # Overview
//!
//! HITS computes two scores for each page:
//!
//! - **Hub score**: How much a page points to good authorities (a good
//!   link list: index pages, sitemaps, navigation hubs).
//! - **Authority score**: How much a page is pointed to by good hubs (a
//!   good link target).
//!
//! # Algorithm
//!
//! Iterative power method (Kleinberg, 1999):
//!
//! 1. Initialize all hub and authority scores to 1.0.
//! 2. Authority update: `auth(v) = sum of hub(u) for all u → v`.
//! 3. Hub update: `hub(v) = sum of auth(w) for all v → w`, using the
//!    authority values from step 2.
//! 4. Normalize both vectors to unit length (L2 norm). An all-zero vector is
//!    left as-is.
//! 5. Repeat until the summed L1 change of both vectors is below the
//!    tolerance, or max iterations.
//!
//! A page nobody links to ends with authority 0; a page linking nowhere ends
//! with hub 0.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{AnalysisError, Result};
use crate::graph::LinkGraph;

/// Iteration knobs for HITS, independent of PageRank's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitsConfig {
    /// Stop when `L1(Δauth) + L1(Δhub)` drops below this. Default: 1e-6.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Default: 100.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for HitsConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
        }
    }
}

impl HitsConfig {
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfiguration`] for a non-positive
    /// tolerance or a zero iteration cap.
    pub fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(AnalysisError::InvalidConfiguration(format!(
                "hits.tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.max_iter == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "hits.max_iter must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

/// Result of the HITS algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct HitsResult {
    /// Hub scores indexed by node index.
    pub hubs: Vec<f64>,
    /// Authority scores indexed by node index.
    pub authorities: Vec<f64>,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether the algorithm converged within `max_iter`.
    pub converged: bool,
    /// Summed L1 change of both vectors in the last iteration.
    pub residual: f64,
}

/// Compute HITS hub and authority scores.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidConfiguration`] if `config` fails
/// [`HitsConfig::validate`].
#[instrument(skip(graph, config), fields(nodes = graph.node_count()))]
pub fn hits(graph: &LinkGraph, config: &HitsConfig) -> Result<HitsResult> {
    config.validate()?;

    let n = graph.node_count();
    if n == 0 {
        return Ok(HitsResult {
            hubs: Vec::new(),
            authorities: Vec::new(),
            iterations: 0,
            converged: true,
            residual: 0.0,
        });
    }

    let mut hub: Vec<f64> = vec![1.0; n];
    let mut auth: Vec<f64> = vec![1.0; n];
    let mut new_hub: Vec<f64> = vec![0.0; n];
    let mut new_auth: Vec<f64> = vec![0.0; n];

    let mut converged = false;
    let mut iterations = 0;
    let mut residual = f64::INFINITY;

    for _ in 0..config.max_iter {
        iterations += 1;

        // Authority update: auth(v) = sum of hub(u) for all u → v.
        // Fold from +0.0: an empty neighbor set must give +0.0, not -0.0.
        for (v, slot) in new_auth.iter_mut().enumerate() {
            *slot = graph.in_neighbors(v).fold(0.0, |acc, u| acc + hub[u]);
        }

        // Hub update: hub(v) = sum of auth(w) for all v → w
        for (v, slot) in new_hub.iter_mut().enumerate() {
            *slot = graph.out_neighbors(v).fold(0.0, |acc, w| acc + new_auth[w]);
        }

        normalize_l2(&mut new_auth);
        normalize_l2(&mut new_hub);

        residual = l1_distance(&auth, &new_auth) + l1_distance(&hub, &new_hub);

        std::mem::swap(&mut auth, &mut new_auth);
        std::mem::swap(&mut hub, &mut new_hub);

        if residual < config.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        debug!(iterations, residual, "hits converged");
    } else {
        warn!(iterations, residual, "hits hit max_iter before converging");
    }

    Ok(HitsResult {
        hubs: hub,
        authorities: auth,
        iterations,
        converged,
        residual,
    })
}

/// Normalize a vector to unit L2 norm. If the norm is zero, leave as-is.
fn normalize_l2(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
