//! Structural page-role classification.
//!
//! # Overview
//!
//! Every node gets exactly one [`PageType`]. Rules are evaluated in order and
//! the first match wins:
//!
//! 1. **Orphan**: in-degree 0 (nothing links to it), whatever else it does.
//! 2. **Cornerstone**: PageRank and authority both in the top decile.
//! 3. **Hub**: hub score in the top quartile.
//! 4. **Authority**: authority score in the top quartile.
//! 5. **Leaf**: everything else.
//!
//! # Thresholds
//!
//! Percentiles are taken over the non-orphan nodes of the graph being
//! analyzed, with linear interpolation between closest ranks, so roles are
//! relative to this graph rather than an absolute scale. A node at the
//! boundary is included (`>=`). When most linked pages share a score of 0,
//! the threshold is 0 and all of them reach the band.
//!
//! # Extending
//!
//! [`PageTypeClassifier::new`] takes any rule list. Rules are plain
//! `fn(&NodeMetrics, &Thresholds) -> bool` predicates paired with a label, so
//! a new category is one more entry in the list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural role of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Cornerstone,
    Hub,
    Authority,
    Leaf,
    Orphan,
}

impl PageType {
    /// Every variant in report order.
    pub const ALL: [Self; 5] = [
        Self::Cornerstone,
        Self::Hub,
        Self::Authority,
        Self::Leaf,
        Self::Orphan,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cornerstone => "cornerstone",
            Self::Hub => "hub",
            Self::Authority => "authority",
            Self::Leaf => "leaf",
            Self::Orphan => "orphan",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-node inputs to the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeMetrics {
    pub pagerank: f64,
    pub hub: f64,
    pub authority: f64,
    pub in_degree: usize,
    pub out_degree: usize,
}

/// Percentile cut-offs for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// 90th percentile of PageRank.
    pub pagerank_top_decile: f64,
    /// 90th percentile of authority.
    pub authority_top_decile: f64,
    /// 75th percentile of hub.
    pub hub_top_quartile: f64,
    /// 75th percentile of authority.
    pub authority_top_quartile: f64,
}

impl Thresholds {
    /// Compute cut-offs over the nodes with at least one inbound link.
    ///
    /// With no such node every threshold is `+∞` and no top band matches.
    #[must_use]
    pub fn from_metrics(metrics: &[NodeMetrics]) -> Self {
        let linked: Vec<&NodeMetrics> = metrics.iter().filter(|m| m.in_degree > 0).collect();

        let pagerank: Vec<f64> = linked.iter().map(|m| m.pagerank).collect();
        let hub: Vec<f64> = linked.iter().map(|m| m.hub).collect();
        let authority: Vec<f64> = linked.iter().map(|m| m.authority).collect();

        Self {
            pagerank_top_decile: percentile(&pagerank, 0.90),
            authority_top_decile: percentile(&authority, 0.90),
            hub_top_quartile: percentile(&hub, 0.75),
            authority_top_quartile: percentile(&authority, 0.75),
        }
    }
}

/// The `q`-quantile (`0.0..=1.0`) of `values` by linear interpolation.
///
/// Returns `+∞` for an empty slice.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::INFINITY;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// `score` sits in the band starting at `threshold`; ties are inside.
fn reaches(score: f64, threshold: f64) -> bool {
    score >= threshold
}

/// A rule predicate.
pub type Predicate = fn(&NodeMetrics, &Thresholds) -> bool;

/// One classification rule: a predicate and the label it assigns.
#[derive(Clone, Copy)]
pub struct Rule {
    pub label: PageType,
    pub predicate: Predicate,
}

impl Rule {
    #[must_use]
    pub const fn new(label: PageType, predicate: Predicate) -> Self {
        Self { label, predicate }
    }

    #[must_use]
    pub fn matches(&self, metrics: &NodeMetrics, thresholds: &Thresholds) -> bool {
        (self.predicate)(metrics, thresholds)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("label", &self.label).finish_non_exhaustive()
    }
}

/// The built-in rule list, in priority order.
#[must_use]
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(PageType::Orphan, |m, _| m.in_degree == 0),
        Rule::new(PageType::Cornerstone, |m, t| {
            reaches(m.pagerank, t.pagerank_top_decile)
                && reaches(m.authority, t.authority_top_decile)
        }),
        Rule::new(PageType::Hub, |m, t| reaches(m.hub, t.hub_top_quartile)),
        Rule::new(PageType::Authority, |m, t| {
            reaches(m.authority, t.authority_top_quartile)
        }),
        Rule::new(PageType::Leaf, |_, _| true),
    ]
}

/// First-match-wins classifier over an ordered rule list.
#[derive(Debug, Clone)]
pub struct PageTypeClassifier {
    rules: Vec<Rule>,
}

impl Default for PageTypeClassifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl PageTypeClassifier {
    /// A classifier over `rules`. Nodes matching no rule are [`PageType::Leaf`].
    #[must_use]
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classify one node against precomputed thresholds.
    #[must_use]
    pub fn classify_node(&self, metrics: &NodeMetrics, thresholds: &Thresholds) -> PageType {
        self.rules
            .iter()
            .find(|rule| rule.matches(metrics, thresholds))
            .map_or(PageType::Leaf, |rule| rule.label)
    }

    /// Classify every node; thresholds are derived from `metrics` itself.
    #[must_use]
    pub fn classify(&self, metrics: &[NodeMetrics]) -> Vec<PageType> {
        let thresholds = Thresholds::from_metrics(metrics);
        metrics
            .iter()
            .map(|m| self.classify_node(m, &thresholds))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
