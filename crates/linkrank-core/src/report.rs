//! The analysis report handed to reporting and visualization consumers.
//!
//! All per-node vectors are re-keyed by URL here. Maps are `BTreeMap`s so
//! the serialized form is stable across runs. Page-type lists are in
//! ascending URL order. Top-K lists are sorted by score descending with ties
//! broken by ascending URL.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::PageType;
use crate::config::AnalysisConfig;
use crate::error::{ConvergenceWarning, Engine};
use crate::graph::{GraphStats, LinkGraph};
use crate::metrics::basic::CentralityResult;
use crate::metrics::betweenness::normalize_betweenness;
use crate::metrics::hits::HitsResult;
use crate::metrics::pagerank::PageRankResult;

/// Full result of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphAnalysisReport {
    /// PageRank per URL; sums to ≈ 1.
    pub pagerank: BTreeMap<String, f64>,
    pub hits: HitsScores,
    pub centrality: CentralityScores,
    pub page_types: PageTypes,
    pub top_k: TopK,
    pub converged: Convergence,
    pub iterations: Iterations,
    /// One entry per engine that hit its iteration cap.
    pub warnings: Vec<ConvergenceWarning>,
    pub graph_stats: GraphStats,
    pub content_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HitsScores {
    pub hub: BTreeMap<String, f64>,
    pub authority: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityScores {
    pub in_degree: BTreeMap<String, usize>,
    pub out_degree: BTreeMap<String, usize>,
    /// Raw counts, or divided by `(n-1)(n-2)` when
    /// `normalize_betweenness` is set.
    pub betweenness: BTreeMap<String, f64>,
}

/// URLs grouped by assigned role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageTypes {
    pub cornerstone: Vec<String>,
    pub hub: Vec<String>,
    pub authority: Vec<String>,
    pub leaf: Vec<String>,
    pub orphan: Vec<String>,
}

impl PageTypes {
    /// The URLs assigned `page_type`.
    #[must_use]
    pub fn get(&self, page_type: PageType) -> &[String] {
        match page_type {
            PageType::Cornerstone => &self.cornerstone,
            PageType::Hub => &self.hub,
            PageType::Authority => &self.authority,
            PageType::Leaf => &self.leaf,
            PageType::Orphan => &self.orphan,
        }
    }

    fn get_mut(&mut self, page_type: PageType) -> &mut Vec<String> {
        match page_type {
            PageType::Cornerstone => &mut self.cornerstone,
            PageType::Hub => &mut self.hub,
            PageType::Authority => &mut self.authority,
            PageType::Leaf => &mut self.leaf,
            PageType::Orphan => &mut self.orphan,
        }
    }

    /// Count per role, in [`PageType::ALL`] order.
    #[must_use]
    pub fn counts(&self) -> Vec<(PageType, usize)> {
        PageType::ALL
            .iter()
            .map(|&t| (t, self.get(t).len()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopK {
    pub pagerank: Vec<String>,
    pub hubs: Vec<String>,
    pub authorities: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Convergence {
    pub pagerank: bool,
    pub hits: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Iterations {
    pub pagerank: usize,
    pub hits: usize,
}

impl GraphAnalysisReport {
    /// Merge the engine outputs and the classification into a report.
    #[must_use]
    pub fn assemble(
        graph: &LinkGraph,
        config: &AnalysisConfig,
        pagerank: &PageRankResult,
        hits: &HitsResult,
        centrality: &CentralityResult,
        roles: &[PageType],
    ) -> Self {
        let mut warnings = Vec::new();
        if !pagerank.converged {
            warnings.push(ConvergenceWarning {
                engine: Engine::PageRank,
                iterations: pagerank.iterations,
                residual: pagerank.residual,
            });
        }
        if !hits.converged {
            warnings.push(ConvergenceWarning {
                engine: Engine::Hits,
                iterations: hits.iterations,
                residual: hits.residual,
            });
        }

        let mut betweenness = centrality.betweenness.clone();
        if config.normalize_betweenness {
            normalize_betweenness(&mut betweenness);
        }

        let mut page_types = PageTypes::default();
        for (idx, role) in roles.iter().enumerate() {
            page_types.get_mut(*role).push(graph.url(idx).to_string());
        }
        for t in PageType::ALL {
            page_types.get_mut(t).sort_unstable();
        }

        Self {
            pagerank: by_url(graph, &pagerank.scores),
            hits: HitsScores {
                hub: by_url(graph, &hits.hubs),
                authority: by_url(graph, &hits.authorities),
            },
            centrality: CentralityScores {
                in_degree: by_url(graph, &centrality.in_degree),
                out_degree: by_url(graph, &centrality.out_degree),
                betweenness: by_url(graph, &betweenness),
            },
            page_types,
            top_k: TopK {
                pagerank: rank_top_k(graph, &pagerank.scores, config.top_k),
                hubs: rank_top_k(graph, &hits.hubs, config.top_k),
                authorities: rank_top_k(graph, &hits.authorities, config.top_k),
            },
            converged: Convergence {
                pagerank: pagerank.converged,
                hits: hits.converged,
            },
            iterations: Iterations {
                pagerank: pagerank.iterations,
                hits: hits.iterations,
            },
            warnings,
            graph_stats: GraphStats::from_graph(graph),
            content_hash: graph.content_hash().to_string(),
        }
    }

    /// The role assigned to `url`, if it is a node of the analyzed graph.
    #[must_use]
    pub fn page_type_of(&self, url: &str) -> Option<PageType> {
        PageType::ALL
            .into_iter()
            .find(|&t| self.page_types.get(t).iter().any(|u| u == url))
    }
}

/// The `k` highest-scoring URLs, score descending, URL ascending on ties.
#[must_use]
pub fn rank_top_k(graph: &LinkGraph, scores: &[f64], k: usize) -> Vec<String> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[b]
            .total_cmp(&scores[a])
            .then_with(|| graph.url(a).cmp(graph.url(b)))
    });
    order
        .into_iter()
        .take(k)
        .map(|i| graph.url(i).to_string())
        .collect()
}

fn by_url<T: Copy>(graph: &LinkGraph, values: &[T]) -> BTreeMap<String, T> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (graph.url(i).to_string(), *v))
        .collect()
}
