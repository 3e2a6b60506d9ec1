//! End-to-end analysis: records → graph → metrics → roles → report.
//!
//! PageRank, HITS and centrality only read the graph, so with
//! `config.parallel` they run on scoped threads, each owning its output.
//! Results are identical either way.

use std::thread;

use tracing::{info, instrument, warn};

use crate::classify::{NodeMetrics, PageTypeClassifier};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::graph::LinkGraph;
use crate::metrics::basic::{CentralityResult, centrality};
use crate::metrics::hits::{HitsResult, hits};
use crate::metrics::pagerank::{PageRankResult, pagerank};
use crate::record::PageRecord;
use crate::report::GraphAnalysisReport;

/// Build the graph from `records` and analyze it.
///
/// # Errors
///
/// - [`crate::AnalysisError::InvalidConfiguration`] if `config` is out of range.
/// - [`crate::AnalysisError::GraphConstruction`] if `records` is empty.
#[instrument(skip(records, config), fields(records = records.len()))]
pub fn analyze(records: &[PageRecord], config: &AnalysisConfig) -> Result<GraphAnalysisReport> {
    config.validate()?;
    let graph = LinkGraph::from_records(records)?;
    analyze_graph(&graph, config)
}

/// Analyze an already-built graph.
///
/// # Errors
///
/// Returns [`crate::AnalysisError::InvalidConfiguration`] if `config` is out
/// of range.
#[instrument(skip(graph, config), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn analyze_graph(graph: &LinkGraph, config: &AnalysisConfig) -> Result<GraphAnalysisReport> {
    config.validate()?;

    let (pr, hr, cr) = if config.parallel {
        run_parallel(graph, config)?
    } else {
        (
            pagerank(graph, &config.pagerank)?,
            hits(graph, &config.hits)?,
            centrality(graph),
        )
    };

    let metrics: Vec<NodeMetrics> = (0..graph.node_count())
        .map(|i| NodeMetrics {
            pagerank: pr.scores[i],
            hub: hr.hubs[i],
            authority: hr.authorities[i],
            in_degree: cr.in_degree[i],
            out_degree: cr.out_degree[i],
        })
        .collect();
    let roles = PageTypeClassifier::default().classify(&metrics);

    let report = GraphAnalysisReport::assemble(graph, config, &pr, &hr, &cr, &roles);

    for warning in &report.warnings {
        warn!(%warning, "returning best-effort scores");
    }
    info!(
        nodes = report.graph_stats.node_count,
        edges = report.graph_stats.edge_count,
        cornerstone = report.page_types.cornerstone.len(),
        hub = report.page_types.hub.len(),
        authority = report.page_types.authority.len(),
        leaf = report.page_types.leaf.len(),
        orphan = report.page_types.orphan.len(),
        "link graph analysis complete"
    );

    Ok(report)
}

fn run_parallel(
    graph: &LinkGraph,
    config: &AnalysisConfig,
) -> Result<(PageRankResult, HitsResult, CentralityResult)> {
    thread::scope(|s| -> Result<_> {
        let pr = s.spawn(|| pagerank(graph, &config.pagerank));
        let hr = s.spawn(|| hits(graph, &config.hits));
        let cr = centrality(graph);

        let pr = pr.join().unwrap_or_else(|e| std::panic::resume_unwind(e));
        let hr = hr.join().unwrap_or_else(|e| std::panic::resume_unwind(e));
        Ok((pr?, hr?, cr))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::PageType;
    use crate::error::AnalysisError;

    fn site() -> Vec<PageRecord> {
        vec![
            PageRecord::new("/").with_links(["/a", "/b", "/c"]),
            PageRecord::new("/a").with_links(["/", "/b"]),
            PageRecord::new("/b").with_links(["/"]),
            PageRecord::new("/c").with_links(["/", "/ext"]),
            PageRecord::new("/lonely").with_links(["/"]),
        ]
    }

    #[test]
    fn empty_records_fail() {
        let err = analyze(&[], &AnalysisConfig::default()).expect_err("must fail");
        assert!(matches!(err, AnalysisError::GraphConstruction(_)));
    }

    #[test]
    fn invalid_config_fails_before_building() {
        let config = AnalysisConfig {
            top_k: 0,
            ..AnalysisConfig::default()
        };
        let err = analyze(&site(), &config).expect_err("must fail");
        assert!(matches!(err, AnalysisError::InvalidConfiguration(_)));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let parallel = analyze(&site(), &AnalysisConfig::default()).expect("analyze");
        let sequential = analyze(
            &site(),
            &AnalysisConfig {
                parallel: false,
                ..AnalysisConfig::default()
            },
        )
        .expect("analyze");
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn every_node_gets_exactly_one_role() {
        let report = analyze(&site(), &AnalysisConfig::default()).expect("analyze");
        let total: usize = report.page_types.counts().iter().map(|(_, c)| c).sum();
        assert_eq!(total, report.graph_stats.node_count);
        assert_eq!(report.page_type_of("/lonely"), Some(PageType::Orphan));
        assert_eq!(report.top_k.pagerank[0], "/");
    }

    #[test]
    fn report_has_no_negative_zero() {
        let records = [PageRecord::new("a").with_links(["b"])];
        let report = analyze(&records, &AnalysisConfig::default()).expect("analyze");
        let scores = report
            .pagerank
            .values()
            .chain(report.hits.hub.values())
            .chain(report.hits.authority.values())
            .chain(report.centrality.betweenness.values());
        for score in scores {
            assert!(score.is_sign_positive(), "{score}");
        }
        let json = serde_json::to_string(&report).expect("serialize");
        assert!(!json.contains(":-0.0"), "{json}");
    }

    #[test]
    fn report_covers_every_url() {
        let report = analyze(&site(), &AnalysisConfig::default()).expect("analyze");
        for url in ["/", "/a", "/b", "/c", "/ext", "/lonely"] {
            assert!(report.pagerank.contains_key(url), "{url} missing");
            assert!(report.hits.hub.contains_key(url));
            assert!(report.centrality.betweenness.contains_key(url));
        }
        let total: f64 = report.pagerank.values().sum();
        assert!((total - 1.0).abs() < 1e-4);
    }
}
