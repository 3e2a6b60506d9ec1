#![forbid(unsafe_code)]
//! linkrank-core library.
//!
//! Builds a directed page graph from crawl records and scores it with
//! PageRank, HITS and betweenness centrality, then assigns every page a
//! structural role (cornerstone, hub, authority, leaf, orphan).
//!
//! # Conventions
//!
//! - **Errors**: Use [`error::Result`] (a `thiserror` enum) for return types.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//!
//! # Pipeline
//!
//! ```text
//! [PageRecord]
//!        ↓  graph::LinkGraph::from_records()
//! LinkGraph (immutable, dense node indices)
//!        ↓  metrics::{pagerank, hits, centrality}   (independent)
//! per-node score vectors
//!        ↓  classify::PageTypeClassifier::classify()
//! PageType per node
//!        ↓  report::GraphAnalysisReport::assemble()
//! GraphAnalysisReport (URL-keyed, top-K views)
//! ```
//!
//! [`analyze`] runs the whole pipeline.

pub mod analyze;
pub mod classify;
pub mod config;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod record;
pub mod report;

pub use analyze::{analyze, analyze_graph};
pub use classify::{PageType, PageTypeClassifier};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, ConvergenceWarning, Result};
pub use graph::{GraphStats, LinkGraph};
pub use record::PageRecord;
pub use report::GraphAnalysisReport;
