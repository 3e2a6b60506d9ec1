//! Link graph module.
//!
//! # Overview
//!
//! Builds the immutable directed page graph every metric engine reads.
//!
//! ## Pipeline
//!
//! ```text
//! [PageRecord] (url, outbound_links, parent_url)
//!        ↓  build::LinkGraph::from_records()
//! LinkGraph (DiGraph<String, ()>, dense indices, cached degrees)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, components, dangling count, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use linkrank_core::graph::{GraphStats, LinkGraph};
//! use linkrank_core::record::PageRecord;
//!
//! let records = vec![
//!     PageRecord::new("https://a.test/").with_links(["https://a.test/about"]),
//!     PageRecord::new("https://a.test/about").with_parent("https://a.test/"),
//! ];
//! let graph = LinkGraph::from_records(&records)?;
//! let stats = GraphStats::from_graph(&graph);
//! assert_eq!(stats.node_count, 2);
//! assert_eq!(stats.edge_count, 1);
//! # Ok::<(), linkrank_core::AnalysisError>(())
//! ```

pub mod build;
pub mod stats;

pub use build::LinkGraph;
pub use stats::GraphStats;
