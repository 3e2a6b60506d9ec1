//! Link-structure metrics for the page graph.
//!
//! # Overview
//!
//! Each metric answers a different question about page importance:
//!
//! - **PageRank** (`pagerank`): Which pages are linked to by other
//!   important pages?
//! - **HITS** (`hits`): Which pages are good link lists (hubs) and which are
//!   good link targets (authorities)?
//! - **Betweenness centrality** (`betweenness`): Which pages bridge
//!   otherwise separate parts of the site?
//! - **Degree** (`basic`): How many links in and out?
//!
//! # Usage
//!
//! Every metric is a pure function of a [`crate::graph::LinkGraph`] (and its
//! config) and returns vectors indexed by node index. The three engines share
//! nothing mutable, so they can run concurrently.
//!
//! ```rust
//! use linkrank_core::graph::LinkGraph;
//! use linkrank_core::metrics::{basic::centrality, hits::{hits, HitsConfig}};
//! use linkrank_core::metrics::pagerank::{pagerank, PageRankConfig};
//! use linkrank_core::record::PageRecord;
//!
//! let g = LinkGraph::from_records(&[PageRecord::new("a").with_links(["b"])])?;
//!
//! let pr = pagerank(&g, &PageRankConfig::default())?;
//! let h = hits(&g, &HitsConfig::default())?;
//! let c = centrality(&g);
//! assert!((pr.scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);
//! assert_eq!(h.authorities.len(), 2);
//! assert_eq!(c.in_degree, vec![0, 1]);
//! # Ok::<(), linkrank_core::AnalysisError>(())
//! ```

pub mod basic;
pub mod betweenness;
pub mod hits;
pub mod pagerank;
