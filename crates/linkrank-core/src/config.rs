//! Analysis configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! top_k = 10
//! normalize_betweenness = false
//! parallel = true
//!
//! [pagerank]
//! damping = 0.85
//! tolerance = 1e-6
//! max_iter = 100
//!
//! [hits]
//! tolerance = 1e-6
//! max_iter = 100
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};
use crate::metrics::hits::HitsConfig;
use crate::metrics::pagerank::PageRankConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub pagerank: PageRankConfig,
    #[serde(default)]
    pub hits: HitsConfig,
    /// Length of each ranked top-K list.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Report betweenness divided by `(n-1)(n-2)` instead of raw counts.
    #[serde(default)]
    pub normalize_betweenness: bool,
    /// Run PageRank, HITS and centrality on separate threads.
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pagerank: PageRankConfig::default(),
            hits: HitsConfig::default(),
            top_k: default_top_k(),
            normalize_betweenness: false,
            parallel: default_true(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a TOML document. Missing keys take their defaults. The result is
    /// not validated; call [`AnalysisConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::ConfigParse`] on malformed TOML or mistyped
    /// values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AnalysisError::ConfigParse(e.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfiguration`] if any engine config
    /// is out of range or `top_k` is zero.
    pub fn validate(&self) -> Result<()> {
        self.pagerank.validate()?;
        self.hits.validate()?;
        if self.top_k == 0 {
            return Err(AnalysisError::InvalidConfiguration(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

const fn default_top_k() -> usize {
    10
}

const fn default_true() -> bool {
    true
}
