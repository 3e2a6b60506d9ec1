//! Error taxonomy for the analysis engine.
//!
//! Fatal conditions are [`AnalysisError`] variants. Non-convergence is not an
//! error: it is surfaced as a [`ConvergenceWarning`] on the report next to a
//! best-effort ranking.

use std::fmt;

use serde::Serialize;

/// Fatal analysis errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// The graph could not be built (the record set was empty).
    #[error("cannot build link graph: {0}")]
    GraphConstruction(String),

    /// A configuration value is out of its legal range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A configuration document could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(String),
}

impl AnalysisError {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::GraphConstruction(_) => "E2001",
            Self::InvalidConfiguration(_) => "E1001",
            Self::ConfigParse(_) => "E1002",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::GraphConstruction(_) => {
                Some("Provide at least one page record (a JSON array of {url, outbound_links}).")
            }
            Self::InvalidConfiguration(_) => Some(
                "Damping must lie in (0, 1); tolerance must be positive; max_iter and top_k must be at least 1.",
            ),
            Self::ConfigParse(_) => Some("Fix the TOML syntax in the config file and retry."),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Which iterative engine a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    PageRank,
    Hits,
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageRank => write!(f, "pagerank"),
            Self::Hits => write!(f, "hits"),
        }
    }
}

/// An engine hit its iteration cap before the residual dropped below the
/// tolerance. The scores it returned are the last computed vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceWarning {
    pub engine: Engine,
    /// Iterations performed (equals the configured cap).
    pub iterations: usize,
    /// L1 distance between the last two vectors.
    pub residual: f64,
}

impl fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} did not converge after {} iterations (residual {:.3e})",
            self.engine, self.iterations, self.residual
        )
    }
}
