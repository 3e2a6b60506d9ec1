//! Crawl records consumed by the graph builder.

use serde::{Deserialize, Serialize};

/// One crawled page as handed over by the crawl-data collaborator.
///
/// URLs are opaque identifiers. Two spellings of the same address produce two
/// distinct nodes; normalization happens upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    #[serde(default)]
    pub outbound_links: Vec<String>,
    /// Page this one was discovered from. Adds the implicit edge
    /// `parent_url → url`.
    #[serde(default)]
    pub parent_url: Option<String>,
}

impl PageRecord {
    /// A record with no links and no parent.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outbound_links: Vec::new(),
            parent_url: None,
        }
    }

    /// Append outbound links.
    #[must_use]
    pub fn with_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outbound_links.extend(links.into_iter().map(Into::into));
        self
    }

    /// Set the parent URL.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_url = Some(parent.into());
        self
    }
}
