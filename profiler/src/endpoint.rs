//! Endpoint coordinates and graph targets.

use std::fmt;

use crate::error::{ProfilingError, Result};

/// A SPARQL endpoint, identified by its normalized URL.
///
/// The URL is immutable for the duration of a run and doubles as the
/// resource IRI that dataset-level metadata is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    /// Creates an endpoint from a URL, normalizing it first.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilingError::InvalidEndpoint`] if the normalized URL is
    /// empty or has no scheme.
    pub fn new(url: &str) -> Result<Self> {
        let url = normalize_url(url.trim());
        if url.is_empty() || !url.contains("://") {
            return Err(ProfilingError::InvalidEndpoint(url));
        }
        Ok(Self { url })
    }

    /// Returns the normalized URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Strips trailing `/` characters, then trailing `#` characters.
#[must_use]
pub fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').trim_end_matches('#').to_owned()
}

/// The graph a profiling query is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GraphTarget {
    /// A named graph inside the endpoint.
    Named(String),
    /// The whole endpoint, without a `GRAPH` scope.
    Default,
}

impl GraphTarget {
    /// Returns the graph IRI, or `None` for the whole-endpoint sentinel.
    #[must_use]
    pub fn iri(&self) -> Option<&str> {
        match self {
            GraphTarget::Named(iri) => Some(iri),
            GraphTarget::Default => None,
        }
    }
}

impl fmt::Display for GraphTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphTarget::Named(iri) => f.write_str(iri),
            GraphTarget::Default => f.write_str("(default graph)"),
        }
    }
}
