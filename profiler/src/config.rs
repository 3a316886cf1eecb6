//! Run configuration, loadable from TOML.
//!
//! ```toml
//! endpoint = "https://bio2rdf.org/sparql"
//! profiler = "bio2rdf"
//! timeout_secs = 600
//! exclude_graphs = ["http://www.openlinksw.com/schemas/virtrdf#"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::endpoint::Endpoint;
use crate::engine::ProfileRequest;
use crate::error::{ProfilingError, Result};
use crate::strategy::ProfilingStrategy;

/// Endpoint profiled when none is given.
pub const DEFAULT_ENDPOINT: &str = "https://graphdb.dumontierlab.com/repositories/umids-kg";

/// Per-request timeout when none is given, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Bookkeeping graphs of OpenLink Virtuoso that carry no dataset content.
pub const VIRTUOSO_SYSTEM_GRAPHS: &[&str] = &[
    "http://www.openlinksw.com/schemas/virtrdf#",
    "b3sonto",
    "http://localhost:8890/sparql",
    "http://localhost:8890/DAV/",
    "b3sifp",
    "urn:rules.skos",
    "http://www.openlinksw.com/schemas/oplweb#",
    "virtrdf-label",
    "facets",
];

/// Settings for one profiling run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfilerConfig {
    /// Endpoint URL.
    pub endpoint: String,
    /// Profile only this graph.
    pub graph: Option<String>,
    /// Distribution IRI standing in for the default graph.
    pub dataset_uri: Option<String>,
    /// Profiler selector: `aggregate`, `hcls` or `bio2rdf`.
    pub profiler: String,
    /// Directory holding `<kind>/*.rq` templates, replacing the built-in ones.
    pub queries: Option<PathBuf>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Graphs to leave out of the profile.
    pub exclude_graphs: Vec<String>,
    /// Also leave out [`VIRTUOSO_SYSTEM_GRAPHS`].
    pub skip_system_graphs: bool,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            graph: None,
            dataset_uri: None,
            profiler: ProfilingStrategy::default().as_str().to_string(),
            queries: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            exclude_graphs: Vec::new(),
            skip_system_graphs: false,
        }
    }
}

impl ProfilerConfig {
    /// Parses a configuration from TOML text. Missing keys take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilingError::Config`] on malformed TOML or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ProfilingError::Config(e.to_string()))
    }

    /// Reads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilingError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| ProfilingError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
            .map_err(|e| ProfilingError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Graphs to exclude, including the Virtuoso system graphs when asked.
    #[must_use]
    pub fn exclusions(&self) -> Vec<String> {
        let mut graphs = self.exclude_graphs.clone();
        if self.skip_system_graphs {
            for graph in VIRTUOSO_SYSTEM_GRAPHS {
                if !graphs.iter().any(|g| g == graph) {
                    graphs.push((*graph).to_string());
                }
            }
        }
        graphs
    }

    /// Checks the profiler selector and endpoint URL and builds the
    /// request. Touches no network.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilingError::UnknownProfiler`] or
    /// [`ProfilingError::InvalidEndpoint`].
    pub fn validate(&self) -> Result<ProfileRequest> {
        let strategy: ProfilingStrategy = self.profiler.parse()?;
        let endpoint = Endpoint::new(&self.endpoint)?;
        Ok(ProfileRequest {
            endpoint,
            graph: self.graph.clone().filter(|g| !g.trim().is_empty()),
            distribution_uri: self.dataset_uri.clone().filter(|d| !d.trim().is_empty()),
            strategy,
            exclude_graphs: self.exclusions(),
        })
    }
}
