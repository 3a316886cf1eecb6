//! The profiling engine.
//!
//! One invocation walks `INIT → DISCOVERING → PROFILING → FINALIZING → DONE`.
//! Only template loading and graph discovery can abort a run; a failing
//! profiling query is recorded in the [`ProfileReport`] and the run moves on.

use chrono::NaiveDate;
use tracing::{debug, info, info_span, warn};

use crate::client::EndpointClient;
use crate::discovery;
use crate::document::MetadataDocument;
use crate::endpoint::{Endpoint, GraphTarget};
use crate::error::{ProfilingError, Result};
use crate::report::{ProfileReport, QueryOutcome};
use crate::strategy::ProfilingStrategy;
use crate::templates::TemplateStore;

/// Coordinates of one profiling run.
#[derive(Debug, Clone)]
pub struct ProfileRequest {
    /// Endpoint to profile.
    pub endpoint: Endpoint,
    /// Profile only this graph instead of discovering all of them.
    pub graph: Option<String>,
    /// Distribution IRI standing in for the default graph.
    pub distribution_uri: Option<String>,
    /// Strategy used for every graph.
    pub strategy: ProfilingStrategy,
    /// Discovered graphs to leave out.
    pub exclude_graphs: Vec<String>,
}

impl ProfileRequest {
    /// Creates a request profiling every graph of `endpoint` with the
    /// aggregate strategy.
    #[must_use]
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            graph: None,
            distribution_uri: None,
            strategy: ProfilingStrategy::default(),
            exclude_graphs: Vec::new(),
        }
    }

    /// Sets the focus graph.
    #[must_use]
    pub fn with_graph(mut self, graph: impl Into<String>) -> Self {
        self.graph = Some(graph.into());
        self
    }

    /// Sets the strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: ProfilingStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// IRI used for the default graph: the distribution IRI if given,
    /// else the endpoint URL.
    #[must_use]
    pub fn fallback_iri(&self) -> &str {
        self.distribution_uri
            .as_deref()
            .unwrap_or_else(|| self.endpoint.url())
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Runs profiling requests against one endpoint client.
pub struct Profiler<'a> {
    client: &'a dyn EndpointClient,
    templates: &'a dyn TemplateStore,
    clock: &'a dyn Fn() -> NaiveDate,
}

impl<'a> Profiler<'a> {
    /// Creates a profiler over `client`, reading templates from `templates`.
    /// Documents are stamped with the local date.
    pub fn new(client: &'a dyn EndpointClient, templates: &'a dyn TemplateStore) -> Self {
        Self {
            client,
            templates,
            clock: &local_today,
        }
    }

    /// Uses `clock` for the issue date instead of the local date.
    #[must_use]
    pub fn with_clock(mut self, clock: &'a dyn Fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// Profiles the endpoint of `request` into `document`.
    ///
    /// Every successful query is merged into `document`; the issue date is
    /// stamped once at the end. Failed queries only show up in the returned
    /// report and the logs.
    ///
    /// # Errors
    ///
    /// Returns [`ProfilingError::Template`] if the strategy's templates
    /// cannot be loaded, and [`ProfilingError::Discovery`] if the graph
    /// discovery query fails. `document` is left untouched in both cases.
    pub fn profile(
        &self,
        request: &ProfileRequest,
        document: &mut MetadataDocument,
    ) -> Result<ProfileReport> {
        let span = info_span!("profile", endpoint = %request.endpoint, profiler = %request.strategy);
        let _enter = span.enter();

        let templates = match request.strategy.kind() {
            Some(kind) => self.templates.templates(kind)?,
            None => Vec::new(),
        };
        debug!(count = templates.len(), "Loaded query templates");

        let discovered = discovery::discover(self.client, request.graph.as_deref()).map_err(
            |source| ProfilingError::Discovery {
                endpoint: request.endpoint.url().to_string(),
                source,
            },
        )?;

        let mut report = ProfileReport::new();
        let graphs = select_graphs(discovered, &request.exclude_graphs, &mut report);
        let fallback = request.fallback_iri();

        for graph in graphs {
            let graph_span = info_span!("graph", graph = %graph);
            let _graph_enter = graph_span.enter();

            for run in request
                .strategy
                .run_graph(self.client, &graph, &templates, fallback)
            {
                match run.result {
                    Ok(triples) => {
                        let returned = triples.len();
                        let added = document.merge(triples);
                        info!(query = %run.query, returned, added, "Merged query results");
                        report.push(QueryOutcome::merged(graph.clone(), run.query, returned, added));
                    }
                    Err(e) => {
                        warn!(query = %run.query, error = %e, text = %run.text, "Query failed, skipping");
                        report.push(QueryOutcome::failed(graph.clone(), run.query, e.to_string()));
                    }
                }
            }
            report.graphs.push(graph);
        }

        document.finalize_on(&request.endpoint, (self.clock)());
        info!(
            graphs = report.graphs.len(),
            triples = document.len(),
            failures = report.failure_count(),
            "Profiling complete"
        );
        Ok(report)
    }
}

fn select_graphs(
    discovered: Vec<GraphTarget>,
    exclude: &[String],
    report: &mut ProfileReport,
) -> Vec<GraphTarget> {
    if discovered.is_empty() {
        warn!("No named graphs found, profiling the default graph");
        return vec![GraphTarget::Default];
    }

    let mut graphs = Vec::with_capacity(discovered.len());
    for graph in discovered {
        match graph.iri() {
            Some(iri) if exclude.iter().any(|e| e == iri) => {
                info!(graph = %iri, "Skipping excluded graph");
                report.skipped.push(iri.to_string());
            }
            _ => graphs.push(graph),
        }
    }
    graphs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(iri: &str) -> GraphTarget {
        GraphTarget::Named(iri.to_string())
    }

    #[test]
    fn empty_discovery_falls_back_to_default_graph() {
        let mut report = ProfileReport::new();
        let graphs = select_graphs(Vec::new(), &[], &mut report);
        assert_eq!(graphs, vec![GraphTarget::Default]);
    }

    #[test]
    fn excluded_graphs_are_reported() {
        let mut report = ProfileReport::new();
        let exclude = vec!["urn:b".to_string()];
        let graphs = select_graphs(vec![named("urn:a"), named("urn:b"), named("urn:c")], &exclude, &mut report);
        assert_eq!(graphs, vec![named("urn:a"), named("urn:c")]);
        assert_eq!(report.skipped, vec!["urn:b".to_string()]);
    }

    #[test]
    fn all_excluded_profiles_nothing() {
        let mut report = ProfileReport::new();
        let exclude = vec!["urn:a".to_string()];
        assert!(select_graphs(vec![named("urn:a")], &exclude, &mut report).is_empty());
    }
}
