//! Profiling strategies.
//!
//! - **Aggregate**: one CONSTRUCT per graph computing typed-relation
//!   cardinalities server-side.
//! - **Template sequence**: every template of a [`ProfilerKind`], resolved
//!   and executed one after the other.
//!
//! Both produce one [`QueryRun`] per executed query. Failures stay inside
//! the run; the engine decides what to merge and what to log.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, warn};

use crate::client::EndpointClient;
use crate::endpoint::GraphTarget;
use crate::error::{ClientError, ProfilingError};
use crate::model::Triple;
use crate::resolver::{self, QUERY_PREFIXES};
use crate::templates::QueryTemplate;

/// Identifier of the single aggregate query in logs and reports.
pub const AGGREGATE_QUERY_NAME: &str = "aggregate";

/// A template collection and its placeholder rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfilerKind {
    /// HCLS descriptive statistics; graph-scoped placeholders.
    Hcls,
    /// Bio2RDF dataset metadata; namespace-fragment placeholder.
    Bio2rdf,
}

impl ProfilerKind {
    /// Returns the selector string, also the template directory name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProfilerKind::Hcls => "hcls",
            ProfilerKind::Bio2rdf => "bio2rdf",
        }
    }
}

/// How the queries for one graph are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProfilingStrategy {
    /// A single aggregate CONSTRUCT per graph.
    #[default]
    Aggregate,
    /// The ordered templates of a profiler kind.
    TemplateSequence(ProfilerKind),
}

impl ProfilingStrategy {
    /// Returns the selector string that parses back to this strategy.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProfilingStrategy::Aggregate => "aggregate",
            ProfilingStrategy::TemplateSequence(kind) => kind.as_str(),
        }
    }

    /// Returns the template kind, if this strategy uses templates.
    #[must_use]
    pub fn kind(self) -> Option<ProfilerKind> {
        match self {
            ProfilingStrategy::Aggregate => None,
            ProfilingStrategy::TemplateSequence(kind) => Some(kind),
        }
    }
}

impl fmt::Display for ProfilingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfilingStrategy {
    type Err = ProfilingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aggregate" | "optimized" => Ok(ProfilingStrategy::Aggregate),
            "hcls" => Ok(ProfilingStrategy::TemplateSequence(ProfilerKind::Hcls)),
            "bio2rdf" => Ok(ProfilingStrategy::TemplateSequence(ProfilerKind::Bio2rdf)),
            _ => Err(ProfilingError::UnknownProfiler(s.to_string())),
        }
    }
}

/// One executed query and what came back.
#[derive(Debug)]
pub struct QueryRun {
    /// Template name, or [`AGGREGATE_QUERY_NAME`].
    pub query: String,
    /// The exact text sent to the endpoint.
    pub text: String,
    /// Returned triples, or the failure.
    pub result: Result<Vec<Triple>, ClientError>,
}

/// Builds the aggregate CONSTRUCT for `graph`.
///
/// Groups every `(predicate, subject type, object type)` combination and
/// counts distinct subjects and objects. Each combination gets its own
/// property partition, holding exactly one subject and one object class
/// partition. `dataset_iri` is the resource the
/// partitions hang off when `graph` is the default graph.
#[must_use]
pub fn aggregate_query(graph: &GraphTarget, dataset_iri: &str) -> String {
    let dataset = graph.iri().unwrap_or(dataset_iri);
    let (open, close) = match graph.iri() {
        Some(iri) => (format!("GRAPH <{}> {{", iri), "}"),
        None => (String::new(), ""),
    };

    format!(
        "{prefixes}CONSTRUCT {{
  <{dataset}> a void:Dataset ;
    void:propertyPartition ?propertyPartition .
  ?propertyPartition void:property ?p ;
    void:classPartition ?subjectPartition ;
    void-ext:objectClassPartition ?objectPartition .
  ?subjectPartition void:class ?stype ;
    void:distinctSubjects ?subjects .
  ?objectPartition void:class ?otype ;
    void:distinctObjects ?objects .
}}
WHERE {{
  {{
    SELECT ?p ?stype ?otype
      (COUNT(DISTINCT ?s) AS ?subjects)
      (COUNT(DISTINCT ?o) AS ?objects)
    WHERE {{
      {open}
        ?s ?p ?o .
        ?s a ?stype .
        ?o a ?otype .
      {close}
    }}
    GROUP BY ?p ?stype ?otype
  }}
  BIND(MD5(CONCAT(STR(?p), \" \", STR(?stype), \" \", STR(?otype))) AS ?key)
  BIND(IRI(CONCAT(\"{dataset}/relation/\", ?key)) AS ?propertyPartition)
  BIND(IRI(CONCAT(STR(?propertyPartition), \"/subject\")) AS ?subjectPartition)
  BIND(IRI(CONCAT(STR(?propertyPartition), \"/object\")) AS ?objectPartition)
}}
",
        prefixes = QUERY_PREFIXES,
        dataset = dataset,
        open = open,
        close = close,
    )
}

impl ProfilingStrategy {
    /// Runs every query this strategy issues for `graph`.
    ///
    /// `templates` must be the templates of this strategy's kind (ignored
    /// by the aggregate strategy). `fallback_iri` names the default graph.
    pub fn run_graph(
        self,
        client: &dyn EndpointClient,
        graph: &GraphTarget,
        templates: &[QueryTemplate],
        fallback_iri: &str,
    ) -> Vec<QueryRun> {
        match self {
            ProfilingStrategy::Aggregate => {
                let text = aggregate_query(graph, fallback_iri);
                vec![execute(client, graph, AGGREGATE_QUERY_NAME, text)]
            }
            ProfilingStrategy::TemplateSequence(kind) => templates
                .iter()
                .map(|template| {
                    let text = resolver::resolve(&template.body, kind, graph, fallback_iri);
                    execute(client, graph, &template.name, text)
                })
                .collect(),
        }
    }
}

fn execute(client: &dyn EndpointClient, graph: &GraphTarget, name: &str, text: String) -> QueryRun {
    info!(query = %name, graph = %graph, "Running query");
    debug!(query = %name, "{}", text);
    let result = client.construct(&text);
    QueryRun {
        query: name.to_string(),
        text,
        result,
    }
}

/// Profiles `graph` with the aggregate query and returns its triples.
///
/// A failing query is logged and yields an empty set.
pub fn profile_graph_aggregate(
    client: &dyn EndpointClient,
    graph: &GraphTarget,
    dataset_iri: &str,
) -> BTreeSet<Triple> {
    collect(ProfilingStrategy::Aggregate.run_graph(client, graph, &[], dataset_iri), graph)
}

/// Profiles `graph` with every template of `kind` and returns the union of
/// their triples. Failing templates are logged and skipped.
pub fn profile_graph_templates(
    client: &dyn EndpointClient,
    graph: &GraphTarget,
    kind: ProfilerKind,
    templates: &[QueryTemplate],
    fallback_iri: &str,
) -> BTreeSet<Triple> {
    collect(
        ProfilingStrategy::TemplateSequence(kind).run_graph(client, graph, templates, fallback_iri),
        graph,
    )
}

fn collect(runs: Vec<QueryRun>, graph: &GraphTarget) -> BTreeSet<Triple> {
    let mut triples = BTreeSet::new();
    for run in runs {
        match run.result {
            Ok(found) => triples.extend(found),
            Err(e) => warn!(query = %run.query, graph = %graph, error = %e, "Query failed"),
        }
    }
    triples
}
