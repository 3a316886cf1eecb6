//! Placeholder substitution for query templates.
//!
//! Substitution is plain text replacement. The placeholders recognised for
//! each kind are disjoint strings, so the order of replacement is irrelevant.

use std::sync::OnceLock;

use regex::Regex;

use crate::endpoint::GraphTarget;
use crate::strategy::ProfilerKind;

/// Prefix block prepended to every executed query.
pub const QUERY_PREFIXES: &str = "PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX dqv: <http://www.w3.org/ns/dqv#>
PREFIX hcls: <http://www.w3.org/hcls#>
PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>
PREFIX skos: <http://www.w3.org/2004/02/skos/core#>
PREFIX dctypes: <http://purl.org/dc/dcmitype/>
PREFIX dcat: <http://www.w3.org/ns/dcat#>
PREFIX void: <http://rdfs.org/ns/void#>
PREFIX void-ext: <http://ldf.fi/void-ext#>
";

/// Replaced by the namespace fragment of a Bio2RDF graph IRI.
pub const GRAPH_NAMESPACE: &str = "?_graph_namespace";
/// Replaced by the graph IRI (or the fallback IRI for the default graph).
pub const GRAPH_URI: &str = "?_graph_uri";
/// Replaced by `GRAPH <iri> {`, or nothing for the default graph.
pub const GRAPH_START: &str = "<?_graph_start>";
/// Replaced by `}`, or nothing for the default graph.
pub const GRAPH_END: &str = "<?_graph_end>";

fn bio2rdf_graph_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)http://bio2rdf\.org/(.*)_resource:bio2rdf\.dataset\.(.*)\.R[0-9]*")
            .unwrap_or_else(|e| unreachable!("invalid Bio2RDF graph pattern: {e}"))
    })
}

/// Extracts the namespace fragment from a Bio2RDF dataset graph IRI.
///
/// `http://bio2rdf.org/drugbank_resource:bio2rdf.dataset.drugbank.R3`
/// yields `drugbank`. Returns `None` when the IRI does not follow the
/// Bio2RDF release naming scheme.
#[must_use]
pub fn graph_namespace(graph_iri: &str) -> Option<&str> {
    bio2rdf_graph_pattern()
        .captures(graph_iri)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Substitutes the placeholders of `kind` in `template` for `graph` and
/// prepends [`QUERY_PREFIXES`].
///
/// `fallback_iri` stands in for the graph IRI when profiling the default
/// graph (usually the distribution IRI, else the endpoint URL).
///
/// For [`ProfilerKind::Bio2rdf`], a graph IRI that does not match the
/// Bio2RDF naming scheme leaves [`GRAPH_NAMESPACE`] in the query as is.
#[must_use]
pub fn resolve(template: &str, kind: ProfilerKind, graph: &GraphTarget, fallback_iri: &str) -> String {
    let body = match kind {
        ProfilerKind::Bio2rdf => match graph.iri().and_then(graph_namespace) {
            Some(namespace) => template.replace(GRAPH_NAMESPACE, namespace),
            None => template.to_owned(),
        },
        ProfilerKind::Hcls => match graph {
            GraphTarget::Named(iri) => template
                .replace(GRAPH_URI, iri)
                .replace(GRAPH_START, &format!("GRAPH <{}> {{", iri))
                .replace(GRAPH_END, "}"),
            GraphTarget::Default => template
                .replace(GRAPH_URI, fallback_iri)
                .replace(GRAPH_START, "")
                .replace(GRAPH_END, ""),
        },
    };

    let mut query = String::with_capacity(QUERY_PREFIXES.len() + body.len());
    query.push_str(QUERY_PREFIXES);
    query.push_str(&body);
    query
}
