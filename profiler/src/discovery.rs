//! Named graph discovery.

use tracing::info;

use crate::client::EndpointClient;
use crate::endpoint::GraphTarget;
use crate::error::ClientError;
use crate::model::Term;

/// Selects every named graph holding at least one triple.
pub const DISCOVERY_QUERY: &str = "SELECT DISTINCT ?graph WHERE { GRAPH ?graph {?s ?p ?o} }";

/// Resolves the graphs to profile.
///
/// With a `focus_graph`, returns just that graph without contacting the
/// endpoint. Otherwise runs [`DISCOVERY_QUERY`] and returns the graphs in
/// the order the endpoint listed them.
///
/// # Errors
///
/// Returns the client error if the discovery query fails.
pub fn discover(
    client: &dyn EndpointClient,
    focus_graph: Option<&str>,
) -> Result<Vec<GraphTarget>, ClientError> {
    if let Some(graph) = focus_graph {
        return Ok(vec![GraphTarget::Named(graph.to_string())]);
    }

    let results = client.select(DISCOVERY_QUERY)?;
    let graphs: Vec<GraphTarget> = results
        .values("graph")
        .filter_map(|term| match term {
            Term::Iri(iri) => Some(GraphTarget::Named(iri.clone())),
            // some stores report graph names as plain literals
            Term::Literal(lit) => Some(GraphTarget::Named(lit.value.clone())),
            Term::BlankNode(_) => None,
        })
        .collect();

    info!(count = graphs.len(), "Discovered named graphs");
    Ok(graphs)
}
