//! Endpoint client boundary.
//!
//! The engine only needs two operations from an endpoint: a SELECT returning
//! tabular bindings (used for graph discovery) and a CONSTRUCT returning
//! triples (used by every profiling query). [`HttpEndpointClient`] speaks the
//! SPARQL 1.1 protocol over HTTP; tests substitute in-memory stubs.

mod http;
pub mod parse;

use std::collections::BTreeMap;
use std::fmt;

pub use http::HttpEndpointClient;

use crate::error::ClientError;
use crate::model::{Term, Triple};

/// Trait for SPARQL endpoint clients.
///
/// Calls are blocking: each returns once the endpoint has answered or the
/// transport has given up.
pub trait EndpointClient {
    /// Executes a SELECT query and returns its bindings.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport, status, or parse failure.
    fn select(&self, query: &str) -> Result<SelectResults, ClientError>;

    /// Executes a CONSTRUCT query and returns the resulting triples.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] on transport, status, or parse failure.
    fn construct(&self, query: &str) -> Result<Vec<Triple>, ClientError>;
}

impl<C: EndpointClient + ?Sized> EndpointClient for &C {
    fn select(&self, query: &str) -> Result<SelectResults, ClientError> {
        (**self).select(query)
    }

    fn construct(&self, query: &str) -> Result<Vec<Triple>, ClientError> {
        (**self).construct(query)
    }
}

/// Serialization requested from the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    /// SPARQL 1.1 Query Results JSON (SELECT).
    Json,
    /// Turtle (CONSTRUCT).
    Turtle,
}

impl ResultFormat {
    /// Returns the media type sent in the `Accept` header.
    #[must_use]
    pub fn media_type(self) -> &'static str {
        match self {
            ResultFormat::Json => "application/sparql-results+json",
            ResultFormat::Turtle => "text/turtle",
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultFormat::Json => f.write_str("SPARQL JSON"),
            ResultFormat::Turtle => f.write_str("Turtle"),
        }
    }
}

/// Tabular results of a SELECT query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectResults {
    /// Projected variable names, in query order.
    pub variables: Vec<String>,
    /// One map per solution; unbound variables are absent.
    pub bindings: Vec<BTreeMap<String, Term>>,
}

impl SelectResults {
    /// Iterates over the values bound to `var`, in solution order.
    pub fn values<'a>(&'a self, var: &'a str) -> impl Iterator<Item = &'a Term> + 'a {
        self.bindings.iter().filter_map(move |row| row.get(var))
    }
}
