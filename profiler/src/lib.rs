//! Descriptive metadata profiling for SPARQL endpoints.
//!
//! The `sparql-profiler` crate discovers the named graphs of an endpoint,
//! runs analysis queries against each of them and accumulates the results
//! into one metadata document (HCLS dataset descriptions and VoID
//! statistics), ready to be serialized as Turtle or N-Triples.
//!
//! # Entry Point
//!
//! ```no_run
//! use sparql_profiler::{
//!     EmbeddedTemplates, Endpoint, HttpEndpointClient, MetadataDocument, ProfileRequest, Profiler,
//! };
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let endpoint = Endpoint::new("https://bio2rdf.org/sparql")?;
//! let client = HttpEndpointClient::new(endpoint.clone(), Duration::from_secs(300))?;
//! let mut document = MetadataDocument::new();
//! let report = Profiler::new(&client, &EmbeddedTemplates)
//!     .profile(&ProfileRequest::new(endpoint), &mut document)?;
//! println!("{} triples, {} failed queries", document.len(), report.failure_count());
//! # Ok(())
//! # }
//! ```
//!
//! # Serialization
//!
//! ```
//! let document = sparql_profiler::MetadataDocument::new();
//! let turtle = sparql_profiler::serializer::turtle::to_turtle(&document);
//! let ntriples = sparql_profiler::serializer::ntriples::to_ntriples(&document);
//! assert!(turtle.is_empty() && ntriples.is_empty());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod client;
pub mod config;
pub mod dataset;
pub mod discovery;
pub mod document;
pub mod endpoint;
pub mod engine;
pub mod error;
pub mod model;
pub mod namespaces;
pub mod report;
pub mod resolver;
pub mod serializer;
pub mod strategy;
pub mod templates;

pub use client::{EndpointClient, HttpEndpointClient, ResultFormat, SelectResults};
pub use config::ProfilerConfig;
pub use dataset::{describe_dataset, DatasetDescription};
pub use document::MetadataDocument;
pub use endpoint::{Endpoint, GraphTarget};
pub use engine::{ProfileRequest, Profiler};
pub use error::{ClientError, ProfilingError, Result};
pub use model::{Literal, Term, Triple};
pub use report::{OutcomeStatus, ProfileReport, QueryOutcome};
pub use strategy::{ProfilerKind, ProfilingStrategy};
pub use templates::{DirectoryTemplates, EmbeddedTemplates, QueryTemplate, TemplateStore};
