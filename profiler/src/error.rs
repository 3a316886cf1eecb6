//! Error types for the profiling engine.

use thiserror::Error;

use crate::client::ResultFormat;

/// Errors raised by an [`EndpointClient`](crate::client::EndpointClient).
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport failed (connection refused, timeout, TLS, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder if it could not be read.
        message: String,
    },

    /// The response body could not be parsed in the requested format.
    #[error("failed to parse {format} response: {reason}")]
    Parse {
        /// Format that was requested from the endpoint.
        format: ResultFormat,
        /// Parser message.
        reason: String,
    },

    /// Any other client failure.
    #[error("{0}")]
    Other(String),
}

/// Fatal errors that abort a profiling run.
#[derive(Error, Debug)]
pub enum ProfilingError {
    /// The profiler selector does not name a known strategy.
    #[error("unknown profiler '{0}' (expected one of: aggregate, hcls, bio2rdf)")]
    UnknownProfiler(String),

    /// The endpoint URL is empty or not absolute.
    #[error("invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),

    /// The graph discovery query failed.
    #[error("graph discovery failed on {endpoint}: {source}")]
    Discovery {
        /// Normalized endpoint URL.
        endpoint: String,
        /// Underlying client error.
        #[source]
        source: ClientError,
    },

    /// Query templates for a profiler kind could not be loaded.
    #[error("failed to load query templates for '{kind}': {reason}")]
    Template {
        /// Profiler kind whose templates were requested.
        kind: String,
        /// What went wrong.
        reason: String,
    },

    /// The configuration file is unreadable or malformed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ProfilingError>;
