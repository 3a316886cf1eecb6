use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use super::{parse, EndpointClient, ResultFormat, SelectResults};
use crate::endpoint::Endpoint;
use crate::error::ClientError;
use crate::model::Triple;

/// Blocking SPARQL protocol client.
///
/// Queries are sent as URL-encoded POST bodies, which every SPARQL 1.1
/// endpoint accepts regardless of query length.
pub struct HttpEndpointClient {
    client: Client,
    endpoint: Endpoint,
    /// Number of CONSTRUCT responses parsed; scopes their blank nodes.
    responses: AtomicUsize,
}

impl HttpEndpointClient {
    /// Creates a client for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the HTTP client cannot be built
    /// (e.g., TLS backend initialisation failure).
    pub fn new(endpoint: Endpoint, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("sparql-profiler/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            responses: AtomicUsize::new(0),
        })
    }

    /// Returns the endpoint this client queries.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn post(&self, query: &str, format: ResultFormat) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.endpoint.url())
            .header(ACCEPT, format.media_type())
            .form(&[("query", query)])
            .send()?;

        let status = response.status();
        if status.is_success() {
            Ok(response.text()?)
        } else {
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

impl EndpointClient for HttpEndpointClient {
    fn select(&self, query: &str) -> Result<SelectResults, ClientError> {
        let body = self.post(query, ResultFormat::Json)?;
        parse::parse_select_json(&body)
    }

    fn construct(&self, query: &str) -> Result<Vec<Triple>, ClientError> {
        let body = self.post(query, ResultFormat::Turtle)?;
        let scope = self.responses.fetch_add(1, Ordering::Relaxed);
        parse::parse_turtle(&body, scope)
    }
}
