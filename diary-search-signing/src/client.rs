//! Signed HTTP client for the low-level workflow.
//!
//! Builds a request, signs it, and dispatches it over reqwest in a single
//! attempt. Success responses are decoded to text for display; failure
//! responses are mapped to a structured error carrying the status code and
//! status text.

use http::{header, Method, Request};
use tracing::debug;
use url::Url;

use crate::errors::SigningError;
use crate::signer::RequestSigner;

/// Query parameter asking the service for pretty-printed JSON.
pub const PRETTY_PARAM: (&str, &str) = ("pretty", "true");

/// Cluster statistics path.
pub const STATS_PATH: &str = "/_stats";

/// HTTP client that signs every request before dispatching it.
pub struct SignedHttpClient {
    http: reqwest::Client,
    signer: RequestSigner,
    endpoint: Url,
}

impl SignedHttpClient {
    /// Create a client bound to one endpoint.
    pub fn new(endpoint: Url, signer: RequestSigner) -> Self {
        Self {
            http: reqwest::Client::new(),
            signer,
            endpoint,
        }
    }

    /// Build an unsigned GET request for the given path and query
    /// parameters.
    ///
    /// The host header is attached here so it is part of the signed header
    /// set.
    pub fn build_get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Request<Vec<u8>>, SigningError> {
        let mut url = self.endpoint.join(path).map_err(|e| {
            SigningError::invalid_request(format!("cannot join path {}: {}", path, e))
        })?;
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let host = url
            .host_str()
            .ok_or_else(|| SigningError::invalid_request("endpoint has no host"))?;
        let host_value = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .header(header::HOST, host_value)
            .body(Vec::new())
            .map_err(|e| SigningError::invalid_request(e.to_string()))
    }

    /// Sign and dispatch a request, returning the decoded response body.
    ///
    /// One attempt, no retry. Non-success statuses are mapped to
    /// [`SigningError::Response`] with the status code and status text.
    pub async fn execute(&self, mut request: Request<Vec<u8>>) -> Result<String, SigningError> {
        self.signer.sign(&mut request)?;

        let request = reqwest::Request::try_from(request)
            .map_err(|e| SigningError::invalid_request(e.to_string()))?;
        debug!(url = %request.url(), "Dispatching signed request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| SigningError::transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SigningError::transport(format!("cannot read response body: {}", e)))?;

        if !status.is_success() {
            return Err(SigningError::Response {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
                body,
            });
        }

        Ok(body)
    }

    /// Fetch cluster statistics: a signed GET of `/_stats?pretty=true`.
    pub async fn fetch_stats(&self) -> Result<String, SigningError> {
        let request = self.build_get(STATS_PATH, &[PRETTY_PARAM])?;
        self.execute(request).await
    }
}
