//! OpenSearch store implementation.
//!
//! This module provides the concrete implementation of [`SearchStore`]
//! using the OpenSearch Rust client. When AWS auth is configured, the
//! transport signs every outgoing request with SigV4 before transmission,
//! so no caller ever sees an unsigned request leave the client.

use async_trait::async_trait;
use opensearch::http::request::JsonBody;
use opensearch::http::response::Response;
use opensearch::http::transport::{SingleNodeConnectionPool, TransportBuilder};
use opensearch::indices::{IndicesCreateParts, IndicesDeleteParts};
use opensearch::{BulkParts, IndexParts, OpenSearch, SearchParts};
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use crate::config::{StoreAuth, StoreConfig};
use crate::errors::SearchStoreError;
use crate::interfaces::SearchStore;
use crate::opensearch::index_config::settings_body;
use crate::opensearch::queries::term_query;
use crate::types::{IndexSettings, OperationOutcome};
use diary_search_shared::Note;

/// OpenSearch-backed search store.
///
/// # Example
///
/// ```ignore
/// let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
/// let config = StoreConfig::new(endpoint).with_aws_auth(sdk_config);
/// let store = OpenSearchStore::connect(config)?;
///
/// let outcome = store.create_index(&IndexSettings::default()).await?;
/// assert!(outcome.success);
/// ```
pub struct OpenSearchStore {
    client: OpenSearch,
    index: String,
}

impl OpenSearchStore {
    /// Connect to the store described by the configuration.
    ///
    /// Builds a single-node connection pool. With [`StoreAuth::AwsSigV4`]
    /// the transport is configured to sign every request using the
    /// credentials and region from the SDK configuration, scoped to the
    /// configured service name.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchStore)` - A connected store
    /// * `Err(SearchStoreError::AuthError)` - If the SDK configuration
    ///   lacks credentials or a region
    /// * `Err(SearchStoreError::ConnectionError)` - If the transport cannot
    ///   be built
    pub fn connect(config: StoreConfig) -> Result<Self, SearchStoreError> {
        let conn_pool = SingleNodeConnectionPool::new(config.endpoint.clone());
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        if let StoreAuth::AwsSigV4(sdk_config) = &config.auth {
            let credentials: opensearch::auth::Credentials =
                sdk_config.clone().try_into().map_err(|e| {
                    SearchStoreError::auth(format!(
                        "cannot derive signing credentials from SDK config: {}",
                        e
                    ))
                })?;
            builder = builder.auth(credentials).service_name(&config.service);
        }

        let transport = builder
            .build()
            .map_err(|e| SearchStoreError::connection(e.to_string()))?;

        info!(
            endpoint = %config.endpoint,
            index = %config.index,
            "Created OpenSearch store"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
            index: config.index,
        })
    }

    /// Convert a raw response into an operation outcome.
    ///
    /// A response is successful when the HTTP status is 2xx; bulk responses
    /// additionally require the body-level `errors` flag to be false.
    async fn outcome(response: Response) -> Result<OperationOutcome, SearchStoreError> {
        let status = response.status_code().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SearchStoreError::parse(format!("cannot read response body: {}", e)))?;
        let payload = match serde_json::from_str::<Value>(&body) {
            Ok(value) => value,
            Err(_) => Value::String(body),
        };

        if !(200..300).contains(&status) {
            let reason = payload
                .pointer("/error/reason")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("status {}", status));
            return Ok(OperationOutcome::failed(status, reason, payload));
        }

        if payload
            .get("errors")
            .and_then(Value::as_bool)
            .unwrap_or(false)
        {
            return Ok(OperationOutcome::failed(
                status,
                "bulk response reported item errors",
                payload,
            ));
        }

        Ok(OperationOutcome::ok(status, payload))
    }
}

#[async_trait]
impl SearchStore for OpenSearchStore {
    #[instrument(skip(self, settings), fields(index = %self.index))]
    async fn create_index(
        &self,
        settings: &IndexSettings,
    ) -> Result<OperationOutcome, SearchStoreError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index))
            .body(settings_body(settings))
            .send()
            .await
            .map_err(|e| SearchStoreError::request(e.to_string()))?;

        Self::outcome(response).await
    }

    #[instrument(skip(self, note), fields(index = %self.index, author = %note.author))]
    async fn index_note(&self, note: &Note) -> Result<OperationOutcome, SearchStoreError> {
        let response = self
            .client
            .index(IndexParts::Index(&self.index))
            .body(note)
            .send()
            .await
            .map_err(|e| SearchStoreError::request(e.to_string()))?;

        let outcome = Self::outcome(response).await?;
        debug!(id = ?outcome.document_id(), "Indexed note");
        Ok(outcome)
    }

    #[instrument(skip(self, notes), fields(index = %self.index, count = notes.len()))]
    async fn bulk_index_notes(
        &self,
        notes: &[Note],
    ) -> Result<OperationOutcome, SearchStoreError> {
        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(notes.len() * 2);
        for note in notes {
            body.push(json!({ "index": {} }).into());
            let source = serde_json::to_value(note)
                .map_err(|e| SearchStoreError::serialization(e.to_string()))?;
            body.push(source.into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchStoreError::request(e.to_string()))?;

        Self::outcome(response).await
    }

    #[instrument(skip(self), fields(index = %self.index))]
    async fn search_notes(
        &self,
        field: &str,
        value: &str,
    ) -> Result<OperationOutcome, SearchStoreError> {
        let query = term_query(field, value);
        debug!(query = %query, "Executing term query");

        let response = self
            .client
            .search(SearchParts::Index(&[self.index.as_str()]))
            .body(query)
            .send()
            .await
            .map_err(|e| SearchStoreError::request(e.to_string()))?;

        Self::outcome(response).await
    }

    #[instrument(skip(self), fields(index = %self.index))]
    async fn delete_index(&self) -> Result<OperationOutcome, SearchStoreError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[self.index.as_str()]))
            .send()
            .await
            .map_err(|e| SearchStoreError::request(e.to_string()))?;

        Self::outcome(response).await
    }
}
