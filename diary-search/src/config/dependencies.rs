//! Dependency initialization and wiring for the demo binary.

use std::sync::Arc;

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, Region};
use tracing::info;
use url::Url;

use crate::cli::Cli;
use crate::DemoError;
use diary_search_repository::{OpenSearchStore, StoreConfig};
use diary_search_signing::{resolve_credentials, RequestSigner, SignedHttpClient, SigningConfig};

/// Container for the initialized clients.
pub struct Dependencies {
    /// Signed HTTP client for the low-level statistics workflow.
    pub http: SignedHttpClient,
    /// Search store for the high-level demo workflow.
    pub store: Arc<OpenSearchStore>,
}

impl Dependencies {
    /// Initialize all dependencies from the parsed CLI.
    ///
    /// Loads the shared AWS configuration once and resolves credentials
    /// eagerly, so a misconfigured environment fails here, before any
    /// network call. Both workflows draw from the same provider chain.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized clients
    /// * `Err(DemoError)` - If the endpoint is malformed, no region can be
    ///   determined, or credential resolution fails
    pub async fn new(cli: &Cli) -> Result<Self, DemoError> {
        let endpoint = Url::parse(&cli.endpoint).map_err(|e| {
            DemoError::config(format!("invalid endpoint {}: {}", cli.endpoint, e))
        })?;

        let region_provider = match &cli.region {
            Some(region) => {
                RegionProviderChain::first_try(Region::new(region.clone())).or_default_provider()
            }
            None => RegionProviderChain::default_provider(),
        };
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let region = sdk_config
            .region()
            .map(|r| r.to_string())
            .ok_or_else(|| {
                DemoError::config("no AWS region configured; set --region or AWS_REGION")
            })?;

        // Fail fast on unresolvable credentials, before any transport use.
        let credentials = resolve_credentials(&sdk_config).await?;

        info!(
            endpoint = %endpoint,
            region = %region,
            service = %cli.service,
            index = %cli.index,
            "Initialized AWS configuration"
        );

        let signer = RequestSigner::new(
            credentials,
            SigningConfig::new(cli.service.clone(), region),
        );
        let http = SignedHttpClient::new(endpoint.clone(), signer);

        let store_config = StoreConfig::new(endpoint)
            .with_index(cli.index.clone())
            .with_service(cli.service.clone())
            .with_aws_auth(sdk_config);
        let store = OpenSearchStore::connect(store_config)?;

        Ok(Self {
            http,
            store: Arc::new(store),
        })
    }
}
