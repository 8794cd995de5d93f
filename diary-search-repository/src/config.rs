//! Configuration for the search store.

use aws_config::SdkConfig;
use url::Url;

/// Default index name for the demo.
pub const DEFAULT_INDEX: &str = "diary";

/// Default AWS service name for managed Elasticsearch domains.
pub const DEFAULT_SERVICE: &str = "es";

/// Transport authentication mode.
#[derive(Debug, Clone)]
pub enum StoreAuth {
    /// No request signing (local clusters, tests).
    None,
    /// Sign every request with SigV4 using the loaded SDK configuration.
    AwsSigV4(SdkConfig),
}

/// Configuration for connecting to the search store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// The store endpoint URL.
    pub endpoint: Url,
    /// Index the store operates on.
    pub index: String,
    /// AWS service name used for signature scoping.
    pub service: String,
    /// Transport authentication.
    pub auth: StoreAuth,
}

impl StoreConfig {
    /// Create a configuration for the given endpoint with the default
    /// index, service name, and no signing.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            index: DEFAULT_INDEX.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            auth: StoreAuth::None,
        }
    }

    /// Set the index to operate on.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    /// Set the AWS service name used for signature scoping.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Route every request through SigV4 signing backed by the given SDK
    /// configuration.
    pub fn with_aws_auth(mut self, sdk_config: SdkConfig) -> Self {
        self.auth = StoreAuth::AwsSigV4(sdk_config);
        self
    }
}
