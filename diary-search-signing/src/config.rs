//! Signing configuration.

use std::time::SystemTime;

/// Service name for AWS-managed Elasticsearch domains.
pub const DEFAULT_SERVICE: &str = "es";

/// Configuration for SigV4 request signing.
///
/// Holds the service name and region the signature is scoped to, plus an
/// optional fixed signing timestamp. When no timestamp is set the signer
/// reads the system clock at signing time.
#[derive(Debug, Clone)]
pub struct SigningConfig {
    /// AWS service name the signature is scoped to.
    pub service: String,
    /// AWS region the signature is scoped to.
    pub region: String,
    /// Fixed signing timestamp. `None` uses the system clock.
    pub signing_time: Option<SystemTime>,
}

impl SigningConfig {
    /// Create a signing configuration for the given service and region.
    pub fn new(service: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
            signing_time: None,
        }
    }

    /// Create a configuration scoped to the managed Elasticsearch service.
    pub fn elasticsearch(region: impl Into<String>) -> Self {
        Self::new(DEFAULT_SERVICE, region)
    }

    /// Pin the signing timestamp. Tests use this to make signatures
    /// deterministic.
    pub fn with_signing_time(mut self, time: SystemTime) -> Self {
        self.signing_time = Some(time);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elasticsearch_config() {
        let config = SigningConfig::elasticsearch("eu-west-1");

        assert_eq!(config.service, "es");
        assert_eq!(config.region, "eu-west-1");
        assert!(config.signing_time.is_none());
    }
}
