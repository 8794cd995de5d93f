//! Credential resolution through the AWS default provider chain.

use aws_config::SdkConfig;
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::Credentials;
use tracing::debug;

use crate::errors::SigningError;

/// Resolve credentials from a loaded SDK configuration.
///
/// The configuration's provider chain reads, in order, the environment,
/// the shared credentials file (`~/.aws/credentials`), and the instance
/// metadata service. Resolution happens once; callers hold the resolved
/// credentials for the process lifetime.
///
/// # Returns
///
/// * `Ok(Credentials)` - The resolved credentials
/// * `Err(SigningError::CredentialResolution)` - If the configuration has
///   no provider or no provider in the chain could produce credentials
pub async fn resolve_credentials(config: &SdkConfig) -> Result<Credentials, SigningError> {
    let provider = config.credentials_provider().ok_or_else(|| {
        SigningError::credential_resolution("SDK configuration carries no credentials provider")
    })?;

    let credentials = provider.provide_credentials().await.map_err(|e| {
        SigningError::credential_resolution(format!(
            "cannot load credentials from the provider chain (environment, \
             ~/.aws/credentials, instance metadata): {}",
            e
        ))
    })?;

    debug!(access_key_id = %credentials.access_key_id(), "Resolved AWS credentials");
    Ok(credentials)
}
