//! SigV4 request signer.
//!
//! Computes the SigV4 authentication headers for an outbound HTTP request
//! and attaches them in place. The canonicalization and keyed-hash
//! computation are delegated to the aws-sigv4 crate; this module only
//! adapts the request representation.

use std::time::SystemTime;

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{sign, SignableBody, SignableRequest, SigningSettings};
use aws_sigv4::sign::v4;
use tracing::trace;

use crate::config::SigningConfig;
use crate::errors::SigningError;

/// Signs outbound requests with AWS Signature Version 4.
///
/// The signer owns resolved credentials and a [`SigningConfig`]. It mutates
/// the request by attaching the computed authentication headers and never
/// performs network I/O.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
    config: SigningConfig,
}

impl RequestSigner {
    /// Create a signer from resolved credentials and signing configuration.
    pub fn new(credentials: Credentials, config: SigningConfig) -> Self {
        Self {
            credentials,
            config,
        }
    }

    /// Sign the request in place.
    ///
    /// Computes the canonical request over method, URI, headers, and payload
    /// hash, then attaches the `authorization` and `x-amz-date` headers (and
    /// the session token header when the credentials carry one).
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the headers were attached
    /// * `Err(SigningError)` - If the request cannot be canonicalized or the
    ///   signing parameters are invalid
    pub fn sign(&self, request: &mut http::Request<Vec<u8>>) -> Result<(), SigningError> {
        let identity = self.credentials.clone().into();
        let params = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.config.region)
            .name(&self.config.service)
            .time(self.config.signing_time.unwrap_or_else(SystemTime::now))
            .settings(SigningSettings::default())
            .build()
            .map_err(|e| SigningError::signing(format!("invalid signing parameters: {}", e)))?
            .into();

        let uri = request.uri().to_string();
        let headers = request
            .headers()
            .iter()
            .map(|(name, value)| {
                value.to_str().map(|v| (name.as_str(), v)).map_err(|e| {
                    SigningError::invalid_request(format!(
                        "non-ASCII value for header {}: {}",
                        name, e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let signable = SignableRequest::new(
            request.method().as_str(),
            &uri,
            headers.into_iter(),
            SignableBody::Bytes(request.body()),
        )
        .map_err(|e| SigningError::signing(format!("cannot canonicalize request: {}", e)))?;

        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| SigningError::signing(e.to_string()))?
            .into_parts();
        instructions.apply_to_request_http1x(request);

        trace!(uri = %uri, "Signed request");
        Ok(())
    }
}
