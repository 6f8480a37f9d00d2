//! Setup-token exchange
//!
//! A setup token is the base64 encoding of a one-time claim URL. POSTing to
//! the claim URL answers with the durable access URL as plain text. The
//! bridge burns the token on first use, so nothing here retries.

use crate::transport::{HttpRequest, HttpTransport, Method};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use sf_core::{Error, Result};
use tracing::{debug, error, info, instrument};
use url::Url;

/// Standard alphabet, padding optional
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
  &alphabet::STANDARD,
  GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a setup token into its claim URL
///
/// The token itself is never echoed back in error messages.
pub fn decode_setup_token(setup_token: &str) -> Result<String> {
  if setup_token.trim().is_empty() {
    return Err(Error::InvalidArgument(
      "Setup token is required to generate an access URL.".to_string(),
    ));
  }

  let bytes = TOKEN_ENGINE
    .decode(setup_token.trim())
    .map_err(|e| Error::InvalidArgument(format!("Setup token is not valid base64: {}", e)))?;

  String::from_utf8(bytes).map_err(|_| {
    Error::InvalidArgument("Setup token does not decode to a UTF-8 claim URL".to_string())
  })
}

/// Exchange a setup token for an access URL
///
/// # Errors
///
/// * [`Error::InvalidArgument`] for an empty or undecodable token
/// * [`Error::Network`] when the bridge cannot be reached
/// * [`Error::Server`] when the bridge refuses the claim (already claimed,
///   revoked, unknown)
#[instrument(skip_all)]
pub async fn claim_access_url(setup_token: &str, transport: &dyn HttpTransport) -> Result<String> {
  let claim_url = decode_setup_token(setup_token)?;

  if let Some(host) = Url::parse(&claim_url).ok().as_ref().and_then(Url::host_str) {
    debug!("Claiming access URL from {}", host);
  }

  let response = transport.send(HttpRequest::new(Method::Post, claim_url)).await.map_err(|e| {
    error!("Claim request failed: {}", e);
    Error::Network(format!("Failed to reach the SimpleFIN Bridge: {}", e))
  })?;

  if !response.is_success() {
    error!("Claim rejected with status {} {}", response.status, response.status_text);
    return Err(Error::Server {
      context: "Failed to claim access URL".to_string(),
      status: response.status,
      status_text: response.status_text,
    });
  }

  info!("Setup token claimed");
  Ok(response.text().trim().to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::MockTransport;
  use crate::transport::{HttpResponse, TransportError};

  const CLAIM_TOKEN: &str = "aHR0cHM6Ly9jbGFpbS5leGFtcGxlL3g=";

  #[test]
  fn test_decode_setup_token() {
    assert_eq!(decode_setup_token(CLAIM_TOKEN).unwrap(), "https://claim.example/x");
    assert_eq!(decode_setup_token(" aHR0cHM6Ly9jbGFpbS5leGFtcGxlL3g \n").unwrap(), "https://claim.example/x");
  }

  #[test]
  fn test_decode_rejects_garbage() {
    let err = decode_setup_token("not base64!").unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(!err.to_string().contains("not base64!"));
  }

  #[tokio::test]
  async fn test_claim_posts_to_decoded_url() {
    let transport =
      MockTransport::new().respond(HttpResponse::new(200, "OK", "  https://u:p@api.example/access\n"));

    let access_url = claim_access_url(CLAIM_TOKEN, &transport).await.unwrap();
    assert_eq!(access_url, "https://u:p@api.example/access");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, "https://claim.example/x");
    assert!(requests[0].header("Authorization").is_none());
  }

  #[tokio::test]
  async fn test_claim_server_error() {
    let transport = MockTransport::new().respond(HttpResponse::new(403, "Forbidden", ""));

    let err = claim_access_url(CLAIM_TOKEN, &transport).await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Failed to claim access URL"));
    assert!(msg.contains("403"));
    assert!(msg.contains("Forbidden"));
  }

  #[tokio::test]
  async fn test_claim_network_error() {
    let transport = MockTransport::new().fail(TransportError("connection refused".to_string()));

    let err = claim_access_url(CLAIM_TOKEN, &transport).await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
    assert!(err.to_string().contains("Failed to reach the SimpleFIN Bridge: connection refused"));
  }

  #[tokio::test]
  async fn test_empty_token_makes_no_request() {
    let transport = MockTransport::new();

    let err = claim_access_url("", &transport).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(err.to_string().contains("Setup token is required"));
    assert!(transport.requests().is_empty());
  }
}
