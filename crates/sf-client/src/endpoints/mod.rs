//! Endpoint groups and the authenticated-request primitive they share

pub mod accounts;
pub mod info;

use crate::auth::parse_access_url;
use crate::query::QueryParams;
use crate::transport::{HttpRequest, HttpTransport, Method};
use serde::de::DeserializeOwned;
use sf_core::{Error, Result};
use std::sync::Arc;
use tracing::{debug, error, instrument};
use url::Url;

/// Common endpoint structure
///
/// Holds the access URL and the transport shared by every endpoint group.
/// Both are immutable, so clones can issue requests concurrently without
/// coordination.
#[derive(Clone)]
pub struct EndpointCore {
  access_url: Arc<str>,
  transport: Arc<dyn HttpTransport>,
}

impl EndpointCore {
  /// Create a new endpoint core
  pub fn new(access_url: impl Into<Arc<str>>, transport: Arc<dyn HttpTransport>) -> Self {
    Self { access_url: access_url.into(), transport }
  }

  /// The access URL requests authenticate with
  pub fn access_url(&self) -> &str {
    &self.access_url
  }

  /// Issue an authenticated request and decode the JSON response
  ///
  /// Credentials are parsed out of the access URL on every call. The full
  /// URL is the base URL with `path` appended verbatim, followed by the
  /// encoded `query`.
  #[instrument(skip(self, query), fields(method = %method, path = %path))]
  pub async fn request<T>(&self, method: Method, path: &str, query: Option<&QueryParams>) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let credentials = parse_access_url(&self.access_url)?;
    let url = build_url(&credentials.base_url, path, query)?;
    debug!("Making request to: {}", url);

    let request =
      HttpRequest::new(method, url.as_str()).with_header("Authorization", credentials.auth_header);

    let response = self.transport.send(request).await.map_err(|e| {
      error!("Request failed: {}", e);
      Error::Network(format!("Failed to reach {}: {}", url, e))
    })?;

    if !response.is_success() {
      error!("Request failed with status: {} {}", response.status, response.status_text);
      return Err(Error::Server {
        context: format!("Request to {} failed", path),
        status: response.status,
        status_text: response.status_text,
      });
    }

    response.json()
  }
}

/// Join the base URL and path, then append the query
fn build_url(base_url: &str, path: &str, query: Option<&QueryParams>) -> Result<Url> {
  let mut url = Url::parse(&format!("{}{}", base_url, path))
    .map_err(|e| Error::InvalidAccessUrl(format!("cannot build request URL for {}: {}", path, e)))?;

  if let Some(query) = query {
    query.append_to(&mut url);
  }

  Ok(url)
}
