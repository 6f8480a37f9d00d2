//! Bridge information endpoint

use super::EndpointCore;
use crate::transport::Method;
use sf_core::{INFO_PATH, Result};
use sf_models::GetInfoResponse;
use tracing::instrument;

/// `GET /info`
pub struct InfoEndpoints {
  core: EndpointCore,
}

impl InfoEndpoints {
  /// Create a new info endpoints instance
  pub fn new(core: EndpointCore) -> Self {
    Self { core }
  }

  /// Protocol versions supported by the bridge
  ///
  /// Also a cheap way to check that an access URL is still accepted: a
  /// revoked URL answers `403 Forbidden`.
  #[instrument(skip(self))]
  pub async fn get(&self) -> Result<GetInfoResponse> {
    self.core.request(Method::Get, INFO_PATH, None).await
  }
}
