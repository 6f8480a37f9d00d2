//! Response model for `GET /info`

use serde::{Deserialize, Serialize};

/// Protocol versions supported by the bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetInfoResponse {
  /// Supported SimpleFIN protocol versions, e.g. `["1.0"]`
  pub versions: Vec<String>,
}

impl GetInfoResponse {
  /// Whether the bridge advertises the given protocol version
  pub fn supports(&self, version: &str) -> bool {
    self.versions.iter().any(|v| v == version)
  }
}
