//! Configuration management for the SimpleFIN client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Main configuration struct for the SimpleFIN client
///
/// At least one of `access_url` or `setup_token` must be set for a client to
/// be built from it. When both are present the access URL wins and no setup
/// token is spent.
#[derive(Clone, Deserialize, Serialize)]
pub struct Config {
  /// Durable access URL with embedded credentials
  pub access_url: Option<String>,

  /// One-time setup token to exchange for an access URL
  pub setup_token: Option<String>,

  /// Transport timeout in seconds; `None` leaves requests unbounded
  pub timeout_secs: Option<u64>,

  /// User agent sent with every request
  pub user_agent: String,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let access_url = non_empty_var("SIMPLEFIN_ACCESS_URL");
    let setup_token = non_empty_var("SIMPLEFIN_SETUP_TOKEN");

    if access_url.is_none() && setup_token.is_none() {
      return Err(Error::Config(
        "SIMPLEFIN_ACCESS_URL or SIMPLEFIN_SETUP_TOKEN must be set".to_string(),
      ));
    }

    let timeout_secs = match non_empty_var("SIMPLEFIN_TIMEOUT_SECS") {
      Some(raw) => Some(
        raw
          .parse()
          .map_err(|_| Error::Config(format!("Invalid SIMPLEFIN_TIMEOUT_SECS: {}", raw)))?,
      ),
      None => None,
    };

    let user_agent =
      non_empty_var("SIMPLEFIN_USER_AGENT").unwrap_or_else(|| crate::DEFAULT_USER_AGENT.to_string());

    Ok(Config { access_url, setup_token, timeout_secs, user_agent })
  }

  /// Create a config around an existing access URL
  pub fn with_access_url(access_url: impl Into<String>) -> Self {
    Config { access_url: Some(access_url.into()), ..Config::default() }
  }

  /// Create a config that will claim an access URL with a setup token
  pub fn with_setup_token(setup_token: impl Into<String>) -> Self {
    Config { setup_token: Some(setup_token.into()), ..Config::default() }
  }
}

impl Default for Config {
  fn default() -> Self {
    Config {
      access_url: None,
      setup_token: None,
      timeout_secs: None,
      user_agent: crate::DEFAULT_USER_AGENT.to_string(),
    }
  }
}

impl fmt::Debug for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Config")
      .field("access_url", &self.access_url.as_ref().map(|_| "<redacted>"))
      .field("setup_token", &self.setup_token.as_ref().map(|_| "<redacted>"))
      .field("timeout_secs", &self.timeout_secs)
      .field("user_agent", &self.user_agent)
      .finish()
  }
}

fn non_empty_var(key: &str) -> Option<String> {
  env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
