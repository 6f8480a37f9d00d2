/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! The SimpleFIN client and its construction paths

use crate::auth::redact_access_url;
use crate::claim::claim_access_url;
use crate::endpoints::{
  EndpointCore, accounts::AccountsEndpoints, accounts::AccountsFilter, info::InfoEndpoints,
};
use crate::query::QueryParams;
use crate::transport::{HttpTransport, Method, ReqwestTransport};
use serde::de::DeserializeOwned;
use sf_core::{Config, Error, Result};
use sf_models::{GetAccountsResponse, GetInfoResponse};
use std::sync::Arc;
use tracing::{info, instrument};

/// Main SimpleFIN Bridge client
///
/// Owns an access URL and the transport used to reach the bridge. The
/// access URL is fixed at construction; credentials are re-derived from it
/// on every request. Cloning is cheap and clones share the transport.
///
/// # Examples
///
/// ```rust,no_run
/// use sf_client::{AccountsFilter, SimpleFinClient};
///
/// #[tokio::main]
/// async fn main() -> sf_client::Result<()> {
///     let client = SimpleFinClient::from_setup_token("aHR0cHM6Ly9...").await?;
///     // Persist this; the setup token cannot be claimed again.
///     let _access_url = client.access_url().to_string();
///
///     let info = client.get_info().await?;
///     println!("Protocol versions: {:?}", info.versions);
///
///     let filter = AccountsFilter::new().start_date("2025-01-01").pending(true);
///     let accounts = client.get_accounts(Some(&filter)).await?;
///     for account in &accounts.accounts {
///         println!("{}: {} {}", account.name, account.balance, account.currency);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct SimpleFinClient {
  core: EndpointCore,
}

impl SimpleFinClient {
  /// Claim an access URL with a one-time setup token
  ///
  /// The token is spent by the bridge on success. Calling this twice with
  /// the same token fails the second time, so do not retry blindly: keep
  /// [`SimpleFinClient::access_url`] and use
  /// [`SimpleFinClient::from_access_url`] from then on.
  ///
  /// # Errors
  ///
  /// * [`Error::InvalidArgument`] when the token is empty or not base64
  /// * [`Error::Network`] when the bridge cannot be reached
  /// * [`Error::Server`] when the bridge refuses the claim
  pub async fn from_setup_token(setup_token: &str) -> Result<Self> {
    if setup_token.is_empty() {
      return Err(setup_token_required());
    }
    let transport = Arc::new(ReqwestTransport::new(&Config::default())?);
    Self::from_setup_token_with_transport(setup_token, transport).await
  }

  /// Same as [`SimpleFinClient::from_setup_token`] over a caller-supplied
  /// transport
  #[instrument(skip_all)]
  pub async fn from_setup_token_with_transport(
    setup_token: &str,
    transport: Arc<dyn HttpTransport>,
  ) -> Result<Self> {
    if setup_token.is_empty() {
      return Err(setup_token_required());
    }

    let access_url = claim_access_url(setup_token, transport.as_ref()).await?;
    info!("Claimed access URL {}", redact_access_url(&access_url));

    Ok(Self { core: EndpointCore::new(access_url, transport) })
  }

  /// Wrap an existing access URL; no network call is made
  ///
  /// The URL is stored verbatim. Its shape is only checked when a request
  /// is issued.
  ///
  /// # Errors
  ///
  /// * [`Error::InvalidArgument`] when `access_url` is empty
  pub fn from_access_url(access_url: &str) -> Result<Self> {
    if access_url.is_empty() {
      return Err(access_url_required());
    }
    let transport = Arc::new(ReqwestTransport::new(&Config::default())?);
    Self::from_access_url_with_transport(access_url, transport)
  }

  /// Same as [`SimpleFinClient::from_access_url`] over a caller-supplied
  /// transport
  pub fn from_access_url_with_transport(
    access_url: &str,
    transport: Arc<dyn HttpTransport>,
  ) -> Result<Self> {
    if access_url.is_empty() {
      return Err(access_url_required());
    }

    Ok(Self { core: EndpointCore::new(access_url, transport) })
  }

  /// Build a client from configuration
  ///
  /// Prefers `access_url`, falling back to claiming `setup_token`. The
  /// configured user agent and timeout apply to every request.
  pub async fn from_config(config: Config) -> Result<Self> {
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(&config)?);

    match (config.access_url.as_deref(), config.setup_token.as_deref()) {
      (Some(access_url), _) => Self::from_access_url_with_transport(access_url, transport),
      (None, Some(setup_token)) => Self::from_setup_token_with_transport(setup_token, transport).await,
      (None, None) => {
        Err(Error::Config("either an access URL or a setup token must be configured".to_string()))
      }
    }
  }

  /// The access URL, credentials included
  ///
  /// Treat the return value as a secret.
  pub fn access_url(&self) -> &str {
    self.core.access_url()
  }

  /// Get access to the info endpoint
  pub fn info(&self) -> InfoEndpoints {
    InfoEndpoints::new(self.core.clone())
  }

  /// Get access to the accounts endpoint
  pub fn accounts(&self) -> AccountsEndpoints {
    AccountsEndpoints::new(self.core.clone())
  }

  /// `GET /info`
  pub async fn get_info(&self) -> Result<GetInfoResponse> {
    self.info().get().await
  }

  /// `GET /accounts`, optionally filtered
  pub async fn get_accounts(&self, filter: Option<&AccountsFilter>) -> Result<GetAccountsResponse> {
    self.accounts().list(filter).await
  }

  /// Issue an arbitrary authenticated request against the base URL
  ///
  /// This is the primitive both endpoints are built on. `path` is appended
  /// to the base URL verbatim.
  pub async fn request<T: DeserializeOwned>(
    &self,
    method: Method,
    path: &str,
    query: Option<&QueryParams>,
  ) -> Result<T> {
    self.core.request(method, path, query).await
  }
}

impl std::fmt::Debug for SimpleFinClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SimpleFinClient")
      .field("access_url", &redact_access_url(self.access_url()))
      .field("transport", &"HttpTransport")
      .finish()
  }
}

fn setup_token_required() -> Error {
  Error::InvalidArgument("Setup token is required to generate an access URL.".to_string())
}

fn access_url_required() -> Error {
  Error::InvalidArgument(
    "An access url is required. See the `from_setup_token` method if you need to generate one"
      .to_string(),
  )
}
