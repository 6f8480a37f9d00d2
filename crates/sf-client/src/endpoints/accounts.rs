//! Account and transaction endpoint
//!
//! `GET /accounts` accepts:
//! - `start-date` / `end-date`: epoch seconds bounding the transaction window
//! - `pending=1`: include pending transactions
//! - `balances-only=1`: skip transactions entirely
//! - `account=<id>`: restrict to an account, repeated once per id
//!
//! `pending` and `balances-only` are one-way flags. The bridge only
//! understands their presence, so `false` is expressed by leaving the key
//! out and never as `0`.

use super::EndpointCore;
use crate::query::QueryParams;
use crate::transport::Method;
use sf_core::{ACCOUNTS_PATH, DateInput, Result};
use sf_models::GetAccountsResponse;
use tracing::instrument;

/// Filters for `GET /accounts`
///
/// # Examples
///
/// ```
/// use sf_client::AccountsFilter;
///
/// let filter = AccountsFilter::new()
///   .start_date("2025-01-01")
///   .end_date(1_738_368_000_000_i64)
///   .pending(true)
///   .accounts(["ACT-1", "ACT-2"]);
///
/// let pairs: Vec<(String, String)> = filter
///   .to_query()
///   .unwrap()
///   .pairs()
///   .into_iter()
///   .map(|(k, v)| (k.to_string(), v.to_string()))
///   .collect();
/// assert!(pairs.contains(&("pending".to_string(), "1".to_string())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountsFilter {
  /// Earliest transaction date to include
  pub start_date: Option<DateInput>,
  /// Transactions before this date are included
  pub end_date: Option<DateInput>,
  /// Include pending transactions when `Some(true)`
  pub pending: Option<bool>,
  /// Return balances without transactions when `Some(true)`
  pub balances_only: Option<bool>,
  /// Restrict to these account ids; empty means all accounts
  pub account: Vec<String>,
}

impl AccountsFilter {
  /// An empty filter: every account, the bridge's default window
  pub fn new() -> Self {
    Self::default()
  }

  /// Set `start-date`
  pub fn start_date(mut self, date: impl Into<DateInput>) -> Self {
    self.start_date = Some(date.into());
    self
  }

  /// Set `end-date`
  pub fn end_date(mut self, date: impl Into<DateInput>) -> Self {
    self.end_date = Some(date.into());
    self
  }

  /// Set the `pending` flag
  pub fn pending(mut self, pending: bool) -> Self {
    self.pending = Some(pending);
    self
  }

  /// Set the `balances-only` flag
  pub fn balances_only(mut self, balances_only: bool) -> Self {
    self.balances_only = Some(balances_only);
    self
  }

  /// Add one account id
  pub fn account(mut self, id: impl Into<String>) -> Self {
    self.account.push(id.into());
    self
  }

  /// Add several account ids
  pub fn accounts<I, S>(mut self, ids: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.account.extend(ids.into_iter().map(Into::into));
    self
  }

  /// Encode the filter as `/accounts` query parameters
  ///
  /// Fails with [`sf_core::Error::InvalidArgument`] if a date cannot be
  /// parsed.
  pub fn to_query(&self) -> Result<QueryParams> {
    let mut params = QueryParams::new();

    params
      .insert_opt("start-date", self.start_date.as_ref().map(DateInput::to_unix_epoch).transpose()?)
      .insert_opt("end-date", self.end_date.as_ref().map(DateInput::to_unix_epoch).transpose()?)
      .insert_opt("pending", flag(self.pending))
      .insert_opt("balances-only", flag(self.balances_only))
      .insert("account", self.account.as_slice());

    Ok(params)
  }
}

fn flag(value: Option<bool>) -> Option<&'static str> {
  (value == Some(true)).then_some("1")
}

/// `GET /accounts`
pub struct AccountsEndpoints {
  core: EndpointCore,
}

impl AccountsEndpoints {
  /// Create a new accounts endpoints instance
  pub fn new(core: EndpointCore) -> Self {
    Self { core }
  }

  /// Fetch accounts, optionally filtered
  ///
  /// Dates are normalized before anything is sent; an unparseable date
  /// fails without a request being made.
  #[instrument(skip(self, filter), fields(filtered = filter.is_some()))]
  pub async fn list(&self, filter: Option<&AccountsFilter>) -> Result<GetAccountsResponse> {
    let query = filter.map(AccountsFilter::to_query).transpose()?;
    self.core.request(Method::Get, ACCOUNTS_PATH, query.as_ref()).await
  }
}
