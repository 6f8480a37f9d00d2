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

//! Response models for `GET /accounts`
//!
//! Monetary amounts arrive as JSON strings (`"-24.50"`) and are held as
//! [`Decimal`]; timestamps arrive as whole epoch seconds and are held as
//! UTC [`DateTime`]s.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level `/accounts` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetAccountsResponse {
  /// Human-readable problems the bridge hit while gathering data
  #[serde(default)]
  pub errors: Vec<String>,

  /// Accounts visible to this access URL
  pub accounts: Vec<Account>,
}

impl GetAccountsResponse {
  /// `true` when the bridge reported at least one error message
  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  /// Look up an account by its bridge identifier
  pub fn find_account(&self, id: &str) -> Option<&Account> {
    self.accounts.iter().find(|a| a.id == id)
  }
}

/// A financial institution holding one or more accounts
///
/// The bridge always identifies an org by `domain`, `name` or both;
/// deserialization rejects an org carrying neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrgFields")]
pub struct Org {
  /// Root URL of the institution's SimpleFIN server
  #[serde(rename = "sfin-url")]
  pub sfin_url: String,

  /// Institution website
  #[serde(skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,

  /// Institution identifier
  #[serde(skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,

  /// Institution domain name
  #[serde(skip_serializing_if = "Option::is_none")]
  pub domain: Option<String>,

  /// Institution display name
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

impl Org {
  /// Name to show a person: the org name, else its domain
  pub fn display_name(&self) -> &str {
    self.name.as_deref().or(self.domain.as_deref()).unwrap_or_default()
  }
}

#[derive(Deserialize)]
struct OrgFields {
  #[serde(rename = "sfin-url")]
  sfin_url: String,
  #[serde(default)]
  url: Option<String>,
  #[serde(default)]
  id: Option<String>,
  #[serde(default)]
  domain: Option<String>,
  #[serde(default)]
  name: Option<String>,
}

impl TryFrom<OrgFields> for Org {
  type Error = String;

  fn try_from(fields: OrgFields) -> Result<Self, Self::Error> {
    if fields.domain.is_none() && fields.name.is_none() {
      return Err(format!("org at {} has neither a domain nor a name", fields.sfin_url));
    }

    Ok(Org {
      sfin_url: fields.sfin_url,
      url: fields.url,
      id: fields.id,
      domain: fields.domain,
      name: fields.name,
    })
  }
}

/// A single account and, unless `balances-only` was requested, its
/// transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
  /// Owning institution
  pub org: Org,

  /// Bridge account identifier, usable in the `account` filter
  pub id: String,

  /// Account name
  pub name: String,

  /// ISO 4217 code or a custom currency URL
  pub currency: String,

  /// Current balance
  pub balance: Decimal,

  /// Balance available to spend
  #[serde(rename = "available-balance")]
  pub available_balance: Decimal,

  /// When the balance was last reported
  #[serde(rename = "balance-date", with = "chrono::serde::ts_seconds")]
  pub balance_date: DateTime<Utc>,

  /// Transactions within the requested window
  #[serde(default)]
  pub transactions: Vec<Transaction>,
}

impl Account {
  /// Look up a transaction by its identifier
  pub fn find_transaction(&self, id: &str) -> Option<&Transaction> {
    self.transactions.iter().find(|t| t.id == id)
  }

  /// Transactions the bridge flagged as pending
  pub fn pending_transactions(&self) -> impl Iterator<Item = &Transaction> {
    self.transactions.iter().filter(|t| t.is_pending())
  }
}

/// A posted or pending account transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
  /// Transaction identifier, unique within its account
  pub id: String,

  /// When the transaction posted
  #[serde(with = "chrono::serde::ts_seconds")]
  pub posted: DateTime<Utc>,

  /// Signed amount; negative for money leaving the account
  pub amount: Decimal,

  /// Description as shown on the statement
  pub description: String,

  /// When the transaction actually happened, if known
  #[serde(
    default,
    with = "chrono::serde::ts_seconds_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub transacted_at: Option<DateTime<Utc>>,

  /// Present and `true` for transactions that have not settled
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub pending: Option<bool>,

  /// Institution-specific data with no fixed schema
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub extra: Option<Map<String, Value>>,
}

impl Transaction {
  /// Whether the transaction is still pending
  pub fn is_pending(&self) -> bool {
    self.pending == Some(true)
  }
}
