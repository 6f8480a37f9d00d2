//! # sf-client
//!
//! A client for the SimpleFIN Bridge protocol, a read-only API for bank
//! account balances and transactions.
//!
//! ## Features
//!
//! - **Setup-token exchange**: claim a durable access URL from a one-time token
//! - **Basic-Auth from the access URL**: credentials are re-derived per request
//! - **Typed responses**: `/info` and `/accounts` decode into sf-models types
//! - **Pluggable transport**: reqwest by default, any [`HttpTransport`] in tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sf_client::{AccountsFilter, SimpleFinClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let access_url = std::env::var("SIMPLEFIN_ACCESS_URL")?;
//!     let client = SimpleFinClient::from_access_url(&access_url)?;
//!
//!     let filter = AccountsFilter::new().balances_only(true);
//!     let response = client.get_accounts(Some(&filter)).await?;
//!     for account in &response.accounts {
//!         println!("{} ({}): {}", account.name, account.org.display_name(), account.balance);
//!     }
//!     for message in &response.errors {
//!         eprintln!("bridge: {}", message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, sf_core::Error>`. Nothing is retried: a
//! setup token is single-use, and every other failure is surfaced to the
//! caller as-is.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod claim;
pub mod client;
pub mod endpoints;
pub mod query;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export the main client and common types
pub use auth::{AccessCredentials, parse_access_url, redact_access_url};
pub use client::SimpleFinClient;
pub use query::{QueryParams, QueryValue};
pub use sf_core::{Config, DateInput, Error, Result, to_unix_epoch};
pub use sf_models::*;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, TransportError};

// Re-export endpoint modules for direct access if needed
pub use endpoints::{
  EndpointCore,
  accounts::{AccountsEndpoints, AccountsFilter},
  info::InfoEndpoints,
};
