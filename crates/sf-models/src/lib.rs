//! # sf-models
//!
//! Data models for SimpleFIN Bridge API responses.
//!
//! ## Usage
//!
//! ```ignore
//! use sf_models::{GetAccountsResponse, GetInfoResponse};
//!
//! let info: GetInfoResponse = serde_json::from_str(&info_json)?;
//! let accounts: GetAccountsResponse = serde_json::from_str(&accounts_json)?;
//! ```

#![warn(clippy::all)]

pub mod accounts;
pub mod info;

pub use accounts::*;
pub use info::*;
