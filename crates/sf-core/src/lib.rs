//! # sf-core
//!
//! Shared building blocks for the sf-* crates: the error type, environment
//! configuration, protocol constants and the date normalizer used when
//! filtering `/accounts`.

pub mod config;
pub mod date;
pub mod error;

pub use config::Config;
pub use date::{DateInput, to_unix_epoch};
pub use error::{Error, Result};

/// User agent sent when the configuration does not override it
pub const DEFAULT_USER_AGENT: &str = concat!("sf-client/", env!("CARGO_PKG_VERSION"));

/// Authenticated API paths relative to the access URL's base origin
pub const INFO_PATH: &str = "/info";
/// See [`INFO_PATH`]
pub const ACCOUNTS_PATH: &str = "/accounts";
