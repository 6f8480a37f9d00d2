//! HTTP transport layer for SimpleFIN requests
//!
//! The client never talks to `reqwest` directly; it hands an [`HttpRequest`]
//! to an [`HttpTransport`] and inspects the [`HttpResponse`] it gets back.
//! [`ReqwestTransport`] is the production implementation. Tests swap in a
//! recording double.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use sf_core::{Config, Error, Result};
use std::fmt;
use std::time::Duration;
use tracing::{debug, error};

/// HTTP methods the bridge protocol uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
  /// Authenticated reads
  Get,
  /// Setup-token claim
  Post,
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Method::Get => write!(f, "GET"),
      Method::Post => write!(f, "POST"),
    }
  }
}

/// A fully-built request handed to the transport
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
  /// Request method
  pub method: Method,
  /// Absolute URL including the encoded query string
  pub url: String,
  /// Header name/value pairs, sent in order
  pub headers: Vec<(String, String)>,
}

impl HttpRequest {
  /// A request with no headers
  pub fn new(method: Method, url: impl Into<String>) -> Self {
    Self { method, url: url.into(), headers: Vec::new() }
  }

  /// Append a header
  pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.push((name.into(), value.into()));
    self
  }

  /// First header value with the given name, compared case-insensitively
  pub fn header(&self, name: &str) -> Option<&str> {
    self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
  }
}

// Header values carry credentials; keep them out of debug output.
impl fmt::Debug for HttpRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let header_names: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
    f.debug_struct("HttpRequest")
      .field("method", &self.method)
      .field("url", &self.url)
      .field("headers", &header_names)
      .finish()
  }
}

/// The parts of an HTTP response the client cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  /// Status code
  pub status: u16,
  /// Reason phrase, e.g. `Unauthorized`
  pub status_text: String,
  /// Response body as text
  pub body: String,
}

impl HttpResponse {
  /// Build a response from its parts
  pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
    Self { status, status_text: status_text.into(), body: body.into() }
  }

  /// `true` for 2xx statuses
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  /// Response body as text
  pub fn text(&self) -> &str {
    &self.body
  }

  /// Decode the body as JSON
  pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
    serde_json::from_str(&self.body).map_err(|e| {
      error!("Failed to parse JSON response: {}", e);
      error!("Response text (first 200 chars): {}", preview(&self.body, 200));
      Error::from(e)
    })
  }
}

/// The request never produced an HTTP response (DNS, connect, TLS, body read)
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Anything that can carry an [`HttpRequest`] to a server
///
/// Implementations report non-2xx answers as ordinary responses; only
/// failures to get an answer at all are [`TransportError`]s.
#[async_trait]
pub trait HttpTransport: Send + Sync {
  /// Send the request and collect the whole response body
  async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  client: Client,
}

impl ReqwestTransport {
  /// Create a transport honoring the configured user agent and timeout
  pub fn new(config: &Config) -> Result<Self> {
    let mut builder = Client::builder().user_agent(config.user_agent.as_str());
    if let Some(secs) = config.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }

    let client = builder
      .build()
      .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self { client })
  }

  /// Wrap an existing `reqwest::Client`
  pub fn from_client(client: Client) -> Self {
    Self { client }
  }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
  async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
    let mut builder = match request.method {
      Method::Get => self.client.get(&request.url),
      Method::Post => self.client.post(&request.url),
    };
    for (name, value) in &request.headers {
      builder = builder.header(name.as_str(), value.as_str());
    }

    let response = builder.send().await.map_err(|e| TransportError(describe(e)))?;

    let status = response.status();
    debug!("{} {} -> {}", request.method, response.url().host_str().unwrap_or_default(), status);

    let status_text = reason_phrase(status);
    let body = response
      .text()
      .await
      .map_err(|e| TransportError(format!("Failed to read response body: {}", describe(e))))?;

    Ok(HttpResponse { status: status.as_u16(), status_text, body })
  }
}

// reqwest does not surface the server's reason phrase, so the canonical one
// stands in. Codes without one get a fixed label instead of an empty string.
fn reason_phrase(status: reqwest::StatusCode) -> String {
  status.canonical_reason().unwrap_or("Unknown Status").to_string()
}

// reqwest's Display stops at the outermost layer; the root cause (refused,
// DNS) is what a caller needs to see. The URL is dropped because a claim URL
// is itself a credential.
fn describe(err: reqwest::Error) -> String {
  let err = err.without_url();
  let mut message = err.to_string();
  let mut source = std::error::Error::source(&err);
  while let Some(cause) = source {
    message.push_str(": ");
    message.push_str(&cause.to_string());
    source = std::error::Error::source(cause);
  }
  message
}

pub(crate) fn preview(text: &str, max_chars: usize) -> &str {
  match text.char_indices().nth(max_chars) {
    Some((idx, _)) => &text[..idx],
    None => text,
  }
}
