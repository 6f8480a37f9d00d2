//! Recording transport for tests

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// [`HttpTransport`] that replays queued outcomes and records every request
///
/// Outcomes are consumed in order. Once the queue is empty every further
/// request fails with a [`TransportError`].
#[derive(Debug, Default)]
pub struct MockTransport {
  outcomes: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
  requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
  /// A transport with nothing queued
  pub fn new() -> Self {
    Self::default()
  }

  /// Queue a response
  pub fn respond(self, response: HttpResponse) -> Self {
    self.push(Ok(response));
    self
  }

  /// Queue a `200 OK` with a JSON body
  pub fn respond_json(self, body: serde_json::Value) -> Self {
    self.respond(HttpResponse::new(200, "OK", body.to_string()))
  }

  /// Queue a transport failure
  pub fn fail(self, error: TransportError) -> Self {
    self.push(Err(error));
    self
  }

  /// Requests seen so far
  pub fn requests(&self) -> Vec<HttpRequest> {
    self.requests.lock().map(|r| r.clone()).unwrap_or_default()
  }

  fn push(&self, outcome: Result<HttpResponse, TransportError>) {
    if let Ok(mut outcomes) = self.outcomes.lock() {
      outcomes.push_back(outcome);
    }
  }
}

#[async_trait]
impl HttpTransport for MockTransport {
  async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    if let Ok(mut requests) = self.requests.lock() {
      requests.push(request);
    }

    self
      .outcomes
      .lock()
      .ok()
      .and_then(|mut outcomes| outcomes.pop_front())
      .unwrap_or_else(|| Err(TransportError("no response queued".to_string())))
  }
}
