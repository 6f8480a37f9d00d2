//! Query-string parameters for authenticated requests
//!
//! Keys keep their insertion order. A key whose value is absent is dropped,
//! a list value becomes one `key=value` entry per element (never a
//! comma-joined string), and a scalar becomes a single entry.

use url::Url;

/// Value of a single query key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
  /// Emitted once as `key=value`
  Scalar(String),
  /// Emitted as repeated `key=a&key=b`
  List(Vec<String>),
}

/// Ordered set of query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
  entries: Vec<(String, Option<QueryValue>)>,
}

impl QueryParams {
  /// An empty parameter set
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a key with a value
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> &mut Self {
    self.entries.push((key.into(), Some(value.into())));
    self
  }

  /// Add a key whose value may be absent; absent values are omitted
  pub fn insert_opt<V: Into<QueryValue>>(
    &mut self,
    key: impl Into<String>,
    value: Option<V>,
  ) -> &mut Self {
    self.entries.push((key.into(), value.map(Into::into)));
    self
  }

  /// Flattened `(key, value)` pairs in the order they go on the wire
  pub fn pairs(&self) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    for (key, value) in &self.entries {
      match value {
        Some(QueryValue::Scalar(v)) => pairs.push((key.as_str(), v.as_str())),
        Some(QueryValue::List(values)) => {
          pairs.extend(values.iter().map(|v| (key.as_str(), v.as_str())));
        }
        None => {}
      }
    }
    pairs
  }

  /// `true` when nothing would be written to the query string
  pub fn is_empty(&self) -> bool {
    self.pairs().is_empty()
  }

  /// Append the encoded pairs to `url`
  ///
  /// The URL is left untouched when there is nothing to write, so no bare
  /// trailing `?` appears.
  pub fn append_to(&self, url: &mut Url) {
    let pairs = self.pairs();
    if pairs.is_empty() {
      return;
    }

    let mut query_pairs = url.query_pairs_mut();
    for (key, value) in pairs {
      query_pairs.append_pair(key, value);
    }
  }
}

impl From<String> for QueryValue {
  fn from(value: String) -> Self {
    QueryValue::Scalar(value)
  }
}

impl From<&str> for QueryValue {
  fn from(value: &str) -> Self {
    QueryValue::Scalar(value.to_string())
  }
}

impl From<&String> for QueryValue {
  fn from(value: &String) -> Self {
    QueryValue::Scalar(value.clone())
  }
}

impl From<bool> for QueryValue {
  fn from(value: bool) -> Self {
    QueryValue::Scalar(value.to_string())
  }
}

impl From<i64> for QueryValue {
  fn from(value: i64) -> Self {
    QueryValue::Scalar(value.to_string())
  }
}

impl From<u32> for QueryValue {
  fn from(value: u32) -> Self {
    QueryValue::Scalar(value.to_string())
  }
}

impl From<Vec<String>> for QueryValue {
  fn from(values: Vec<String>) -> Self {
    QueryValue::List(values)
  }
}

impl From<Vec<&str>> for QueryValue {
  fn from(values: Vec<&str>) -> Self {
    QueryValue::List(values.into_iter().map(String::from).collect())
  }
}

impl From<&[String]> for QueryValue {
  fn from(values: &[String]) -> Self {
    QueryValue::List(values.to_vec())
  }
}
