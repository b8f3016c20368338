//! HTTP transport used to download external images.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure while downloading a single URL.
#[derive(Debug, Error)]
pub enum FetchError {
  /// Connection, timeout or body read failure.
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),
  /// The server answered with a non-success status.
  #[error("server responded with {0}")]
  Status(StatusCode),
}

/// Source of raw bytes for an external URL.
pub trait Fetch {
  /// Download the full response body for `url`.
  fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<T: Fetch + ?Sized> Fetch for &T {
  fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
    (**self).fetch(url)
  }
}

/// Blocking HTTP fetcher with a fixed timeout and user agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
  client: reqwest::blocking::Client,
}

impl HttpFetcher {
  /// Build a client that gives up after `timeout` and identifies itself as `user_agent`.
  pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
    let client = reqwest::blocking::Client::builder()
      .timeout(timeout)
      .user_agent(user_agent)
      .build()?;
    Ok(Self { client })
  }
}

impl Fetch for HttpFetcher {
  fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
    let response = self.client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
      return Err(FetchError::Status(status));
    }
    Ok(response.bytes()?.to_vec())
  }
}
