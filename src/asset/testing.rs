//! In-memory [`Fetch`] double used by unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use reqwest::StatusCode;

use super::fetch::{Fetch, FetchError};

#[derive(Debug, Clone)]
enum Response {
  Body(Vec<u8>),
  Status(StatusCode),
}

/// Serves canned responses and records every requested URL.
#[derive(Debug)]
pub(crate) struct StubFetcher {
  fallback: Response,
  overrides: HashMap<String, Response>,
  requests: RefCell<Vec<String>>,
}

impl StubFetcher {
  /// Answer every request with a PNG of the given size.
  pub(crate) fn serving_png(width: u32, height: u32) -> Self {
    Self::serving_bytes(png_bytes(width, height))
  }

  /// Answer every request with `body`.
  pub(crate) fn serving_bytes(body: Vec<u8>) -> Self {
    Self::with_fallback(Response::Body(body))
  }

  /// Answer every request with `404 Not Found`.
  pub(crate) fn failing() -> Self {
    Self::with_fallback(Response::Status(StatusCode::NOT_FOUND))
  }

  /// Make `url` fail with `500 Internal Server Error`.
  pub(crate) fn with_failure(mut self, url: &str) -> Self {
    self
      .overrides
      .insert(url.to_string(), Response::Status(StatusCode::INTERNAL_SERVER_ERROR));
    self
  }

  /// Number of requests made so far.
  pub(crate) fn calls(&self) -> usize {
    self.requests.borrow().len()
  }

  /// Number of requests made for `url`.
  pub(crate) fn calls_for(&self, url: &str) -> usize {
    self.requests.borrow().iter().filter(|seen| *seen == url).count()
  }

  fn with_fallback(fallback: Response) -> Self {
    Self {
      fallback,
      overrides: HashMap::new(),
      requests: RefCell::new(Vec::new()),
    }
  }
}

impl Fetch for StubFetcher {
  fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
    self.requests.borrow_mut().push(url.to_string());
    match self.overrides.get(url).unwrap_or(&self.fallback) {
      Response::Body(body) => Ok(body.clone()),
      Response::Status(status) => Err(FetchError::Status(*status)),
    }
  }
}

/// Encode a solid-colour RGB image as PNG.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
  let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 120, 150])));
  let mut buffer = Vec::new();
  image
    .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
    .expect("png encoding of an in-memory buffer");
  buffer
}
