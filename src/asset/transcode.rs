//! Raster decoding, width capping and lossy WebP encoding.

use image::DynamicImage;
use image::imageops::FilterType;
use thiserror::Error;

/// Failure while turning downloaded bytes into a WebP asset.
#[derive(Debug, Error)]
pub enum TranscodeError {
  /// The bytes are not an image in a supported format.
  #[error("failed to decode image: {0}")]
  Decode(#[from] image::ImageError),
  /// The WebP encoder rejected the pixel data.
  #[error("failed to encode webp: {0}")]
  Encode(String),
}

/// Output constraints applied to every transcoded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeOptions {
  /// Widest allowed output, in pixels.
  pub max_width: u32,
  /// Lossy encoder quality, 0-100.
  pub quality: u8,
}

impl Default for TranscodeOptions {
  fn default() -> Self {
    Self {
      max_width: 1920,
      quality: 80,
    }
  }
}

/// Output size for an image of `width` x `height` under a `max_width` cap.
///
/// Narrow images keep their dimensions. Wider ones are scaled to `max_width` with the height
/// rounded to preserve the aspect ratio.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
  if width <= max_width || width == 0 {
    return (width, height);
  }

  let scaled = (f64::from(height) * f64::from(max_width) / f64::from(width)).round();
  (max_width, (scaled as u32).max(1))
}

/// Decode `bytes`, cap the width and re-encode as lossy WebP.
pub fn transcode(bytes: &[u8], options: &TranscodeOptions) -> Result<Vec<u8>, TranscodeError> {
  let image = image::load_from_memory(bytes)?;
  let image = cap_width(image, options.max_width);
  encode_webp(&image, options.quality)
}

fn cap_width(image: DynamicImage, max_width: u32) -> DynamicImage {
  let (width, height) = target_dimensions(image.width(), image.height(), max_width);
  if width == image.width() && height == image.height() {
    return image;
  }
  image.resize_exact(width, height, FilterType::Lanczos3)
}

fn encode_webp(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, TranscodeError> {
  let (width, height) = (image.width(), image.height());
  let quality = f32::from(quality.min(100));

  // libwebp only takes 8-bit RGB or RGBA buffers.
  let encoded = if image.color().has_alpha() {
    let pixels = image.to_rgba8();
    webp::Encoder::from_rgba(pixels.as_raw(), width, height).encode_simple(false, quality)
  } else {
    let pixels = image.to_rgb8();
    webp::Encoder::from_rgb(pixels.as_raw(), width, height).encode_simple(false, quality)
  };

  encoded
    .map(|memory| memory.to_vec())
    .map_err(|err| TranscodeError::Encode(format!("{err:?}")))
}
