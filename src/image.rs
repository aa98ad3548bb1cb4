//! Provides the heap-allocated decoded image type.

use alloc::vec::Vec;
use pixel_formats::r8g8b8a8_Srgb;

use crate::{png::*, PngResult};

/// A single decoded pixel.
///
/// PNG RGB data has no alpha channel, so decoded pixels always have `a` as
/// 255.
pub type Color = r8g8b8a8_Srgb;

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// A decoded image, with pixels stored row-major from the top left.
///
/// Once built the pixels don't change. Use [`into_pixels`](Self::into_pixels)
/// if you need to take ownership of the pixel data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
  width: u32,
  height: u32,
  pixels: Vec<Color>,
}
impl PixelBuffer {
  /// Assumes that `pixels.len() == width * height`.
  #[inline]
  pub(crate) fn new(width: u32, height: u32, pixels: Vec<Color>) -> Self {
    debug_assert_eq!(pixels.len(), xy_width_to_index(0, height, width));
    Self { width, height, pixels }
  }

  /// Width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }

  /// Height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }

  /// All the pixels, row-major.
  #[inline]
  #[must_use]
  pub fn pixels(&self) -> &[Color] {
    &self.pixels
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<Color> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width)).copied()
    } else {
      None
    }
  }

  /// Unwraps the pixel data.
  #[inline]
  #[must_use]
  pub fn into_pixels(self) -> Vec<Color> {
    self.pixels
  }

  /// Decodes an already parsed PNG, using the decompressor given.
  ///
  /// ## Failure
  /// * The header is missing or declares unsupported methods.
  /// * Decompression fails, or produces the wrong amount of data.
  /// * A scanline has an unknown filter type.
  pub fn try_from_png_chunks<D: Decompressor>(
    chunks: &PngChunks, decompressor: &mut D,
  ) -> PngResult<Self> {
    let ihdr = chunks.header()?;
    let idat = chunks.idat_bytes()?;
    reconstruct(&ihdr, &idat, decompressor)
  }

  /// Attempts to make an image from PNG bytes.
  ///
  /// This parses the chunks, decompresses the image data with
  /// [`ZlibDecompressor`], and then unfilters it.
  #[cfg(feature = "miniz_oxide")]
  #[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
  pub fn try_from_png_bytes(bytes: &[u8]) -> PngResult<Self> {
    let chunks = PngChunks::parse(bytes)?;
    Self::try_from_png_chunks(&chunks, &mut ZlibDecompressor)
  }
}
