use super::*;

/// Image Header
///
/// Spec: [IHDR](https://www.w3.org/TR/png/#11IHDR)
///
/// All fields are kept exactly as declared. Decoding only ever looks at the
/// dimensions and the two method fields, pixels are always treated as 8-bit
/// RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: u8,
  /// must be 0 (zlib) to decode
  pub compression_method: u8,
  /// must be 0 (adaptive filtering) to decode
  pub filter_method: u8,
  /// 0 for no interlace, 1 for Adam7
  pub interlace_method: u8,
}
impl IHDR {
  /// Length of the chunk data for a header.
  pub const DATA_LEN: u32 = 13;

  /// Bytes per pixel of the decoded data.
  pub const BYTES_PER_PIXEL: usize = 3;

  /// Bytes of pixel data in each scanline, not counting the filter byte.
  #[inline]
  pub fn bytes_per_scanline(&self) -> PngResult<usize> {
    (self.width as usize).checked_mul(Self::BYTES_PER_PIXEL).ok_or(PngError::DimensionsTooLarge)
  }

  /// Gets the buffer size that zlib decompression must produce.
  ///
  /// This is `width * height * 3 + height`, one filter type byte for the front
  /// of each line.
  #[inline]
  pub fn zlib_decompression_requirement(&self) -> PngResult<usize> {
    self
      .bytes_per_scanline()?
      .checked_add(1)
      .and_then(|bytes_per_filterline| bytes_per_filterline.checked_mul(self.height as usize))
      .ok_or(PngError::DimensionsTooLarge)
  }

  /// If the header describes the only format that decodes exactly as declared.
  #[inline]
  #[must_use]
  pub const fn is_rgb8(&self) -> bool {
    self.bit_depth == 8 && self.color_type == 2 && self.interlace_method == 0
  }
}
impl TryFrom<&[u8]> for IHDR {
  type Error = PngError;
  #[inline]
  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    match *value {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] => {
        Ok(Self {
          width: u32::from_be_bytes([w0, w1, w2, w3]),
          height: u32::from_be_bytes([h0, h1, h2, h3]),
          bit_depth,
          color_type,
          compression_method,
          filter_method,
          interlace_method,
        })
      }
      _ => Err(PngError::MalformedChunk(PngChunkType::IHDR)),
    }
  }
}
impl TryFrom<&PngChunk> for IHDR {
  type Error = ();
  #[inline]
  fn try_from(value: &PngChunk) -> Result<Self, Self::Error> {
    match value {
      PngChunk::IHDR(ihdr) => Ok(*ihdr),
      _ => Err(()),
    }
  }
}
