//! From the PNG spec:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.
//!
//! With 8-bit RGB data the "corresponding byte of the pixel to the left" is
//! always 3 bytes back.

use super::*;

use crate::image::{Color, PixelBuffer};

/// The filter types of PNG filter method 0.
///
/// Each scanline of the decompressed data starts with one of these as a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  /// The bytes are stored as-is.
  None = 0,
  /// Each byte is stored as the difference from the byte to the left.
  Sub = 1,
  /// Each byte is stored as the difference from the byte above.
  Up = 2,
  /// Each byte is stored as the difference from the average of left and above.
  Average = 3,
  /// Each byte is stored as the difference from the [`paeth_predict`] output.
  Paeth = 4,
}
impl TryFrom<u8> for FilterType {
  /// The unknown filter byte.
  type Error = u8;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      other => return Err(other),
    })
  }
}
impl FilterType {
  /// Reconstructs a filtered byte `x`.
  ///
  /// * `a` reconstructed byte of the pixel to the left
  /// * `b` reconstructed byte of the pixel above
  /// * `c` reconstructed byte of the pixel above and to the left
  ///
  /// Any neighbor outside the image should be given as 0.
  #[inline]
  #[must_use]
  pub const fn reconstruct(self, x: u8, a: u8, b: u8, c: u8) -> u8 {
    match self {
      Self::None => x,
      Self::Sub => x.wrapping_add(a),
      Self::Up => x.wrapping_add(b),
      Self::Average => x.wrapping_add(average(a, b)),
      Self::Paeth => x.wrapping_add(paeth_predict(a, b, c)),
    }
  }
}

/// `floor((a + b) / 2)`, computed without overflowing a `u8`.
#[inline]
#[must_use]
const fn average(a: u8, b: u8) -> u8 {
  ((a as u16 + b as u16) >> 1) as u8
}

/// The Paeth filter function computes a simple linear function of the three
/// neighboring bytes (left `a`, above `b`, upper left `c`).
///
/// The output is the neighbor closest to the computed value, with ties going
/// to `a` first, then `b`, then `c`.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  // i32 math is wide enough that none of this can overflow.
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // Note: the order of these tests is fixed by the PNG spec.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Byte `j` of the pixel to the left within `row`, or 0 at the left edge.
#[inline]
fn left(row: &[u8], j: usize) -> u8 {
  j.checked_sub(IHDR::BYTES_PER_PIXEL).and_then(|i| row.get(i)).copied().unwrap_or(0)
}

/// Byte `j` of the previous row, or 0 on the first row.
#[inline]
fn above(prev: Option<&[u8]>, j: usize) -> u8 {
  prev.and_then(|p| p.get(j)).copied().unwrap_or(0)
}

/// Byte `j` of the pixel to the left within the previous row, or 0 on the
/// first row or at the left edge.
#[inline]
fn upper_left(prev: Option<&[u8]>, j: usize) -> u8 {
  prev.map_or(0, |p| left(p, j))
}

/// Unfilters decompressed data into a new buffer of only the pixel bytes.
///
/// The `decompressed` data must be exactly
/// [`zlib_decompression_requirement`](IHDR::zlib_decompression_requirement)
/// bytes, each scanline being one filter type byte and then
/// `width * 3` filtered bytes. The output is `width * 3 * height` bytes, with
/// the filter bytes removed.
///
/// Each scanline uses the already reconstructed previous scanline, so the
/// lines are processed strictly top to bottom.
///
/// ## Failure
/// * [`DecompressionFailed`](PngError::DecompressionFailed) if `decompressed`
///   is the wrong length.
/// * [`UnknownFilterType`](PngError::UnknownFilterType) if any scanline has a
///   filter type byte outside of `0..=4`. No output is given even if earlier
///   lines were fine.
pub fn unfilter_scanlines(header: &IHDR, decompressed: &[u8]) -> PngResult<Vec<u8>> {
  let expected_len = header.zlib_decompression_requirement()?;
  if decompressed.len() != expected_len {
    return Err(PngError::DecompressionFailed);
  }
  let stride = header.bytes_per_scanline()?;
  if stride == 0 || header.height == 0 {
    return Err(PngError::ImageDimensionsTooSmall);
  }

  // can't overflow, it's smaller than `expected_len`.
  let out_len = stride * header.height as usize;
  let mut out: Vec<u8> = Vec::new();
  out.try_reserve(out_len)?;
  out.resize(out_len, 0);

  for (y, filterline) in decompressed.chunks_exact(stride + 1).enumerate() {
    let Some((&filter_byte, filtered)) = filterline.split_first() else {
      continue;
    };
    let filter = FilterType::try_from(filter_byte).map_err(|filter| {
      log::warn!("unknown filter type {filter} on scanline {y}");
      PngError::UnknownFilterType { filter, scanline: y as u32 }
    })?;
    log::trace!("scanline {y}: {filter:?}");

    let (done, rest) = out.split_at_mut(y * stride);
    let prev: Option<&[u8]> = if y == 0 { None } else { Some(&done[(y - 1) * stride..]) };
    let current: &mut [u8] = &mut rest[..stride];
    for (j, x) in filtered.iter().copied().enumerate() {
      let a = left(current, j);
      let b = above(prev, j);
      let c = upper_left(prev, j);
      current[j] = filter.reconstruct(x, a, b, c);
    }
  }

  Ok(out)
}

/// Turns the joined [`IDAT`] data of a PNG into pixels.
///
/// The `idat` bytes are decompressed with the `decompressor`, which must give
/// back exactly
/// [`zlib_decompression_requirement`](IHDR::zlib_decompression_requirement)
/// bytes. Those are then unfiltered and each 3 bytes becomes one pixel, with
/// alpha always 255.
///
/// ## Failure
/// * [`UnsupportedMethod`](PngError::UnsupportedMethod): the header's
///   compression method or filter method isn't 0. The decompressor is not
///   called.
/// * [`ImageDimensionsTooSmall`](PngError::ImageDimensionsTooSmall) or
///   [`DimensionsTooLarge`](PngError::DimensionsTooLarge): the image size
///   can't be worked with.
/// * [`DecompressionFailed`](PngError::DecompressionFailed): the decompressor
///   gave an error, or the wrong number of bytes.
/// * [`UnknownFilterType`](PngError::UnknownFilterType): see
///   [`unfilter_scanlines`].
pub fn reconstruct<D: Decompressor>(
  header: &IHDR, idat: &[u8], decompressor: &mut D,
) -> PngResult<PixelBuffer> {
  if header.compression_method != 0 || header.filter_method != 0 {
    log::warn!(
      "unsupported compression method {} / filter method {}",
      header.compression_method,
      header.filter_method
    );
    return Err(PngError::UnsupportedMethod {
      compression: header.compression_method,
      filter: header.filter_method,
    });
  }
  if header.width == 0 || header.height == 0 {
    return Err(PngError::ImageDimensionsTooSmall);
  }
  if !header.is_rgb8() {
    log::warn!(
      "bit depth {}, color type {}, interlace {}: decoding as 8-bit RGB anyway",
      header.bit_depth,
      header.color_type,
      header.interlace_method
    );
  }

  let expected_len = header.zlib_decompression_requirement()?;
  let decompressed = decompressor.decompress(idat, expected_len).map_err(|e| {
    log::warn!("decompression error: {e:?}");
    PngError::DecompressionFailed
  })?;
  if decompressed.len() != expected_len {
    log::warn!(
      "expected {expected_len} bytes after decompression, got {}",
      decompressed.len()
    );
    return Err(PngError::DecompressionFailed);
  }
  log::debug!("decompressed {} bytes of image data to {expected_len}", idat.len());

  let unfiltered = unfilter_scanlines(header, &decompressed)?;
  // the length is `width * 3 * height`, so this can't fail.
  let rgb: &[[u8; 3]] = bytemuck::cast_slice(&unfiltered);
  let mut pixels: Vec<Color> = Vec::new();
  pixels.try_reserve(rgb.len())?;
  pixels.extend(rgb.iter().map(|&[r, g, b]| Color { r, g, b, a: 255 }));
  Ok(PixelBuffer::new(header.width, header.height, pixels))
}
