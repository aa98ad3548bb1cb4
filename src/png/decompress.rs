use super::*;

/// Something that can inflate the joined [`IDAT`] data of a PNG.
///
/// The decoder always knows exactly how many bytes the decompressed data must
/// be, and it passes that along as `expected_len`. Returning an `Err`, or an
/// `Ok` with any other length, both make the decode fail with
/// [`DecompressionFailed`](PngError::DecompressionFailed).
pub trait Decompressor {
  /// The error type of this decompressor.
  type Error: Debug;

  /// Decompresses all of `compressed`.
  fn decompress(&mut self, compressed: &[u8], expected_len: usize)
    -> Result<Vec<u8>, Self::Error>;
}

/// Zlib decompression using the `miniz_oxide` crate.
///
/// The output buffer is exactly `expected_len` bytes, so a data stream that
/// would produce more than that is an error instead of being cut off. The
/// Adler-32 checksum at the end of the zlib stream is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg(feature = "miniz_oxide")]
#[cfg_attr(docs_rs, doc(cfg(feature = "miniz_oxide")))]
pub struct ZlibDecompressor;
#[cfg(feature = "miniz_oxide")]
impl Decompressor for ZlibDecompressor {
  type Error = miniz_oxide::inflate::TINFLStatus;
  #[inline]
  fn decompress(
    &mut self, compressed: &[u8], expected_len: usize,
  ) -> Result<Vec<u8>, Self::Error> {
    let mut out: Vec<u8> = Vec::new();
    out.try_reserve(expected_len).map_err(|_| miniz_oxide::inflate::TINFLStatus::Failed)?;
    out.resize(expected_len, 0);
    let count = miniz_oxide::inflate::decompress_slice_iter_to_slice(
      &mut out,
      core::iter::once(compressed),
      true,
      false,
    )?;
    out.truncate(count);
    Ok(out)
  }
}
