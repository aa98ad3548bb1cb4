use alloc::collections::TryReserveError;

use crate::png::PngChunkType;

/// Shorthand for a result with a [`PngError`].
pub type PngResult<T> = Result<T, PngError>;

/// An error from the `pngview` crate.
///
/// Every error is terminal for the decode that produced it, there's no
/// partial output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PngError {
  /// The first 8 bytes aren't the PNG signature (or there weren't 8 bytes).
  #[error("invalid PNG signature")]
  InvalidSignature,

  /// A chunk's declared length is wrong for its type, or its payload layout
  /// is wrong (eg: a `tEXt` chunk without a null separator).
  #[error("malformed `{0}` chunk")]
  MalformedChunk(PngChunkType),

  /// A chunk type other than `IHDR`, `IDAT`, `tEXt`, or `IEND`.
  #[error("unsupported chunk type `{0}`")]
  UnsupportedChunkType(PngChunkType),

  /// The data ended before an `IEND` chunk was found.
  #[error("unexpected end of input")]
  UnexpectedEndOfInput,

  /// The first chunk of the data wasn't an `IHDR` chunk.
  #[error("first chunk is not IHDR")]
  FirstChunkNotIHDR,

  /// The header declares a compression method or filter method other than 0.
  #[error("unsupported compression method {compression} or filter method {filter}")]
  UnsupportedMethod {
    /// Declared compression method.
    compression: u8,
    /// Declared filter method.
    filter: u8,
  },

  /// The declared width and/or height of this image is 0.
  #[error("image width or height is zero")]
  ImageDimensionsTooSmall,

  /// The image dimensions overflow the buffer size computations.
  #[error("image dimensions are too large")]
  DimensionsTooLarge,

  /// The decompressor failed, or gave back the wrong number of bytes.
  #[error("image data decompression failed")]
  DecompressionFailed,

  /// A scanline used a filter type outside of `0..=4`.
  #[error("unknown filter type {filter} on scanline {scanline}")]
  UnknownFilterType {
    /// The filter type byte.
    filter: u8,
    /// The zero-based scanline index.
    scanline: u32,
  },

  /// The allocator couldn't give us enough space.
  #[error("allocation failure")]
  Alloc,
}
impl From<TryReserveError> for PngError {
  #[inline]
  fn from(_: TryReserveError) -> Self {
    Self::Alloc
  }
}
