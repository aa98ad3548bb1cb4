//! Holds all the tools for decoding PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## Decoding Stages
//!
//! The general format of a PNG is that the information is stored in "chunks".
//! Each chunk is a big-endian `u32` length, a four byte type tag, that many
//! bytes of data, and then a big-endian `u32` CRC. This module understands
//! four chunk types:
//! * **Header** ([`IHDR`]) - The image's dimensions and pixel format. This must
//!   be the first chunk.
//! * **Image Data** ([`IDAT`]) - One or more chunks of compressed data. All of
//!   the compressed data forms a single zlib data stream, so the chunks must be
//!   joined in the order they appear before decompression.
//! * **Text** ([`tEXt`]) - A keyword and a text value.
//! * **End** - The last chunk, lets you know you had the full PNG and your data
//!   wasn't truncated accidentally.
//!
//! Any other chunk type is an error. That includes ancillary chunks that a
//! more complete decoder would skip over.
//!
//! Decoding happens in three steps:
//!
//! 1) [`PngChunks::parse`] reads the signature and all of the chunks.
//! 2) The joined image data is passed to a [`Decompressor`] along with the
//!    exact number of bytes that the header says should come out of it.
//! 3) [`reconstruct`] undoes the per-scanline filtering and packs the bytes
//!    into a [`PixelBuffer`](crate::PixelBuffer).
//!
//! ## Limitations
//!
//! * The CRC of each chunk is read but never used to reject data. A corrupted
//!   chunk with a wrong CRC decodes just the same as a good one. The
//!   [`png_crc`] function is available if you want to check yourself.
//! * Pixels are always assumed to be 8-bit RGB. The `bit_depth`,
//!   `color_type`, and `interlace_method` header fields are not used to pick a
//!   different layout.

use core::fmt::{Debug, Write};

use alloc::vec::Vec;

use crate::{PngError, PngResult};

mod raw_chunk;
pub use raw_chunk::*;

mod ihdr;
pub use ihdr::*;

mod idat;
pub use idat::*;

mod text;
pub use text::*;

mod chunks;
pub use chunks::*;

mod crc32;
pub use crc32::*;

mod decompress;
pub use decompress::*;

mod unfilter;
pub use unfilter::*;


/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}
