/// Lookup table for the reflected `0xEDB8_8320` polynomial, one entry per
/// possible low byte of the running CRC.
const CRC_TABLE: [u32; 256] = {
  let mut table = [0_u32; 256];
  let mut n = 0;
  while n < table.len() {
    let mut c = n as u32;
    let mut bit = 0;
    while bit < 8 {
      c = if (c & 1) != 0 { 0xEDB8_8320 ^ (c >> 1) } else { c >> 1 };
      bit += 1;
    }
    table[n] = c;
    n += 1;
  }
  table
};

/// A running PNG CRC-32 computation.
///
/// Feed it the chunk type tag and then the chunk data, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PngCrc(u32);
impl Default for PngCrc {
  #[inline]
  #[must_use]
  fn default() -> Self {
    Self::new()
  }
}
impl PngCrc {
  /// A fresh CRC with no bytes fed in.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self(u32::MAX)
  }

  /// Adds more bytes to the CRC.
  #[inline]
  pub fn update(&mut self, bytes: impl IntoIterator<Item = u8>) {
    for byte in bytes {
      self.0 = CRC_TABLE[usize::from(self.0 as u8 ^ byte)] ^ (self.0 >> 8);
    }
  }

  /// The CRC of all bytes fed in so far.
  #[inline]
  #[must_use]
  pub const fn finish(self) -> u32 {
    self.0 ^ u32::MAX
  }
}

/// Computes the PNG CRC-32 of the bytes given in one go.
///
/// For a chunk, this covers the type tag followed by the chunk data (not the
/// length).
#[inline]
#[must_use]
pub fn png_crc(bytes: impl IntoIterator<Item = u8>) -> u32 {
  let mut crc = PngCrc::new();
  crc.update(bytes);
  crc.finish()
}
