use super::*;

/// The four byte type tag of a PNG chunk.
///
/// The tag bytes are expected to be ASCII letters, and the `Debug` and
/// `Display` impls print each byte `as` a `char`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkType(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkType {
  /// Image header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Image data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image end
  pub const IEND: Self = Self(*b"IEND");
  /// Textual data
  pub const tEXt: Self = Self(*b"tEXt");

  /// Makes a type from the big-endian `u32` code of the tag.
  #[inline]
  #[must_use]
  pub const fn from_u32(code: u32) -> Self {
    Self(code.to_be_bytes())
  }

  /// The tag as a big-endian `u32` code.
  #[inline]
  #[must_use]
  pub const fn to_u32(self) -> u32 {
    u32::from_be_bytes(self.0)
  }

  /// The exact payload length this type must have, if it's a fixed length
  /// type.
  #[inline]
  #[must_use]
  pub const fn fixed_length(self) -> Option<u32> {
    match self.0 {
      [b'I', b'H', b'D', b'R'] => Some(IHDR::DATA_LEN),
      [b'I', b'E', b'N', b'D'] => Some(0),
      _ => None,
    }
  }

  /// Checks that this is a type we can parse, and that the declared payload
  /// length is allowed for the type.
  ///
  /// This only needs the 8 byte chunk prefix, so it can reject a chunk before
  /// the payload is even looked at.
  #[inline]
  pub fn check_declared_length(self, declared_length: u32) -> PngResult<()> {
    match self {
      Self::IHDR | Self::IEND => {
        if self.fixed_length() == Some(declared_length) {
          Ok(())
        } else {
          Err(PngError::MalformedChunk(self))
        }
      }
      Self::IDAT | Self::tEXt => Ok(()),
      _ => Err(PngError::UnsupportedChunkType(self)),
    }
  }
}
impl Debug for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_char('\"')?;
    core::fmt::Display::fmt(self, f)?;
    f.write_char('\"')
  }
}
impl core::fmt::Display for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}
impl From<[u8; 4]> for PngChunkType {
  #[inline]
  #[must_use]
  fn from(array: [u8; 4]) -> Self {
    Self(array)
  }
}

/// An unparsed chunk from a PNG.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  pub(crate) type_: PngChunkType,
  pub(crate) data: &'b [u8],
  pub(crate) declared_crc: u32,
}
impl Debug for PngRawChunk<'_> {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngRawChunk")
      .field("type_", &self.type_)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> PngRawChunk<'b> {
  /// The chunk's type tag.
  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> PngChunkType {
    self.type_
  }

  /// The chunk's payload.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }

  /// The CRC value stored in the chunk.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }

  /// Computes the CRC that the chunk *should* have.
  ///
  /// Nothing in this crate rejects a chunk when this doesn't match the
  /// declared CRC.
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    let mut crc = PngCrc::new();
    crc.update(self.type_.0);
    crc.update(self.data.iter().copied());
    crc.finish()
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// * The iterator ends when the bytes run out exactly at a chunk boundary.
/// * A chunk that's cut short, has an unknown type, or has the wrong length
///   for its type gives an error, and then the iterator ends.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngRawChunkIter<'b>(pub(crate) &'b [u8]);
impl<'b> PngRawChunkIter<'b> {
  /// Checks the PNG signature and then iterates the chunks after it.
  #[inline]
  pub fn new(bytes: &'b [u8]) -> PngResult<Self> {
    match bytes {
      [137, 80, 78, 71, 13, 10, 26, 10, rest @ ..] => Ok(Self(rest)),
      _ => Err(PngError::InvalidSignature),
    }
  }

  /// The bytes that haven't been iterated yet.
  #[inline]
  #[must_use]
  pub const fn remaining(&self) -> &'b [u8] {
    self.0
  }

  fn pull_chunk(&mut self) -> PngResult<PngRawChunk<'b>> {
    let (len_bytes, rest) =
      try_split_off_byte_array::<4>(self.0).ok_or(PngError::UnexpectedEndOfInput)?;
    let (type_bytes, rest) =
      try_split_off_byte_array::<4>(rest).ok_or(PngError::UnexpectedEndOfInput)?;
    let declared_length = u32::from_be_bytes(len_bytes);
    let type_ = PngChunkType(type_bytes);
    type_.check_declared_length(declared_length)?;
    let chunk_len = declared_length as usize;
    if rest.len() < chunk_len {
      return Err(PngError::UnexpectedEndOfInput);
    }
    let (data, rest) = rest.split_at(chunk_len);
    let (crc_bytes, rest) =
      try_split_off_byte_array::<4>(rest).ok_or(PngError::UnexpectedEndOfInput)?;
    self.0 = rest;
    Ok(PngRawChunk { type_, data, declared_crc: u32::from_be_bytes(crc_bytes) })
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = PngResult<PngRawChunk<'b>>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.0.is_empty() {
      return None;
    }
    let out = self.pull_chunk();
    if out.is_err() {
      self.0 = &[];
    }
    Some(out)
  }
}

#[inline]
fn try_split_off_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let a: [u8; N] = head.try_into().ok()?;
    Some((a, tail))
  } else {
    None
  }
}
