use super::*;

/// Image Data.
///
/// * Image data is stored with Zlib compression applied.
/// * Images can have more than one IDAT chunk. They should all be stored in a
///   row. Multiple chunks are treated as a single Zlib datastream.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IDAT(Vec<u8>);
impl From<&[u8]> for IDAT {
  #[inline]
  #[must_use]
  fn from(data: &[u8]) -> Self {
    Self(data.to_vec())
  }
}
impl From<Vec<u8>> for IDAT {
  #[inline]
  #[must_use]
  fn from(data: Vec<u8>) -> Self {
    Self(data)
  }
}
impl Debug for IDAT {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("IDAT").field(&&self.0[..self.0.len().min(12)]).field(&self.0.len()).finish()
  }
}
impl IDAT {
  /// The compressed bytes of this chunk.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }
}
