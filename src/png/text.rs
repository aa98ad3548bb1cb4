use super::*;

/// Textual data
///
/// Spec: [tEXt](https://www.w3.org/TR/png/#11tEXt)
///
/// The chunk data is a keyword, a single null byte, and then the text. The
/// text runs to the end of the chunk and has no null terminator of its own.
/// Both are Latin-1, and normally the keyword is 1-79 bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
pub struct tEXt {
  keyword: Vec<u8>,
  text: Vec<u8>,
}
impl tEXt {
  /// The keyword bytes, without the separator.
  #[inline]
  #[must_use]
  pub fn keyword(&self) -> &[u8] {
    &self.keyword
  }

  /// The text bytes.
  #[inline]
  #[must_use]
  pub fn text(&self) -> &[u8] {
    &self.text
  }

  /// The keyword as `&str`, if it's valid UTF-8 (eg: all ASCII).
  #[inline]
  #[must_use]
  pub fn keyword_str(&self) -> Option<&str> {
    core::str::from_utf8(&self.keyword).ok()
  }

  /// The text as `&str`, if it's valid UTF-8 (eg: all ASCII).
  #[inline]
  #[must_use]
  pub fn text_str(&self) -> Option<&str> {
    core::str::from_utf8(&self.text).ok()
  }
}
impl TryFrom<&[u8]> for tEXt {
  type Error = PngError;
  /// Splits at the *first* null byte. Any later null bytes are part of the
  /// text.
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    let keyword_len = data
      .iter()
      .position(|&u| u == 0)
      .ok_or(PngError::MalformedChunk(PngChunkType::tEXt))?;
    let (keyword, rest) = data.split_at(keyword_len);
    let text = &rest[1..];
    Ok(Self { keyword: keyword.to_vec(), text: text.to_vec() })
  }
}
