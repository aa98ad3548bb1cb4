use super::*;

/// A parsed PNG chunk
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
pub enum PngChunk {
  /// Image Header
  IHDR(IHDR),
  /// Image Data
  IDAT(IDAT),
  /// Textual Data
  tEXt(tEXt),
  /// Image End
  IEND,
}
impl PngChunk {
  /// The type tag that goes with this chunk.
  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> PngChunkType {
    match self {
      Self::IHDR(_) => PngChunkType::IHDR,
      Self::IDAT(_) => PngChunkType::IDAT,
      Self::tEXt(_) => PngChunkType::tEXt,
      Self::IEND => PngChunkType::IEND,
    }
  }
}
impl TryFrom<PngRawChunk<'_>> for PngChunk {
  type Error = PngError;
  #[inline]
  fn try_from(raw: PngRawChunk<'_>) -> Result<Self, Self::Error> {
    Ok(match raw.type_ {
      PngChunkType::IHDR => PngChunk::IHDR(IHDR::try_from(raw.data)?),
      PngChunkType::IDAT => {
        let mut data = Vec::new();
        data.try_reserve(raw.data.len())?;
        data.extend_from_slice(raw.data);
        PngChunk::IDAT(IDAT::from(data))
      }
      PngChunkType::tEXt => PngChunk::tEXt(tEXt::try_from(raw.data)?),
      PngChunkType::IEND if raw.data.is_empty() => PngChunk::IEND,
      PngChunkType::IEND => return Err(PngError::MalformedChunk(PngChunkType::IEND)),
      other => return Err(PngError::UnsupportedChunkType(other)),
    })
  }
}

/// A parsed chunk along with the framing info it had in the PNG data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PngChunkRecord {
  declared_length: u32,
  chunk: PngChunk,
  declared_crc: u32,
}
impl PngChunkRecord {
  /// Length of the chunk's data, as declared in the PNG.
  #[inline]
  #[must_use]
  pub const fn declared_length(&self) -> u32 {
    self.declared_length
  }

  /// The type tag of the chunk.
  #[inline]
  #[must_use]
  pub const fn chunk_type(&self) -> PngChunkType {
    self.chunk.chunk_type()
  }

  /// The parsed chunk data.
  #[inline]
  #[must_use]
  pub const fn chunk(&self) -> &PngChunk {
    &self.chunk
  }

  /// The CRC value stored after the chunk. This is never checked.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
}
impl TryFrom<PngRawChunk<'_>> for PngChunkRecord {
  type Error = PngError;
  #[inline]
  fn try_from(raw: PngRawChunk<'_>) -> Result<Self, Self::Error> {
    Ok(Self {
      declared_length: raw.data.len() as u32,
      declared_crc: raw.declared_crc,
      chunk: PngChunk::try_from(raw)?,
    })
  }
}

/// All of the chunks of a PNG, in the order they appeared.
///
/// A value of this type always starts with an [`IHDR`] chunk and ends with an
/// `IEND` chunk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PngChunks {
  records: Vec<PngChunkRecord>,
}
impl PngChunks {
  /// Parses the complete bytes of a PNG.
  ///
  /// Parsing stops after the `IEND` chunk, and any bytes after that are
  /// ignored.
  ///
  /// ## Failure
  /// * [`InvalidSignature`](PngError::InvalidSignature): the data doesn't
  ///   start with [`PNG_SIGNATURE`].
  /// * [`MalformedChunk`](PngError::MalformedChunk): `IHDR` data that isn't 13
  ///   bytes, `IEND` data that isn't empty, or `tEXt` data with no null
  ///   separator.
  /// * [`UnsupportedChunkType`](PngError::UnsupportedChunkType): any chunk type
  ///   besides `IHDR`, `IDAT`, `tEXt`, or `IEND`.
  /// * [`UnexpectedEndOfInput`](PngError::UnexpectedEndOfInput): the data ran
  ///   out before `IEND`.
  /// * [`FirstChunkNotIHDR`](PngError::FirstChunkNotIHDR): the first chunk
  ///   wasn't a header.
  pub fn parse(bytes: &[u8]) -> PngResult<Self> {
    let mut it = PngRawChunkIter::new(bytes).map_err(|e| {
      log::warn!("invalid PNG signature");
      e
    })?;
    log::debug!("valid PNG signature");
    let mut records: Vec<PngChunkRecord> = Vec::new();
    #[allow(clippy::while_let_on_iterator)]
    while let Some(raw_result) = it.next() {
      let raw = raw_result.map_err(|e| {
        log::warn!("chunk {n}: {e}", n = records.len());
        e
      })?;
      log::trace!("chunk {n}: {raw:?}", n = records.len());
      if raw.compute_actual_crc() != raw.declared_crc {
        log::trace!("chunk {n}: declared CRC doesn't match the data", n = records.len());
      }
      if records.is_empty() && raw.type_ != PngChunkType::IHDR {
        log::warn!("first chunk is `{}`, not IHDR", raw.type_);
        return Err(PngError::FirstChunkNotIHDR);
      }
      let record = PngChunkRecord::try_from(raw)?;
      let is_end = record.chunk == PngChunk::IEND;
      records.try_reserve(1)?;
      records.push(record);
      if is_end {
        log::debug!("read {} chunks", records.len());
        if !it.remaining().is_empty() {
          log::trace!("ignoring {} bytes after IEND", it.remaining().len());
        }
        return Ok(Self { records });
      }
    }
    log::warn!("data ended after {} chunks without IEND", records.len());
    Err(PngError::UnexpectedEndOfInput)
  }

  /// The number of chunks.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.records.len()
  }

  /// If there are no chunks (which never happens with a parsed PNG).
  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Iterates the chunk records in stream order.
  #[inline]
  pub fn iter(&self) -> core::slice::Iter<'_, PngChunkRecord> {
    self.records.iter()
  }

  /// Gets the header out of the first chunk.
  #[inline]
  pub fn header(&self) -> PngResult<IHDR> {
    self
      .records
      .first()
      .and_then(|record| IHDR::try_from(&record.chunk).ok())
      .ok_or(PngError::FirstChunkNotIHDR)
  }

  /// Joins the data of every [`IDAT`] chunk, in stream order.
  pub fn idat_bytes(&self) -> PngResult<Vec<u8>> {
    let idat_it = || {
      self.records.iter().filter_map(|record| match &record.chunk {
        PngChunk::IDAT(idat) => Some(idat.as_bytes()),
        _ => None,
      })
    };
    let total: usize = idat_it().map(<[u8]>::len).sum();
    let mut out = Vec::new();
    out.try_reserve(total)?;
    idat_it().for_each(|bytes| out.extend_from_slice(bytes));
    Ok(out)
  }

  /// Iterates all [`tEXt`] chunks.
  #[inline]
  pub fn texts(&self) -> impl Iterator<Item = &tEXt> + '_ {
    self.records.iter().filter_map(|record| match &record.chunk {
      PngChunk::tEXt(text) => Some(text),
      _ => None,
    })
  }
}
impl<'a> IntoIterator for &'a PngChunks {
  type Item = &'a PngChunkRecord;
  type IntoIter = core::slice::Iter<'a, PngChunkRecord>;
  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.records.iter()
  }
}
