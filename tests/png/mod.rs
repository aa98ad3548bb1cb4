use miniz_oxide::deflate::compress_to_vec_zlib;
use pngview::{
  png::{
    png_crc, reconstruct, Decompressor, PngChunkType, PngChunks, PngRawChunkIter,
    ZlibDecompressor, IHDR, PNG_SIGNATURE,
  },
  Color, PixelBuffer, PngError,
};

fn chunk(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let mut out = Vec::new();
  out.extend_from_slice(&(data.len() as u32).to_be_bytes());
  out.extend_from_slice(ty);
  out.extend_from_slice(data);
  out.extend_from_slice(&png_crc(ty.iter().chain(data).copied()).to_be_bytes());
  out
}

fn ihdr_data(width: u32, height: u32) -> Vec<u8> {
  let mut out = Vec::new();
  out.extend_from_slice(&width.to_be_bytes());
  out.extend_from_slice(&height.to_be_bytes());
  out.extend_from_slice(&[8, 2, 0, 0, 0]);
  out
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
  let p = i16::from(a) + i16::from(b) - i16::from(c);
  let pa = (p - i16::from(a)).abs();
  let pb = (p - i16::from(b)).abs();
  let pc = (p - i16::from(c)).abs();
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Filters each row of RGB bytes with the filter type paired with it, the way
/// an encoder would.
fn filter_rows(rows: &[(u8, Vec<u8>)]) -> Vec<u8> {
  let mut out = Vec::new();
  let mut prev: Option<&[u8]> = None;
  for (filter, row) in rows {
    out.push(*filter);
    for (j, &x) in row.iter().enumerate() {
      let a = if j >= 3 { row[j - 3] } else { 0 };
      let b = prev.map_or(0, |p| p[j]);
      let c = prev.map_or(0, |p| if j >= 3 { p[j - 3] } else { 0 });
      let predicted = match *filter {
        0 => 0,
        1 => a,
        2 => b,
        3 => ((u16::from(a) + u16::from(b)) / 2) as u8,
        4 => paeth(a, b, c),
        _ => x,
      };
      out.push(x.wrapping_sub(predicted));
    }
    prev = Some(row.as_slice());
  }
  out
}

/// A complete PNG with the filtered rows compressed into `idat_parts` IDAT
/// chunks.
fn encode_png(width: u32, rows: &[(u8, Vec<u8>)], idat_parts: usize) -> Vec<u8> {
  let compressed = compress_to_vec_zlib(&filter_rows(rows), 6);
  let part_len = compressed.len().div_ceil(idat_parts).max(1);
  let mut out = PNG_SIGNATURE.to_vec();
  out.extend(chunk(b"IHDR", &ihdr_data(width, rows.len() as u32)));
  out.extend(chunk(b"tEXt", b"Software\0hand rolled"));
  for part in compressed.chunks(part_len) {
    out.extend(chunk(b"IDAT", part));
  }
  out.extend(chunk(b"IEND", &[]));
  out
}

fn gradient_rows(width: u32, height: u32, filter_for: impl Fn(u32) -> u8) -> Vec<(u8, Vec<u8>)> {
  (0..height)
    .map(|y| {
      let row = (0..width)
        .flat_map(|x| [(x * 37 + y) as u8, (y * 19 + x * x) as u8, (x ^ y).wrapping_mul(91) as u8])
        .collect();
      (filter_for(y), row)
    })
    .collect()
}

fn expected_pixels(rows: &[(u8, Vec<u8>)]) -> Vec<Color> {
  rows
    .iter()
    .flat_map(|(_, row)| row.chunks_exact(3).map(|p| Color { r: p[0], g: p[1], b: p[2], a: 255 }))
    .collect()
}

/// Counts calls, and never gives the right amount of data.
struct CountingDecompressor {
  calls: usize,
  output: Vec<u8>,
}
impl Decompressor for CountingDecompressor {
  type Error = ();
  fn decompress(&mut self, _: &[u8], _: usize) -> Result<Vec<u8>, ()> {
    self.calls += 1;
    Ok(self.output.clone())
  }
}

#[test]
fn test_decode_identity_2x2() {
  let rows = vec![(0, vec![0, 0, 0, 10, 10, 10]), (0, vec![5, 5, 5, 5, 5, 5])];
  let image = PixelBuffer::try_from_png_bytes(&encode_png(2, &rows, 1)).unwrap();
  assert_eq!(image.width(), 2);
  assert_eq!(image.height(), 2);
  assert_eq!(
    image.pixels(),
    &[
      Color { r: 0, g: 0, b: 0, a: 255 },
      Color { r: 10, g: 10, b: 10, a: 255 },
      Color { r: 5, g: 5, b: 5, a: 255 },
      Color { r: 5, g: 5, b: 5, a: 255 },
    ]
  );
}

#[test]
fn test_decode_each_filter_type() {
  for filter in 0..=4 {
    let rows = gradient_rows(13, 7, |_| filter);
    let image = PixelBuffer::try_from_png_bytes(&encode_png(13, &rows, 1)).unwrap();
    assert_eq!(image.pixels(), expected_pixels(&rows).as_slice(), "filter {filter}");
  }
}

#[test]
fn test_decode_mixed_filters() {
  let rows = gradient_rows(31, 20, |y| ((y * 7) % 5) as u8);
  let image = PixelBuffer::try_from_png_bytes(&encode_png(31, &rows, 1)).unwrap();
  assert_eq!(image.into_pixels(), expected_pixels(&rows));
}

#[test]
fn test_decode_idat_split_anywhere() {
  let rows = gradient_rows(9, 9, |y| (y % 5) as u8);
  let expected = expected_pixels(&rows);
  for parts in [1, 2, 3, 8, 50] {
    let bytes = encode_png(9, &rows, parts);
    let chunks = PngChunks::parse(&bytes).unwrap();
    let idat_count =
      chunks.iter().filter(|record| record.chunk_type() == PngChunkType::IDAT).count();
    assert!(idat_count >= parts.min(2), "parts {parts}");
    let image = PixelBuffer::try_from_png_chunks(&chunks, &mut ZlibDecompressor).unwrap();
    assert_eq!(image.pixels(), expected.as_slice(), "parts {parts}");
  }
}

#[test]
fn test_decode_reads_text() {
  let rows = gradient_rows(2, 2, |_| 0);
  let chunks = PngChunks::parse(&encode_png(2, &rows, 1)).unwrap();
  let texts: Vec<_> = chunks.texts().collect();
  assert_eq!(texts.len(), 1);
  assert_eq!(texts[0].keyword(), b"Software");
  assert_eq!(texts[0].text(), b"hand rolled");
}

#[test]
fn test_decode_ignores_bytes_after_end() {
  let rows = gradient_rows(3, 3, |_| 1);
  let mut bytes = encode_png(3, &rows, 1);
  bytes.extend_from_slice(b"\0\0\0\x05junk");
  let image = PixelBuffer::try_from_png_bytes(&bytes).unwrap();
  assert_eq!(image.pixels(), expected_pixels(&rows).as_slice());
}

#[test]
fn test_decode_bad_filter_byte() {
  let mut rows = gradient_rows(4, 4, |_| 0);
  rows[2].0 = 7;
  assert_eq!(
    PixelBuffer::try_from_png_bytes(&encode_png(4, &rows, 1)),
    Err(PngError::UnknownFilterType { filter: 7, scanline: 2 })
  );
}

#[test]
fn test_decode_corrupt_zlib_data() {
  let mut bytes = PNG_SIGNATURE.to_vec();
  bytes.extend(chunk(b"IHDR", &ihdr_data(2, 2)));
  bytes.extend(chunk(b"IDAT", b"this is not zlib data"));
  bytes.extend(chunk(b"IEND", &[]));
  assert_eq!(PixelBuffer::try_from_png_bytes(&bytes), Err(PngError::DecompressionFailed));
}

#[test]
fn test_decode_wrong_amount_of_image_data() {
  // rows for a 2x3 image, but the header says 2x2
  let rows = gradient_rows(2, 3, |_| 0);
  let compressed = compress_to_vec_zlib(&filter_rows(&rows), 6);
  let mut bytes = PNG_SIGNATURE.to_vec();
  bytes.extend(chunk(b"IHDR", &ihdr_data(2, 2)));
  bytes.extend(chunk(b"IDAT", &compressed));
  bytes.extend(chunk(b"IEND", &[]));
  assert_eq!(PixelBuffer::try_from_png_bytes(&bytes), Err(PngError::DecompressionFailed));

  // and too little
  let mut bytes = PNG_SIGNATURE.to_vec();
  bytes.extend(chunk(b"IHDR", &ihdr_data(2, 4)));
  bytes.extend(chunk(b"IDAT", &compressed));
  bytes.extend(chunk(b"IEND", &[]));
  assert_eq!(PixelBuffer::try_from_png_bytes(&bytes), Err(PngError::DecompressionFailed));
}

#[test]
fn test_unsupported_methods_skip_decompression() {
  for (compression_method, filter_method) in [(1, 0), (0, 1), (3, 9)] {
    let header = IHDR {
      width: 2,
      height: 2,
      bit_depth: 8,
      color_type: 2,
      compression_method,
      filter_method,
      interlace_method: 0,
    };
    let mut decompressor = CountingDecompressor { calls: 0, output: vec![0; 14] };
    assert_eq!(
      reconstruct(&header, &[1, 2, 3], &mut decompressor),
      Err(PngError::UnsupportedMethod { compression: compression_method, filter: filter_method })
    );
    assert_eq!(decompressor.calls, 0);
  }
}

#[test]
fn test_decompressor_output_size_is_checked() {
  let header = IHDR::try_from(ihdr_data(2, 2).as_slice()).unwrap();
  let mut short = CountingDecompressor { calls: 0, output: vec![0; 10] };
  assert_eq!(reconstruct(&header, &[], &mut short), Err(PngError::DecompressionFailed));
  assert_eq!(short.calls, 1);
  let mut long = CountingDecompressor { calls: 0, output: vec![0; 20] };
  assert_eq!(reconstruct(&header, &[], &mut long), Err(PngError::DecompressionFailed));
  assert_eq!(long.calls, 1);
}

#[test]
fn test_framing_errors() {
  let good = encode_png(2, &gradient_rows(2, 2, |_| 0), 1);

  let mut bad_sig = good.clone();
  bad_sig[1] = b'p';
  assert_eq!(PngChunks::parse(&bad_sig), Err(PngError::InvalidSignature));
  assert_eq!(PixelBuffer::try_from_png_bytes(&good[..5]), Err(PngError::InvalidSignature));

  for cut in [9, 20, good.len() - 1] {
    assert_eq!(PngChunks::parse(&good[..cut]), Err(PngError::UnexpectedEndOfInput), "cut {cut}");
  }

  let mut bytes = PNG_SIGNATURE.to_vec();
  bytes.extend(chunk(b"IHDR", &ihdr_data(2, 2)[..12]));
  bytes.extend(chunk(b"IEND", &[]));
  assert_eq!(PngChunks::parse(&bytes), Err(PngError::MalformedChunk(PngChunkType::IHDR)));

  let mut bytes = PNG_SIGNATURE.to_vec();
  bytes.extend(chunk(b"IHDR", &ihdr_data(2, 2)));
  bytes.extend(chunk(b"IEND", b"x"));
  assert_eq!(PngChunks::parse(&bytes), Err(PngError::MalformedChunk(PngChunkType::IEND)));

  let mut bytes = PNG_SIGNATURE.to_vec();
  bytes.extend(chunk(b"IHDR", &ihdr_data(2, 2)));
  bytes.extend(chunk(b"pHYs", &[0; 9]));
  bytes.extend(chunk(b"IEND", &[]));
  assert_eq!(
    PngChunks::parse(&bytes),
    Err(PngError::UnsupportedChunkType(PngChunkType(*b"pHYs")))
  );

  let mut bytes = PNG_SIGNATURE.to_vec();
  bytes.extend(chunk(b"IDAT", &[]));
  bytes.extend(chunk(b"IHDR", &ihdr_data(2, 2)));
  bytes.extend(chunk(b"IEND", &[]));
  assert_eq!(PngChunks::parse(&bytes), Err(PngError::FirstChunkNotIHDR));
}

#[test]
fn test_PngRawChunkIter_no_panics() {
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    if let Ok(it) = PngRawChunkIter::new(&v) {
      for _ in it {
        //
      }
    }
    let _ = PixelBuffer::try_from_png_bytes(&v);
  }
  // random data after a good signature gets a lot further
  for _ in 0..100 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(super::rand_bytes(256));
    for _ in PngRawChunkIter::new(&v).unwrap() {
      //
    }
    let _ = PixelBuffer::try_from_png_bytes(&v);
  }
  // and random image data after a good header
  for _ in 0..100 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend(chunk(b"IHDR", &ihdr_data(5, 5)));
    v.extend(chunk(b"IDAT", &super::rand_bytes(64)));
    v.extend(chunk(b"IEND", &[]));
    assert!(PixelBuffer::try_from_png_bytes(&v).is_err());
  }
}
