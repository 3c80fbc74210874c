use fbimage::{
  color::{Abgr1555, Abgr8888, ColorCodec},
  png::*,
  FbError, Image,
};

/// Pulls the IHDR and inflated IDAT data back out of PNG bytes.
fn decode_simple(bytes: &[u8]) -> ([u8; 13], Vec<u8>) {
  assert!(is_png_signature_correct(bytes));
  let mut ihdr = [0; 13];
  let mut zlib = Vec::new();
  for chunk in PngRawChunkIter::new(bytes) {
    assert_eq!(chunk.declared_crc(), chunk.actual_crc());
    match chunk.chunk_type() {
      PngChunkType::IHDR => ihdr.copy_from_slice(chunk.data()),
      PngChunkType::IDAT => zlib.extend_from_slice(chunk.data()),
      _ => (),
    }
  }
  (ihdr, miniz_oxide::inflate::decompress_to_vec_zlib(&zlib).unwrap())
}

fn check_round_trip<C: ColorCodec>(image: &Image<C>) {
  let bytes = image.to_png_bytes().unwrap();
  let (ihdr, filtered) = decode_simple(&bytes);
  assert_eq!(u32::from_be_bytes(ihdr[0..4].try_into().unwrap()), image.width());
  assert_eq!(u32::from_be_bytes(ihdr[4..8].try_into().unwrap()), image.height());
  assert_eq!(ihdr[8], 8);
  let channels = if image.alpha() { 4 } else { 3 };
  assert_eq!(ihdr[9], if image.alpha() { 6 } else { 2 });

  let line_len = 1 + image.width() as usize * channels;
  assert_eq!(filtered.len(), line_len * image.height() as usize);
  for (y, line) in filtered.chunks_exact(line_len).enumerate() {
    assert_eq!(line[0], 0, "filter byte of line {y}");
    for (x, px) in line[1..].chunks_exact(channels).enumerate() {
      let expected = image.get_abgr(x as u32, y as u32).unwrap().to_le_bytes();
      assert_eq!(px, &expected[..channels], "x:{x} y:{y}");
    }
  }
}

#[test]
fn test_rgb_output_matches_pixels() {
  let mut image = Image::<Abgr8888>::new_with_codec(7, 5, 9, false).unwrap();
  let values = super::rand_u32s(image.pixels().len());
  image.pixels_mut().copy_from_slice(&values);
  check_round_trip(&image);
}

#[test]
fn test_rgba_output_matches_pixels() {
  let mut image = Image::<Abgr8888>::new_with_codec(4, 4, 0, true).unwrap();
  let values = super::rand_u32s(image.pixels().len());
  image.pixels_mut().copy_from_slice(&values);
  check_round_trip(&image);
}

#[test]
fn test_16_bit_output_is_expanded() {
  let mut image = Image::<Abgr1555>::new_with_codec(3, 2, 4, true).unwrap();
  for (p, x) in image.pixels_mut().iter_mut().zip(super::rand_u32s(8)) {
    *p = x as u16;
  }
  check_round_trip(&image);

  image.fill(0xFFFF);
  let (_, filtered) = decode_simple(&image.to_png_bytes().unwrap());
  // the low 3 bits of each color byte stay clear, alpha is fully on.
  for line in filtered.chunks_exact(1 + 3 * 4) {
    for px in line[1..].chunks_exact(4) {
      assert_eq!(px, &[0xF8, 0xF8, 0xF8, 0xFF]);
    }
  }
}

#[test]
fn test_save_png_to_io_writer() {
  let mut image = Image::<Abgr8888>::new_with_codec(2, 2, 0, false).unwrap();
  image.fill(0x00F8_0000);
  let mut out = std::io::Cursor::new(Vec::new());
  image.save_png(&mut out).unwrap();
  assert_eq!(out.into_inner(), image.to_png_bytes().unwrap());
}

struct FailAfter(usize);
impl std::io::Write for FailAfter {
  fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
    if self.0 < buf.len() {
      return Err(std::io::Error::new(std::io::ErrorKind::Other, "full"));
    }
    self.0 -= buf.len();
    Ok(buf.len())
  }
  fn flush(&mut self) -> std::io::Result<()> {
    Ok(())
  }
}

#[test]
fn test_save_png_reports_sink_failure() {
  let image = Image::<Abgr8888>::new_with_codec(2, 2, 0, false).unwrap();
  let total = image.to_png_bytes().unwrap().len();
  for limit in [0, 8, 20, total - 1] {
    assert_eq!(image.save_png(FailAfter(limit)), Err(FbError::Sink), "limit {limit}");
  }
  assert_eq!(image.save_png(FailAfter(total)), Ok(()));
}

#[test]
fn test_broken_writer_stays_broken() {
  let image = Image::<Abgr8888>::new_with_codec(2, 2, 0, false).unwrap();
  let mut png = PngWriter::new(FailAfter(0), PngMode::Rgb);
  assert_eq!(png.write_header(&image), Err(FbError::Sink));
  assert_eq!(png.write_header(&image), Err(FbError::PngState));
  assert_eq!(png.write_pixels(&image), Err(FbError::PngState));
}

#[test]
fn test_compression_levels_decode_the_same() {
  let mut image = Image::<Abgr8888>::new_with_codec(16, 16, 0, true).unwrap();
  let values = super::rand_u32s(image.pixels().len());
  image.pixels_mut().copy_from_slice(&values);
  let mut outputs = Vec::new();
  for level in [0, 1, 6, 10] {
    let mut png = PngWriter::new(Vec::new(), PngMode::Rgba).with_level(level);
    png.write_header(&image).unwrap();
    png.write_pixels(&image).unwrap();
    outputs.push(decode_simple(&png.write_close().unwrap()).1);
  }
  assert!(outputs.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_PngRawChunkIter_no_panics() {
  // even totally random data should never panic the iterator!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    for _ in PngRawChunkIter::new(&v) {
      //
    }
  }
}
