use super::*;

/// The four byte type tag of a PNG chunk.
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
}
impl Debug for PngChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for b in self.0 {
      f.write_char(b as char)?;
    }
    Ok(())
  }
}

/// An unparsed chunk from a PNG.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PngRawChunk<'b> {
  type_: PngChunkType,
  data: &'b [u8],
  declared_crc: u32,
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
  /// The chunk's data bytes.
  #[inline]
  #[must_use]
  pub const fn data(&self) -> &'b [u8] {
    self.data
  }
  /// The CRC value that was written after the chunk.
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  /// The CRC value computed from the chunk's type and data.
  #[inline]
  #[must_use]
  pub fn actual_crc(&self) -> u32 {
    png_crc(self.type_.0, self.data)
  }
}

/// An iterator that produces successive raw chunks from PNG bytes.
///
/// This never panics, even on data that isn't a PNG at all. It just stops when
/// the bytes don't hold another complete chunk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngRawChunkIter<'b>(&'b [u8]);
impl<'b> PngRawChunkIter<'b> {
  /// Pass the full PNG bytes, it will remove the PNG signature automatically.
  ///
  /// The signature bytes aren't checked, use [`is_png_signature_correct`] for
  /// that.
  #[inline]
  pub const fn new(bytes: &'b [u8]) -> Self {
    match bytes {
      [_, _, _, _, _, _, _, _, rest @ ..] => Self(rest),
      _ => Self(&[]),
    }
  }
}
impl<'b> Iterator for PngRawChunkIter<'b> {
  type Item = PngRawChunk<'b>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    let (len_bytes, rest) = split_array::<4>(self.0)?;
    let chunk_len = u32::from_be_bytes(len_bytes) as usize;
    let (type_bytes, rest) = split_array::<4>(rest)?;
    if rest.len() < chunk_len {
      return None;
    }
    let (data, rest) = rest.split_at(chunk_len);
    let (crc_bytes, rest) = split_array::<4>(rest)?;
    self.0 = rest;
    Some(PngRawChunk {
      type_: PngChunkType(type_bytes),
      data,
      declared_crc: u32::from_be_bytes(crc_bytes),
    })
  }
}

#[inline]
fn split_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let mut a = [0_u8; N];
    a.copy_from_slice(head);
    Some((a, tail))
  } else {
    None
  }
}
