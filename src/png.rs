#![forbid(unsafe_code)]

//! Module for writing framebuffers out as PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! The output is always the simplest PNG that can hold the frame: 8 bits per
//! channel, RGB or RGBA, not interlaced, every scanline using filter type 0
//! (None), and all of the image data in a single `IDAT` chunk. Emulator frames
//! are small and the point is to get them out quickly and correctly, not to
//! win on file size.
//!
//! ## Writing
//!
//! The quick way is [`Image::save_png`] or [`Image::to_png_bytes`].
//!
//! If you want to drive the steps yourself:
//!
//! 1) Make a [`PngWriter`] around some [`PngSink`].
//! 2) Call [`write_header`](PngWriter::write_header) with the image.
//! 3) Call [`write_pixels`](PngWriter::write_pixels) with the same image (or
//!    at least one with the same dimensions).
//! 4) Call [`write_close`](PngWriter::write_close) to finish the data stream
//!    and get your sink back.
//!
//! Calling the steps in any other order is an [`FbError::PngState`] error.

use core::fmt::{Debug, Write};

use alloc::vec::Vec;

use crate::{color::ColorCodec, framebuffer::Image, FbError};

mod crc32;
pub use crc32::*;

mod raw_chunk;
pub use raw_chunk::*;


/// The 8 bytes that start every PNG data stream.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG signature is correct.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Which channels the PNG stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PngMode {
  /// Red, Green, Blue. The alpha channel is dropped.
  Rgb,
  /// Red, Green, Blue, Alpha
  Rgba,
}
impl PngMode {
  /// The number of channels in this mode.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Rgb => 3,
      Self::Rgba => 4,
    }
  }
  /// The `IHDR` color type value for this mode.
  #[inline]
  #[must_use]
  pub const fn color_type(self) -> u8 {
    match self {
      Self::Rgb => 2,
      Self::Rgba => 6,
    }
  }
}

/// Somewhere that PNG bytes can go.
pub trait PngSink {
  /// Writes all of the bytes, or fails.
  fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), FbError>;
}
#[cfg(feature = "std")]
impl<W: std::io::Write> PngSink for W {
  #[inline]
  fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), FbError> {
    self.write_all(bytes).map_err(|_| FbError::Sink)
  }
}
#[cfg(not(feature = "std"))]
impl PngSink for Vec<u8> {
  #[inline]
  fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), FbError> {
    self.try_reserve(bytes.len())?;
    self.extend_from_slice(bytes);
    Ok(())
  }
}

/// Chunk data can't be longer than this.
const MAX_CHUNK_LEN: usize = (1 << 31) - 1;

/// The zlib level used unless [`PngWriter::with_level`] says otherwise.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
  Fresh,
  Header { width: u32, height: u32 },
  Pixels,
  /// A sink write failed partway through, so the output is junk.
  Broken,
}

/// Writes one image out as a PNG, one step at a time.
#[derive(Debug)]
pub struct PngWriter<W: PngSink> {
  sink: W,
  mode: PngMode,
  level: u8,
  state: WriterState,
}
impl<W: PngSink> PngWriter<W> {
  /// Makes a writer that will send the PNG to `sink`.
  #[inline]
  pub const fn new(sink: W, mode: PngMode) -> Self {
    Self { sink, mode, level: DEFAULT_COMPRESSION_LEVEL, state: WriterState::Fresh }
  }

  /// Sets the zlib compression level, 0 (store only) through 10 (slowest).
  ///
  /// Values above 10 are treated as 10.
  #[inline]
  #[must_use]
  pub fn with_level(mut self, level: u8) -> Self {
    self.level = level.min(10);
    self
  }

  /// The channel mode this writer was made with.
  #[inline]
  #[must_use]
  pub const fn mode(&self) -> PngMode {
    self.mode
  }

  fn write_chunk(&mut self, chunk_type: PngChunkType, data: &[u8]) -> Result<(), FbError> {
    if data.len() > MAX_CHUNK_LEN {
      return Err(FbError::CheckedMath);
    }
    let len = data.len() as u32;
    let crc = png_crc(chunk_type.0, data);
    let out = self
      .sink
      .write_bytes(&len.to_be_bytes())
      .and_then(|()| self.sink.write_bytes(&chunk_type.0))
      .and_then(|()| self.sink.write_bytes(data))
      .and_then(|()| self.sink.write_bytes(&crc.to_be_bytes()));
    if out.is_err() {
      self.state = WriterState::Broken;
    }
    out
  }

  /// Writes the PNG signature and the `IHDR` chunk for the image.
  pub fn write_header<C: ColorCodec>(&mut self, image: &Image<C>) -> Result<(), FbError> {
    if self.state != WriterState::Fresh {
      return Err(FbError::PngState);
    }
    let (width, height) = (image.width(), image.height());
    let mut ihdr = [0_u8; 13];
    ihdr[0..4].copy_from_slice(&width.to_be_bytes());
    ihdr[4..8].copy_from_slice(&height.to_be_bytes());
    ihdr[8] = 8;
    ihdr[9] = self.mode.color_type();
    // compression, filter, and interlace methods are all 0.

    if self.sink.write_bytes(&PNG_SIGNATURE).is_err() {
      self.state = WriterState::Broken;
      return Err(FbError::Sink);
    }
    self.write_chunk(PngChunkType::IHDR, &ihdr)?;
    self.state = WriterState::Header { width, height };
    Ok(())
  }

  /// Writes all of the visible pixels of the image as one `IDAT` chunk.
  ///
  /// The image must have the dimensions given to
  /// [`write_header`](Self::write_header).
  pub fn write_pixels<C: ColorCodec>(&mut self, image: &Image<C>) -> Result<(), FbError> {
    match self.state {
      WriterState::Header { width, height }
        if width == image.width() && height == image.height() => {}
      _ => return Err(FbError::PngState),
    }
    let channels = self.mode.channel_count();
    let line_len = (image.width() as usize)
      .checked_mul(channels)
      .and_then(|n| n.checked_add(1))
      .ok_or(FbError::CheckedMath)?;
    let total = line_len.checked_mul(image.height() as usize).ok_or(FbError::CheckedMath)?;
    let mut filtered: Vec<u8> = Vec::new();
    filtered.try_reserve_exact(total)?;
    for row in image.rows() {
      // filter type: None
      filtered.push(0);
      for &c in row {
        filtered.extend_from_slice(&C::to_u32(c).to_le_bytes()[..channels]);
      }
    }
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&filtered, self.level);
    self.write_chunk(PngChunkType::IDAT, &compressed)?;
    self.state = WriterState::Pixels;
    Ok(())
  }

  /// Writes the `IEND` chunk and gives back the sink.
  ///
  /// The pixels must have been written already.
  pub fn write_close(mut self) -> Result<W, FbError> {
    if self.state != WriterState::Pixels {
      return Err(FbError::PngState);
    }
    self.write_chunk(PngChunkType::IEND, &[])?;
    Ok(self.sink)
  }
}

impl<C: ColorCodec> Image<C> {
  /// The PNG mode matching this image's alpha setting.
  #[inline]
  #[must_use]
  pub const fn png_mode(&self) -> PngMode {
    if self.alpha() {
      PngMode::Rgba
    } else {
      PngMode::Rgb
    }
  }

  /// Writes the image to `sink` as a PNG.
  ///
  /// The header and pixels are written in order and then the stream is always
  /// closed, even after a failure. The first error encountered is returned.
  pub fn save_png<W: PngSink>(&self, sink: W) -> Result<(), FbError> {
    let mut png = PngWriter::new(sink, self.png_mode());
    let written = png.write_header(self).and_then(|()| png.write_pixels(self));
    let closed = png.write_close();
    written.and(closed.map(drop))
  }

  /// Encodes the image as PNG bytes in memory.
  pub fn to_png_bytes(&self) -> Result<Vec<u8>, FbError> {
    let mut png = PngWriter::new(Vec::new(), self.png_mode());
    png.write_header(self)?;
    png.write_pixels(self)?;
    png.write_close()
  }
}
