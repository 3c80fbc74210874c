#![forbid(unsafe_code)]

//! The framebuffer image that an emulation core draws into.
//!
//! An [`Image`] is `stride × height` cells of native color. The stride can be
//! wider than the visible width, in which case the extra cells at the end of
//! each row are padding: they're allocated and visible through the raw
//! [`pixels`](Image::pixels) and [`as_bytes`](Image::as_bytes) views, but
//! coordinate access and every conversion out of the image skip them.

use core::marker::PhantomData;

use alloc::vec::Vec;

use crate::{
  bitmap::{flip_rows, xy_width_to_index, Bitmap},
  color::{ColorCodec, NativeCodec},
  FbError,
};

/// A framebuffer of packed colors.
///
/// The codec parameter picks the color layout. You'll normally leave it as the
/// default, which is the layout this build's core draws with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image<C: ColorCodec = NativeCodec> {
  width: u32,
  height: u32,
  stride: u32,
  alpha: bool,
  pixels: Vec<C::Native>,
  codec: PhantomData<C>,
}
impl Image {
  /// Allocates a new image in this build's native color, with all pixels
  /// zeroed.
  ///
  /// * `stride` is pixels per row. Pass 0 to use `width`.
  /// * `alpha` marks if the alpha channel should be kept when the image is
  ///   written out or converted.
  ///
  /// ## Failure
  /// * Either dimension is 0.
  /// * `stride` is nonzero but less than `width`.
  /// * `stride * height` doesn't fit in `usize`.
  /// * Allocation failure.
  #[inline]
  pub fn new(width: u32, height: u32, stride: u32, alpha: bool) -> Result<Self, FbError> {
    Self::new_with_codec(width, height, stride, alpha)
  }
}
impl<C: ColorCodec> Image<C> {
  /// Allocates a new image in the codec's color layout, with all pixels
  /// zeroed.
  ///
  /// Works the same as [`Image::new`], for when you need a layout other than
  /// the native one.
  pub fn new_with_codec(width: u32, height: u32, stride: u32, alpha: bool) -> Result<Self, FbError> {
    if width == 0 || height == 0 {
      return Err(FbError::WidthOrHeightZero);
    }
    let stride = if stride == 0 { width } else { stride };
    if stride < width {
      return Err(FbError::StrideTooSmall);
    }
    let count =
      usize::try_from(stride)?.checked_mul(usize::try_from(height)?).ok_or(FbError::CheckedMath)?;
    let mut pixels: Vec<C::Native> = Vec::new();
    pixels.try_reserve_exact(count)?;
    pixels.resize(count, C::Native::default());
    Ok(Self { width, height, stride, alpha, pixels, codec: PhantomData })
  }

  /// Visible width in pixels.
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }
  /// Height in pixels.
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }
  /// Pixels per row, including padding.
  #[inline]
  #[must_use]
  pub const fn stride(&self) -> u32 {
    self.stride
  }
  /// If the alpha channel is kept on output.
  #[inline]
  #[must_use]
  pub const fn alpha(&self) -> bool {
    self.alpha
  }
  /// Sets if the alpha channel is kept on output.
  #[inline]
  pub fn set_alpha(&mut self, alpha: bool) {
    self.alpha = alpha;
  }

  #[inline]
  fn index_of(&self, x: u32, y: u32) -> Option<usize> {
    if x < self.width && y < self.height {
      Some(xy_width_to_index(x, y, self.stride))
    } else {
      None
    }
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<C::Native> {
    self.index_of(x, y).and_then(|i| self.pixels.get(i).copied())
  }
  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut C::Native> {
    let i = self.index_of(x, y)?;
    self.pixels.get_mut(i)
  }

  /// Gets the pixel at the position as a 32-bit ABGR value.
  #[inline]
  #[must_use]
  pub fn get_abgr(&self, x: u32, y: u32) -> Option<u32> {
    self.get(x, y).map(C::to_u32)
  }
  /// Sets the pixel at the position from a 32-bit ABGR value.
  ///
  /// Returns `false` (and changes nothing) if the position is out of bounds.
  #[inline]
  pub fn set_abgr(&mut self, x: u32, y: u32, abgr: u32) -> bool {
    match self.get_mut(x, y) {
      Some(p) => {
        *p = C::from_u32(abgr);
        true
      }
      None => false,
    }
  }

  /// All `stride × height` cells, padding included, row after row.
  #[inline]
  #[must_use]
  pub fn pixels(&self) -> &[C::Native] {
    &self.pixels
  }
  /// All `stride × height` cells, padding included, row after row.
  #[inline]
  #[must_use]
  pub fn pixels_mut(&mut self) -> &mut [C::Native] {
    &mut self.pixels
  }
  /// The raw bytes of the buffer, in native byte order.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.pixels)
  }
  /// The raw bytes of the buffer, in native byte order.
  #[inline]
  #[must_use]
  pub fn as_bytes_mut(&mut self) -> &mut [u8] {
    bytemuck::cast_slice_mut(&mut self.pixels)
  }

  /// Iterates the visible part of each row, top to bottom.
  #[inline]
  pub fn rows(&self) -> impl Iterator<Item = &[C::Native]> + '_ {
    let width = self.width as usize;
    self.pixels.chunks_exact(self.stride as usize).map(move |row| &row[..width])
  }

  /// Sets every cell, padding included, to the color given.
  #[inline]
  pub fn fill(&mut self, color: C::Native) {
    self.pixels.fill(color)
  }

  /// Flips the visible part of the image, top to bottom.
  #[inline]
  pub fn vertical_flip(&mut self) {
    flip_rows(&mut self.pixels, self.stride as usize, self.width as usize, self.height as usize)
  }

  /// Converts the visible region into a tightly packed bitmap.
  ///
  /// Each output pixel is the 32-bit color's bytes, `[R, G, B, A]`. When the
  /// image doesn't use alpha, channels 0 and 2 are swapped to give
  /// `[B, G, R, A]` ordering, which is what BGR-based consumers expect.
  /// Padding columns are dropped.
  pub fn to_bitmap(&self) -> Result<Bitmap<[u8; 4]>, FbError> {
    let count = (self.width as usize).checked_mul(self.height as usize).ok_or(FbError::CheckedMath)?;
    let mut pixels: Vec<[u8; 4]> = Vec::new();
    pixels.try_reserve_exact(count)?;
    for row in self.rows() {
      pixels.extend(row.iter().map(|&c| {
        let mut bytes = C::to_u32(c).to_le_bytes();
        if !self.alpha {
          bytes.swap(0, 2);
        }
        bytes
      }));
    }
    Ok(Bitmap { width: self.width, height: self.height, pixels })
  }

  /// Like [`to_bitmap`](Self::to_bitmap), as a flat `height × width × 4` byte
  /// vector.
  pub fn to_rgba_bytes(&self) -> Result<Vec<u8>, FbError> {
    let bitmap = self.to_bitmap()?;
    let mut out: Vec<u8> = Vec::new();
    out.try_reserve_exact(bitmap.pixels.len() * 4)?;
    out.extend_from_slice(bitmap.as_bytes());
    Ok(out)
  }
}
