#![forbid(unsafe_code)]

//! Provides a heap-allocated, tightly packed image type.
//!
//! This is what a framebuffer gets turned into when it's handed off to code
//! that expects `height × width × channels` data with no row padding.

use alloc::vec::Vec;

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
///
/// The framebuffer uses this same function, passing its stride as the width.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize).wrapping_mul(width as usize).wrapping_add(x as usize)
}

/// A direct-color image with no padding between rows.
///
/// The fields are public, but if you put them together weirdly the methods of
/// this type might do nothing or return `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct Bitmap<P = [u8; 4]> {
  pub width: u32,
  pub height: u32,
  pub pixels: Vec<P>,
}
impl<P> Bitmap<P> {
  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<&P> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }
  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut P> {
    if x < self.width && y < self.height {
      self.pixels.get_mut(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }
  /// Flips the image, top to bottom.
  ///
  /// If the buffer contains less pixels than `width * height` would indicate,
  /// this will do nothing.
  #[inline]
  pub fn vertical_flip(&mut self) {
    flip_rows(&mut self.pixels, self.width as usize, self.width as usize, self.height as usize)
  }
}
impl<P: bytemuck::Pod> Bitmap<P> {
  /// The pixel data as bytes, row after row.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    bytemuck::cast_slice(&self.pixels)
  }
}

/// Swaps whole rows of `data` top to bottom.
///
/// Each row starts `stride` elements after the last, and only the first
/// `width` elements of a row move. If `data` is shorter than the rows would
/// need, nothing happens.
pub(crate) fn flip_rows<P>(data: &mut [P], stride: usize, width: usize, height: usize) {
  if height < 2 || width > stride {
    return;
  }
  let needed = match stride.checked_mul(height - 1).and_then(|n| n.checked_add(width)) {
    Some(needed) => needed,
    None => return,
  };
  if let Some(data) = data.get_mut(..needed) {
    let mut top = 0;
    let mut bottom = height - 1;
    while top < bottom {
      let (low, high) = data.split_at_mut(bottom * stride);
      low[top * stride..top * stride + width].swap_with_slice(&mut high[..width]);
      top += 1;
      bottom -= 1;
    }
  }
}

#[test]
fn test_bitmap_vertical_flip() {
  let mut b = Bitmap { width: 2, height: 3, pixels: alloc::vec![1, 2, 3, 4, 5, 6] };
  b.vertical_flip();
  assert_eq!(b.pixels, [5, 6, 3, 4, 1, 2]);
  assert_eq!(b.get(1, 0), Some(&6));
  assert_eq!(b.get(2, 0), None);
  assert_eq!(b.get(0, 3), None);
}

#[test]
#[cfg(target_pointer_width = "64")]
fn test_xy_width_to_index_past_u32() {
  // a 2^32 + 2 cell buffer, the index must not wrap around to 2.
  assert_eq!(xy_width_to_index(2, 1 << 16, 1 << 16), (1_usize << 32) + 2);
  let max = u32::MAX as usize;
  assert_eq!(xy_width_to_index(u32::MAX, u32::MAX, u32::MAX), max * max + max);
}

#[test]
fn test_flip_rows_leaves_padding_alone() {
  // width 2, stride 3, the third column is padding
  let mut data = [1, 2, 0, 3, 4, 0, 5, 6, 9];
  flip_rows(&mut data, 3, 2, 3);
  assert_eq!(data, [5, 6, 0, 3, 4, 0, 1, 2, 9]);
  // too short, nothing moves
  let mut short = [1, 2, 0, 3];
  flip_rows(&mut short, 3, 2, 2);
  assert_eq!(short, [1, 2, 0, 3]);
}
