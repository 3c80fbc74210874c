//! Module for packed color values.
//!
//! There's two packed color layouts in play:
//! * **16-bit**: `A(1) B(5) G(5) R(5)`, high bit to low bit. Each color
//!   channel is 0 to 31, and alpha is a single bit.
//! * **32-bit**: `A(8) B(8) G(8) R(8)`, high byte to low byte. On a
//!   little-endian machine the bytes in memory are `R, G, B, A`.
//!
//! The emulation core draws in one of these two layouts, picked when the crate
//! is built (see [`NATIVE_WIDTH`]). That layout is the "native" color, and the
//! [`Color`] type alias names it. Code that wants to handle pixels in a fixed
//! layout goes through [`color_to_u32`] / [`u32_to_color`] (or the `u16`
//! versions) and never has to check which width is active.
//!
//! ## Depth Changes
//!
//! Going from 5 bits to 8 bits is a plain `<< 3`. The newly added low bits are
//! always zero, they are **not** filled with a copy of the high bits. This
//! exactly matches how the core itself writes 32-bit pixels, so a 16-bit frame
//! expanded here is byte-for-byte what a 32-bit build would have drawn.
//! Expanding and then compressing gives back the original value, but the
//! other direction loses the low 3 bits of each channel.

use bytemuck::Pod;
use core::fmt::Debug;

/// Expands a 16-bit color into the 32-bit layout.
///
/// All 16-bit values are valid. The alpha bit becomes either `0x00` or `0xFF`.
/// ```
/// # use fbimage::color::expand_16_to_32;
/// assert_eq!(expand_16_to_32(0x7C00), 0x00F8_0000);
/// assert_eq!(expand_16_to_32(0xFFFF), 0xFFF8_F8F8);
/// ```
#[inline]
#[must_use]
pub const fn expand_16_to_32(color: u16) -> u32 {
  let color = color as u32;
  let r = color & 0x1F;
  let g = (color >> 5) & 0x1F;
  let b = (color >> 10) & 0x1F;
  let a = (color >> 15) & 1;
  (r << 3) | (g << 11) | (b << 19) | ((a * 0xFF) << 24)
}

/// Compresses a 32-bit color into the 16-bit layout.
///
/// The low 3 bits of each color byte are dropped, and alpha keeps only its top
/// bit.
/// ```
/// # use fbimage::color::compress_32_to_16;
/// assert_eq!(compress_32_to_16(0x00FF_0000), 0x7C00);
/// assert_eq!(compress_32_to_16(0x7F00_0000), 0x0000);
/// ```
#[inline]
#[must_use]
pub const fn compress_32_to_16(color: u32) -> u16 {
  let r = (color >> 3) & 0x1F;
  let g = (color >> 11) & 0x1F;
  let b = (color >> 19) & 0x1F;
  let a = color >> 31;
  (r | (g << 5) | (b << 10) | (a << 15)) as u16
}

/// Conversions between one native color layout and the two fixed layouts.
///
/// For the layout matching `Native` the pair of functions is the identity,
/// and for the other layout they're [`expand_16_to_32`] and
/// [`compress_32_to_16`].
pub trait ColorCodec {
  /// The packed color type the core draws with.
  type Native: Pod + Default + Debug + PartialEq + Eq;

  /// Which native width this codec handles.
  const WIDTH: NativeWidth;

  /// 32-bit color into the native color.
  fn from_u32(color: u32) -> Self::Native;
  /// Native color into a 32-bit color.
  fn to_u32(color: Self::Native) -> u32;
  /// 16-bit color into the native color.
  fn from_u16(color: u16) -> Self::Native;
  /// Native color into a 16-bit color.
  fn to_u16(color: Self::Native) -> u16;
}

/// Codec for cores that draw 16-bit color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Abgr1555;
impl ColorCodec for Abgr1555 {
  type Native = u16;
  const WIDTH: NativeWidth = NativeWidth::Two;
  #[inline]
  fn from_u32(color: u32) -> u16 {
    compress_32_to_16(color)
  }
  #[inline]
  fn to_u32(color: u16) -> u32 {
    expand_16_to_32(color)
  }
  #[inline]
  fn from_u16(color: u16) -> u16 {
    color
  }
  #[inline]
  fn to_u16(color: u16) -> u16 {
    color
  }
}

/// Codec for cores that draw 32-bit color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Abgr8888;
impl ColorCodec for Abgr8888 {
  type Native = u32;
  const WIDTH: NativeWidth = NativeWidth::Four;
  #[inline]
  fn from_u32(color: u32) -> u32 {
    color
  }
  #[inline]
  fn to_u32(color: u32) -> u32 {
    color
  }
  #[inline]
  fn from_u16(color: u16) -> u32 {
    expand_16_to_32(color)
  }
  #[inline]
  fn to_u16(color: u32) -> u16 {
    compress_32_to_16(color)
  }
}

/// The size of one native color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NativeWidth {
  /// 2 bytes per pixel.
  Two,
  /// 4 bytes per pixel.
  Four,
}
impl NativeWidth {
  /// Picks the width for a pixel size in bytes, if it's one we support.
  #[inline]
  #[must_use]
  pub const fn from_bytes(bytes: usize) -> Option<Self> {
    match bytes {
      2 => Some(Self::Two),
      4 => Some(Self::Four),
      _ => None,
    }
  }
  /// Bytes per pixel.
  #[inline]
  #[must_use]
  pub const fn bytes(self) -> usize {
    match self {
      Self::Two => 2,
      Self::Four => 4,
    }
  }
}

/// The codec for the color layout this build draws with.
#[cfg(feature = "color16")]
pub type NativeCodec = Abgr1555;
/// The codec for the color layout this build draws with.
#[cfg(not(feature = "color16"))]
pub type NativeCodec = Abgr8888;

/// A native color value.
pub type Color = <NativeCodec as ColorCodec>::Native;

/// Native color width of this build.
pub const NATIVE_WIDTH: NativeWidth = <NativeCodec as ColorCodec>::WIDTH;

const _: () = assert!(NATIVE_WIDTH.bytes() == core::mem::size_of::<Color>());

/// Native color to the 32-bit layout.
#[inline]
#[must_use]
pub fn color_to_u32(color: Color) -> u32 {
  NativeCodec::to_u32(color)
}

/// Native color to the 16-bit layout.
#[inline]
#[must_use]
pub fn color_to_u16(color: Color) -> u16 {
  NativeCodec::to_u16(color)
}

/// 32-bit color to the native layout.
#[inline]
#[must_use]
pub fn u32_to_color(color: u32) -> Color {
  NativeCodec::from_u32(color)
}

/// 16-bit color to the native layout.
#[inline]
#[must_use]
pub fn u16_to_color(color: u16) -> Color {
  NativeCodec::from_u16(color)
}

#[test]
fn test_expand_16_to_32_fixed_values() {
  assert_eq!(expand_16_to_32(0x0000), 0x0000_0000);
  assert_eq!(expand_16_to_32(0xFFFF), 0xFFF8_F8F8);
  assert_eq!(expand_16_to_32(0x7FFF), 0x00F8_F8F8);
  assert_eq!(expand_16_to_32(0x7C00), 0x00F8_0000);
  assert_eq!(expand_16_to_32(0x03E0), 0x0000_F800);
  assert_eq!(expand_16_to_32(0x001F), 0x0000_00F8);
  assert_eq!(expand_16_to_32(0x8000), 0xFF00_0000);
  // red 1 stays at 8, no bit replication
  assert_eq!(expand_16_to_32(0x0001), 0x0000_0008);
}

#[test]
fn test_compress_32_to_16_fixed_values() {
  assert_eq!(compress_32_to_16(0x0000_0000), 0x0000);
  assert_eq!(compress_32_to_16(0xFFFF_FFFF), 0xFFFF);
  assert_eq!(compress_32_to_16(0x00FF_0000), 0x7C00);
  assert_eq!(compress_32_to_16(0x0000_FF00), 0x03E0);
  assert_eq!(compress_32_to_16(0x0000_00FF), 0x001F);
  assert_eq!(compress_32_to_16(0x0000_0007), 0x0000);
  assert_eq!(compress_32_to_16(0x8000_0000), 0x8000);
  assert_eq!(compress_32_to_16(0x7F00_0000), 0x0000);
}

#[test]
fn test_every_u16_survives_expansion() {
  for c in 0..=u16::MAX {
    let wide = expand_16_to_32(c);
    assert_eq!(wide & 0x0007_0707, 0, "low bits set for {c:#06X}");
    assert!(wide >> 24 == 0 || wide >> 24 == 0xFF, "alpha for {c:#06X}");
    assert_eq!(compress_32_to_16(wide), c, "failed {c:#06X}");
  }
}

#[test]
fn test_codecs_identity_side() {
  for c in [0_u16, 1, 0x1234, 0x7FFF, 0x8000, 0xFFFF] {
    assert_eq!(Abgr1555::from_u16(c), c);
    assert_eq!(Abgr1555::to_u16(c), c);
    assert_eq!(Abgr8888::from_u16(c), expand_16_to_32(c));
    assert_eq!(Abgr8888::to_u16(expand_16_to_32(c)), c);
  }
  for c in [0_u32, 0xFF, 0x00F8_F8F8, 0x1234_5678, 0xFFFF_FFFF] {
    assert_eq!(Abgr8888::from_u32(c), c);
    assert_eq!(Abgr8888::to_u32(c), c);
    assert_eq!(Abgr1555::from_u32(c), compress_32_to_16(c));
    assert_eq!(Abgr1555::to_u32(compress_32_to_16(c)), expand_16_to_32(compress_32_to_16(c)));
  }
}

#[test]
fn test_native_width() {
  assert_eq!(NativeWidth::from_bytes(2), Some(NativeWidth::Two));
  assert_eq!(NativeWidth::from_bytes(4), Some(NativeWidth::Four));
  assert_eq!(NativeWidth::from_bytes(3), None);
  assert_eq!(NativeWidth::from_bytes(0), None);
  assert_eq!(core::mem::size_of::<Color>(), NATIVE_WIDTH.bytes());
  #[cfg(feature = "color16")]
  assert_eq!(NATIVE_WIDTH, NativeWidth::Two);
  #[cfg(not(feature = "color16"))]
  assert_eq!(NATIVE_WIDTH, NativeWidth::Four);
}
