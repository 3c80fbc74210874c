use core::{fmt, num::TryFromIntError};

/// An error from the `fbimage` crate.
///
/// Color conversions never fail, so everything here comes from allocating an
/// image or writing one out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FbError {
  /// The allocator couldn't give us enough space.
  #[cfg(feature = "alloc")]
  Alloc,

  /// The requested width and/or height of the image is 0.
  WidthOrHeightZero,

  /// A stride was given, but it's less than the width.
  StrideTooSmall,

  /// A checked math operation failed.
  CheckedMath,

  /// PNG writer steps were called out of order, or with an image that
  /// doesn't match the header.
  PngState,

  /// The output sink refused the bytes.
  Sink,
}
#[cfg(feature = "alloc")]
impl From<alloc::collections::TryReserveError> for FbError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}
impl From<TryFromIntError> for FbError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::CheckedMath
  }
}
impl fmt::Display for FbError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      #[cfg(feature = "alloc")]
      Self::Alloc => "allocation failed",
      Self::WidthOrHeightZero => "image width or height is zero",
      Self::StrideTooSmall => "image stride is less than the width",
      Self::CheckedMath => "image dimensions overflowed",
      Self::PngState => "png writer used out of order",
      Self::Sink => "output sink write failed",
    })
  }
}
#[cfg(feature = "std")]
impl std::error::Error for FbError {}
