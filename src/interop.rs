//! Conversion into the `image` crate's buffer types.

use alloc::vec::Vec;

use crate::{color::ColorCodec, framebuffer::Image};

impl<C: ColorCodec> Image<C> {
  /// Copies the visible region into an [`image::RgbaImage`].
  ///
  /// When the image doesn't use alpha the fourth byte of every pixel is
  /// forced to 255, since the framebuffer's alpha byte is meaningless then.
  ///
  /// Gives `None` if the buffer can't be allocated.
  #[cfg_attr(docs_rs, doc(cfg(feature = "image")))]
  #[must_use]
  pub fn to_image_buffer(&self) -> Option<image::RgbaImage> {
    let len = (self.width() as usize).checked_mul(self.height() as usize)?.checked_mul(4)?;
    let mut bytes: Vec<u8> = Vec::new();
    bytes.try_reserve_exact(len).ok()?;
    for row in self.rows() {
      for &c in row {
        let mut rgba = C::to_u32(c).to_le_bytes();
        if !self.alpha() {
          rgba[3] = u8::MAX;
        }
        bytes.extend_from_slice(&rgba);
      }
    }
    image::RgbaImage::from_raw(self.width(), self.height(), bytes)
  }
}
