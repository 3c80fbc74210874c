#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A crate for the pixels an emulator draws.
//!
//! Emulation cores draw either 16-bit (ABGR 1555) or 32-bit (ABGR 8888) color,
//! picked when the core is built. This crate gives you:
//!
//! * Conversions between the two packed color layouts, plus a fixed pair of
//!   "native" conversions that work no matter which layout this build uses.
//!   See the [`color`] module.
//! * A framebuffer [`Image`] with an optional row stride. (`alloc`)
//! * PNG output. (`png`)
//! * Conversion to a tightly packed [`Bitmap`] for array-based consumers, and
//!   to `image::RgbaImage` with the `image` feature.
//!
//! ## Native Width
//!
//! By default the native color is 32-bit. Enable the `color16` feature for
//! cores that draw 16-bit color. Either way, [`Color`] is the native color type
//! and [`NATIVE_WIDTH`] says which one it is.

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod color;
pub use color::{
  color_to_u16, color_to_u32, u16_to_color, u32_to_color, Color, NativeCodec, NativeWidth,
  NATIVE_WIDTH,
};

mod error;
pub use error::*;

#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub mod bitmap;
#[cfg(feature = "alloc")]
pub use bitmap::Bitmap;

#[cfg(feature = "alloc")]
#[cfg_attr(docs_rs, doc(cfg(feature = "alloc")))]
pub mod framebuffer;
#[cfg(feature = "alloc")]
pub use framebuffer::Image;

#[cfg(feature = "png")]
#[cfg_attr(docs_rs, doc(cfg(feature = "png")))]
pub mod png;

#[cfg(feature = "image")]
mod interop;

/// If [`Image::to_image_buffer`] exists in this build.
///
/// It's only there with the `image` feature.
pub const IMAGE_ADAPTER_AVAILABLE: bool = cfg!(feature = "image");
