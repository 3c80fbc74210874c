use fbimage::{color::*, FbError, Image};

#[test]
fn test_default_codec_is_native() {
  let mut image = Image::new(3, 2, 0, false).unwrap();
  let pixel: &mut Color = image.get_mut(2, 1).unwrap();
  *pixel = u32_to_color(0x00F8_F8F8);
  assert_eq!(image.get_abgr(2, 1), Some(0x00F8_F8F8));
  assert_eq!(image.as_bytes().len(), 6 * NATIVE_WIDTH.bytes());
}

#[test]
fn test_strided_bitmap_matches_visible_region() {
  let (width, height, stride) = (5, 3, 8);
  let mut image = Image::<Abgr8888>::new_with_codec(width, height, stride, true).unwrap();
  let values = super::rand_u32s((stride * height) as usize);
  image.pixels_mut().copy_from_slice(&values);

  let bitmap = image.to_bitmap().unwrap();
  assert_eq!(bitmap.pixels.len(), (width * height) as usize);
  for y in 0..height {
    for x in 0..width {
      let expected = values[(y * stride + x) as usize].to_le_bytes();
      assert_eq!(bitmap.get(x, y), Some(&expected), "x:{x} y:{y}");
    }
  }

  image.set_alpha(false);
  let bytes = image.to_rgba_bytes().unwrap();
  assert_eq!(bytes.len(), (width * height * 4) as usize);
  let [r, g, b, a] = values[0].to_le_bytes();
  assert_eq!(&bytes[..4], &[b, g, r, a]);
}

#[test]
fn test_huge_dimensions_fail_cleanly() {
  let result = Image::<Abgr8888>::new_with_codec(u32::MAX, u32::MAX, 0, false);
  assert!(matches!(result, Err(FbError::CheckedMath) | Err(FbError::Alloc)), "{result:?}");
}

#[test]
fn test_raw_bytes_are_native_order() {
  let mut image = Image::<Abgr1555>::new_with_codec(1, 1, 0, false).unwrap();
  image.as_bytes_mut().copy_from_slice(&0x7C00_u16.to_ne_bytes());
  assert_eq!(image.get(0, 0), Some(0x7C00));
  assert_eq!(image.get_abgr(0, 0), Some(0x00F8_0000));
}

#[test]
fn test_image_adapter_matches_features() {
  assert_eq!(fbimage::IMAGE_ADAPTER_AVAILABLE, cfg!(feature = "image"));
  #[cfg(feature = "image")]
  {
    let mut image = Image::new(2, 2, 3, false).unwrap();
    image.fill(u32_to_color(0x0000_00F8));
    let buffer = image.to_image_buffer().unwrap();
    assert_eq!(buffer.dimensions(), (2, 2));
    assert_eq!(buffer.get_pixel(1, 1).0, [0xF8, 0, 0, 0xFF]);
  }
}
