use fbimage::color::*;

#[test]
fn test_expand_then_compress_is_lossless() {
  for c in 0..=u16::MAX {
    assert_eq!(compress_32_to_16(expand_16_to_32(c)), c, "failed {c:#06X}");
  }
}

#[test]
fn test_compress_then_expand_keeps_representable_colors() {
  for x in super::rand_u32s(4096) {
    // only the top 5 bits of each color byte, and alpha fully on or off.
    let alpha = if x & 1 != 0 { 0xFF00_0000 } else { 0 };
    let c = (x & 0x00F8_F8F8) | alpha;
    assert_eq!(expand_16_to_32(compress_32_to_16(c)), c, "failed {c:#010X}");
  }
}

#[test]
fn test_compress_drops_low_bits() {
  for x in super::rand_u32s(4096) {
    let expected = (x & 0x00F8_F8F8) | if x >> 31 != 0 { 0xFF00_0000 } else { 0 };
    assert_eq!(expand_16_to_32(compress_32_to_16(x)), expected, "failed {x:#010X}");
  }
}

#[test]
fn test_spot_values() {
  assert_eq!(expand_16_to_32(0x0000), 0x0000_0000);
  assert_eq!(expand_16_to_32(0xFFFF), 0xFFF8_F8F8);
  assert_eq!(expand_16_to_32(0x7C00), 0x00F8_0000);
  assert_eq!(compress_32_to_16(0x00FF_0000), 0x7C00);
}

#[test]
fn test_codec_pairs() {
  for x in super::rand_u32s(256) {
    let c16 = x as u16;
    // 16-bit cores: "to native" compresses, "from native" expands.
    assert_eq!(Abgr1555::from_u32(x), compress_32_to_16(x));
    assert_eq!(Abgr1555::to_u32(c16), expand_16_to_32(c16));
    // 32-bit cores: both are the identity.
    assert_eq!(Abgr8888::from_u32(x), x);
    assert_eq!(Abgr8888::to_u32(x), x);
  }
}

#[test]
fn test_native_functions_follow_build_width() {
  for x in super::rand_u32s(256) {
    let c16 = x as u16;
    match NATIVE_WIDTH {
      NativeWidth::Two => {
        assert_eq!(color_to_u32(u32_to_color(x)), expand_16_to_32(compress_32_to_16(x)));
        assert_eq!(color_to_u16(u16_to_color(c16)), c16);
      }
      NativeWidth::Four => {
        assert_eq!(color_to_u32(u32_to_color(x)), x);
        assert_eq!(color_to_u16(u16_to_color(c16)), c16);
        assert_eq!(u16_to_color(c16), u32_to_color(expand_16_to_32(c16)));
      }
    }
  }
  assert_eq!(NativeWidth::from_bytes(core::mem::size_of::<Color>()), Some(NATIVE_WIDTH));
}
