//! Scalar intensity to packed pixel.
//!
//! Pixels are `u32` values `0xAARRGGBB`, which is BGRA byte order in
//! little-endian memory.

/// Blue → red → yellow ramp. Intensities above 1 saturate.
///
/// - red ramps in over `[0, 0.5]`
/// - green ramps in over `[0.5, 1]`
/// - blue fades out over `[0, 1]`
#[inline]
pub fn color_from_value(value: f32) -> u32 {
    let r = channel(value * 2.0);
    let g = channel((value - 0.5) * 2.0);
    let b = channel(1.0 - value);
    pack_argb(0xFF, r, g, b)
}

#[inline]
fn channel(level: f32) -> u8 {
    // NaN casts to 0
    (level.clamp(0.0, 1.0) * 255.0) as u8
}

#[inline]
pub fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Split a packed pixel into `[r, g, b, a]`.
#[inline]
pub fn to_rgba(pixel: u32) -> [u8; 4] {
    let [b, g, r, a] = pixel.to_le_bytes();
    [r, g, b, a]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_pure_blue() {
        assert_eq!(color_from_value(0.0), 0xFF00_00FF);
    }

    #[test]
    fn midpoint_is_full_red_half_blue() {
        assert_eq!(color_from_value(0.5), 0xFFFF_007F);
    }

    #[test]
    fn one_is_yellow() {
        assert_eq!(color_from_value(1.0), 0xFFFF_FF00);
    }

    #[test]
    fn overrange_saturates_instead_of_wrapping() {
        assert_eq!(color_from_value(7.5), color_from_value(1.0));
        assert_eq!(color_from_value(f32::INFINITY), color_from_value(1.0));
    }

    #[test]
    fn quarter_intensity() {
        let [r, g, b, a] = to_rgba(color_from_value(0.25));
        assert_eq!((r, g, b, a), (127, 0, 191, 255));
    }

    #[test]
    fn alpha_is_always_opaque() {
        for v in [-1.0, 0.0, 0.3, 0.9, 3.0, f32::NAN] {
            assert_eq!(color_from_value(v) >> 24, 0xFF);
        }
    }

    #[test]
    fn bgra_memory_order() {
        let pixel = pack_argb(0xFF, 0x11, 0x22, 0x33);
        assert_eq!(pixel.to_le_bytes(), [0x33, 0x22, 0x11, 0xFF]);
        assert_eq!(to_rgba(pixel), [0x11, 0x22, 0x33, 0xFF]);
    }
}
