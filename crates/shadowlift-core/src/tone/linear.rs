use crate::buffer::PixelBuffer;
use crate::error::Result;

use super::kernel::{clamp_channel, map_pixels};

/// Uniform brightness lift: `out = clamp(in + lift)` on R, G and B.
///
/// Alpha is copied through. Dark and bright pixels are raised by the same
/// amount, saturating at 255.
pub fn linear_offset(buffer: &PixelBuffer, lift: f32) -> Result<PixelBuffer> {
    let lut = offset_lut(lift);
    map_pixels(buffer, |src, dst| {
        dst.copy_from_slice(src);
        for c in &mut dst[..3] {
            *c = lut[*c as usize];
        }
    })
}

/// Lookup table mapping every 8-bit input to its offset output.
pub(crate) fn offset_lut(lift: f32) -> [u8; 256] {
    std::array::from_fn(|v| clamp_channel(v as f32 + lift))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lut_saturates_instead_of_wrapping() {
        let lut = offset_lut(30.0);
        assert_eq!(lut[0], 30);
        assert_eq!(lut[225], 255);
        assert_eq!(lut[255], 255);
    }

    #[test]
    fn zero_lift_lut_is_identity() {
        let lut = offset_lut(0.0);
        assert!(lut.iter().enumerate().all(|(i, &v)| i as u8 == v));
    }
}
