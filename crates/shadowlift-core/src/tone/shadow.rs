use crate::buffer::PixelBuffer;
use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::error::Result;

use super::kernel::{clamp_channel, map_pixels};
use super::ShadowCurve;

/// Perceptual luminance (BT.601 weights) on the 0..255 scale.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32
}

/// Shadow weight for a pixel of luminance `l`.
///
/// 1.0 at black, falling along an inverted smoothstep to 0.0 at `threshold`
/// and staying 0.0 above it. The slope is zero at both ends, so there is no
/// visible edge where the adjustment stops.
#[inline]
pub fn shadow_weight(l: f32, threshold: f32) -> f32 {
    if threshold.is_nan() || threshold <= 0.0 || l >= threshold {
        return 0.0;
    }
    let t = (l / threshold).max(0.0);
    1.0 - t * t * (3.0 - 2.0 * t)
}

/// Lift only the dark tones: `out = clamp(in + amount * w(L) * magnitude)`.
///
/// The lift is the same for R, G and B of a pixel, so hue is kept. Alpha is
/// copied through and pixels at or above the threshold are untouched.
pub fn shadow_curve(buffer: &PixelBuffer, amount: f32, curve: &ShadowCurve) -> Result<PixelBuffer> {
    let scale = amount * curve.magnitude;
    let threshold = curve.threshold;
    map_pixels(buffer, |src, dst| {
        dst.copy_from_slice(src);
        lift_pixel(dst, scale, threshold);
    })
}

/// Apply the shadow lift to the RGB samples of one pixel in place.
#[inline]
pub(crate) fn lift_pixel(px: &mut [u8], scale: f32, threshold: f32) {
    let w = shadow_weight(luminance(px[0], px[1], px[2]), threshold);
    if w > 0.0 {
        let lift = scale * w;
        for c in &mut px[..3] {
            *c = clamp_channel(*c as f32 + lift);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn weight_endpoints() {
        assert_relative_eq!(shadow_weight(0.0, 128.0), 1.0);
        assert_relative_eq!(shadow_weight(128.0, 128.0), 0.0);
        assert_relative_eq!(shadow_weight(200.0, 128.0), 0.0);
        assert_relative_eq!(shadow_weight(64.0, 128.0), 0.5);
    }

    #[test]
    fn weight_is_monotonic() {
        let mut prev = shadow_weight(0.0, 128.0);
        for l in 1..=128 {
            let w = shadow_weight(l as f32, 128.0);
            assert!(w <= prev, "weight rose at L={l}");
            prev = w;
        }
    }

    #[test]
    fn degenerate_threshold_disables_lift() {
        assert_eq!(shadow_weight(0.0, 0.0), 0.0);
        assert_eq!(shadow_weight(0.0, f32::NAN), 0.0);
    }

    #[test]
    fn luminance_of_white_is_full_scale() {
        assert_relative_eq!(luminance(255, 255, 255), 255.0, epsilon = 1e-3);
        assert_eq!(luminance(0, 0, 0), 0.0);
    }
}
