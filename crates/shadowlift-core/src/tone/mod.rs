mod kernel;
pub mod linear;
pub mod shadow;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::consts::{
    CHANNEL_MAX, DEFAULT_LIFT_MAGNITUDE, DEFAULT_SHADOW_AMOUNT, DEFAULT_SHADOW_LIFT,
    DEFAULT_SHADOW_THRESHOLD,
};
use crate::error::{EnhanceError, Result};

pub use linear::linear_offset;
pub use shadow::{luminance, shadow_curve, shadow_weight};

/// Which tone transform to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToneMode {
    /// Uniform additive lift on every RGB channel (mode "A").
    #[serde(alias = "A", alias = "a")]
    LinearOffset,
    /// Luminance-weighted lift that only touches dark tones (mode "B").
    #[default]
    #[serde(alias = "B", alias = "b")]
    ShadowCurve,
    /// Shadow curve followed by the linear offset.
    #[serde(alias = "combined")]
    Combined,
}

impl std::fmt::Display for ToneMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LinearOffset => write!(f, "Linear offset"),
            Self::ShadowCurve => write!(f, "Shadow curve"),
            Self::Combined => write!(f, "Combined"),
        }
    }
}

/// Shape of the shadow curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowCurve {
    /// Luminance (0..255) at and above which pixels are left alone.
    pub threshold: f32,
    /// Lift applied to pure black when the amount is 1.0.
    pub magnitude: f32,
}

impl Default for ShadowCurve {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SHADOW_THRESHOLD,
            magnitude: DEFAULT_LIFT_MAGNITUDE,
        }
    }
}

/// Parameters for one tone adjustment. Built once per request.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneAdjustment {
    /// Additive offset for the linear mode, 0..=255.
    pub shadow_lift: f32,
    /// Fraction of the shadow curve to apply, 0..=1.
    pub shadow_amount: f32,
    pub curve: ShadowCurve,
}

impl Default for ToneAdjustment {
    fn default() -> Self {
        Self {
            shadow_lift: DEFAULT_SHADOW_LIFT,
            shadow_amount: DEFAULT_SHADOW_AMOUNT,
            curve: ShadowCurve::default(),
        }
    }
}

impl ToneAdjustment {
    /// Check every parameter against its documented range.
    pub fn validate(&self) -> Result<()> {
        check_range("shadow_lift", self.shadow_lift, 0.0, CHANNEL_MAX)?;
        check_range("shadow_amount", self.shadow_amount, 0.0, 1.0)?;
        check_range("curve.magnitude", self.curve.magnitude, 0.0, CHANNEL_MAX)?;
        check_range("curve.threshold", self.curve.threshold, 0.0, CHANNEL_MAX)?;
        if self.curve.threshold == 0.0 {
            return Err(EnhanceError::InvalidArgument(
                "curve.threshold must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn check_range(name: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(EnhanceError::InvalidArgument(format!(
            "{name} = {value} is outside [{min}, {max}]"
        )));
    }
    Ok(())
}

/// Run `mode` over every pixel of `buffer`, returning a new buffer.
///
/// The input is never modified. Out-of-range parameters are not rejected
/// here (see [`ToneAdjustment::validate`]) but every channel is still
/// saturated into 0..=255.
pub fn apply(buffer: &PixelBuffer, adjustment: &ToneAdjustment, mode: ToneMode) -> Result<PixelBuffer> {
    debug!(
        width = buffer.width(),
        height = buffer.height(),
        format = %buffer.format(),
        mode = %mode,
        "Applying tone adjustment"
    );

    let out = match mode {
        ToneMode::LinearOffset => linear_offset(buffer, adjustment.shadow_lift)?,
        ToneMode::ShadowCurve => {
            shadow_curve(buffer, adjustment.shadow_amount, &adjustment.curve)?
        }
        ToneMode::Combined => combined(buffer, adjustment)?,
    };

    if out.width() != buffer.width()
        || out.height() != buffer.height()
        || out.format() != buffer.format()
    {
        return Err(EnhanceError::Transform(format!(
            "output {}x{} {} does not match input {}x{} {}",
            out.width(),
            out.height(),
            out.format(),
            buffer.width(),
            buffer.height(),
            buffer.format()
        )));
    }
    Ok(out)
}

/// Shadow curve then linear offset, fused into a single pass.
fn combined(buffer: &PixelBuffer, adjustment: &ToneAdjustment) -> Result<PixelBuffer> {
    let lut = linear::offset_lut(adjustment.shadow_lift);
    let scale = adjustment.shadow_amount * adjustment.curve.magnitude;
    let threshold = adjustment.curve.threshold;
    kernel::map_pixels(buffer, |src, dst| {
        dst.copy_from_slice(src);
        shadow::lift_pixel(dst, scale, threshold);
        for c in &mut dst[..3] {
            *c = lut[*c as usize];
        }
    })
}
