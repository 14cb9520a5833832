use serde::{Deserialize, Serialize};

use crate::codec::DecodeLimits;
use crate::consts::{
    DEFAULT_JPEG_QUALITY, DEFAULT_SHADOW_AMOUNT, DEFAULT_SHADOW_LIFT, MAX_JPEG_QUALITY,
};
use crate::error::{EnhanceError, Result};
use crate::tone::{ShadowCurve, ToneAdjustment, ToneMode};

/// Everything one enhancement request needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Additive offset for the linear mode, 0..=255.
    pub shadow_lift: f32,
    /// Fraction of the shadow curve to apply, 0..=1.
    pub shadow_amount: f32,
    pub mode: ToneMode,
    /// JPEG quality, 0..=100.
    pub output_quality: u8,
    pub curve: ShadowCurve,
    pub limits: DecodeLimits,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            shadow_lift: DEFAULT_SHADOW_LIFT,
            shadow_amount: DEFAULT_SHADOW_AMOUNT,
            mode: ToneMode::default(),
            output_quality: DEFAULT_JPEG_QUALITY,
            curve: ShadowCurve::default(),
            limits: DecodeLimits::default(),
        }
    }
}

impl EnhanceConfig {
    pub fn adjustment(&self) -> ToneAdjustment {
        ToneAdjustment {
            shadow_lift: self.shadow_lift,
            shadow_amount: self.shadow_amount,
            curve: self.curve,
        }
    }

    /// Reject out-of-range values before any work starts.
    pub fn validate(&self) -> Result<()> {
        self.adjustment().validate()?;
        if self.output_quality > MAX_JPEG_QUALITY {
            return Err(EnhanceError::InvalidArgument(format!(
                "output_quality = {} is outside [0, {}]",
                self.output_quality, MAX_JPEG_QUALITY
            )));
        }
        if self.limits.max_width == 0 || self.limits.max_height == 0 {
            return Err(EnhanceError::InvalidArgument(
                "decode limits must allow at least 1x1 pixels".into(),
            ));
        }
        Ok(())
    }
}
