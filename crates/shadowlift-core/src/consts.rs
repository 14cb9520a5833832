/// Minimum pixel count (w*h) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Largest value an 8-bit channel can hold, as f32.
pub const CHANNEL_MAX: f32 = 255.0;

/// Default additive offset for the linear-offset mode.
pub const DEFAULT_SHADOW_LIFT: f32 = 30.0;

/// Default fraction of the shadow curve lift to apply.
pub const DEFAULT_SHADOW_AMOUNT: f32 = 0.65;

/// Luminance at and above which the shadow curve leaves pixels untouched.
pub const DEFAULT_SHADOW_THRESHOLD: f32 = 128.0;

/// Lift applied to pure black by the shadow curve at full amount.
pub const DEFAULT_LIFT_MAGNITUDE: f32 = 80.0;

/// Default JPEG output quality.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Highest accepted JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Default maximum decoded width and height, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 16_384;

/// Default cap on decoder allocations. Default: 512 MiB.
pub const DEFAULT_MAX_ALLOC_BYTES: u64 = 536_870_912;
