use std::borrow::Cow;
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, ImageError, ImageReader, Limits};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::{EncodedFormat, EncodedImage, PixelBuffer, PixelFormat};
use crate::consts::{DEFAULT_MAX_ALLOC_BYTES, DEFAULT_MAX_DIMENSION, MAX_JPEG_QUALITY};
use crate::error::{EnhanceError, Result};

/// Bounds applied while decoding untrusted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    pub max_width: u32,
    pub max_height: u32,
    /// Upper bound on decoder allocations, in bytes.
    pub max_alloc: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            max_alloc: DEFAULT_MAX_ALLOC_BYTES,
        }
    }
}

impl DecodeLimits {
    fn check(&self, width: u32, height: u32) -> Result<()> {
        if width > self.max_width || height > self.max_height {
            return Err(EnhanceError::DimensionsExceeded {
                width,
                height,
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }
        Ok(())
    }

    fn to_image_limits(self) -> Limits {
        let mut limits = Limits::default();
        limits.max_image_width = Some(self.max_width);
        limits.max_image_height = Some(self.max_height);
        limits.max_alloc = Some(self.max_alloc);
        limits
    }
}

/// Decode an image container into a canonical buffer with default limits.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer> {
    decode_with_limits(bytes, &DecodeLimits::default())
}

/// Decode an image container into a canonical buffer.
///
/// The format is sniffed from the content. Sources with alpha become
/// [`PixelFormat::Rgba`], everything else [`PixelFormat::Rgb`]; higher bit
/// depths are reduced to 8 bits per channel.
pub fn decode_with_limits(bytes: &[u8], limits: &DecodeLimits) -> Result<PixelBuffer> {
    if bytes.is_empty() {
        return Err(EnhanceError::Decode("input is empty".into()));
    }

    let (width, height) = reader_for(bytes)?
        .into_dimensions()
        .map_err(decode_error)?;
    limits.check(width, height)?;

    let mut reader = reader_for(bytes)?;
    reader.limits(limits.to_image_limits());
    let img = reader.decode().map_err(decode_error)?;
    limits.check(img.width(), img.height())?;

    debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Decoded image"
    );
    into_canonical(img)
}

fn reader_for(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| EnhanceError::Decode(e.to_string()))?;
    if reader.format().is_none() {
        return Err(EnhanceError::Decode("unrecognised image format".into()));
    }
    Ok(reader)
}

fn decode_error(err: ImageError) -> EnhanceError {
    match err {
        ImageError::Limits(e) => EnhanceError::Decode(format!("decoder limit reached: {e}")),
        other => EnhanceError::Decode(other.to_string()),
    }
}

fn into_canonical(img: DynamicImage) -> Result<PixelBuffer> {
    let (width, height) = (img.width(), img.height());
    if img.color().has_alpha() {
        PixelBuffer::new(width, height, PixelFormat::Rgba, img.into_rgba8().into_raw())
    } else {
        PixelBuffer::new(width, height, PixelFormat::Rgb, img.into_rgb8().into_raw())
    }
}

/// Encode a buffer as baseline JPEG.
///
/// `quality` must be in 0..=100; 0 is passed to the codec as its minimum (1).
/// JPEG has no alpha channel, so alpha is dropped.
pub fn encode(buffer: &PixelBuffer, quality: u8) -> Result<EncodedImage> {
    if quality > MAX_JPEG_QUALITY {
        return Err(EnhanceError::Encode(format!(
            "quality {quality} is outside [0, {MAX_JPEG_QUALITY}]"
        )));
    }
    let (width, height) = (buffer.width(), buffer.height());
    if width == 0 || height == 0 {
        return Err(EnhanceError::Encode(format!(
            "cannot encode an empty {width}x{height} image"
        )));
    }

    let rgb: Cow<'_, [u8]> = match buffer.format() {
        PixelFormat::Rgb => Cow::Borrowed(buffer.as_raw()),
        PixelFormat::Rgba => Cow::Owned(strip_alpha(buffer.as_raw())),
    };

    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality.max(1))
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EnhanceError::Encode(e.to_string()))?;

    debug!(width, height, quality, size = bytes.len(), "Encoded JPEG");
    Ok(EncodedImage {
        bytes,
        format: EncodedFormat::Jpeg,
        quality,
        width,
        height,
    })
}

fn strip_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_alpha_keeps_rgb_order() {
        assert_eq!(strip_alpha(&[1, 2, 3, 4, 5, 6, 7, 8]), vec![1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn limits_reject_oversized_dimensions() {
        let limits = DecodeLimits {
            max_width: 10,
            max_height: 10,
            ..Default::default()
        };
        assert!(limits.check(10, 10).is_ok());
        assert!(matches!(
            limits.check(11, 1),
            Err(EnhanceError::DimensionsExceeded { width: 11, .. })
        ));
    }
}
