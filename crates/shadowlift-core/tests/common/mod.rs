#![allow(dead_code)]

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageBuffer, ImageEncoder, ImageFormat, Luma};

use shadowlift_core::buffer::{PixelBuffer, PixelFormat};

/// Build a buffer from a list of pixels laid out row-major.
pub fn buffer_from_pixels(width: u32, height: u32, format: PixelFormat, pixels: &[&[u8]]) -> PixelBuffer {
    let data: Vec<u8> = pixels.iter().flat_map(|p| p.iter().copied()).collect();
    PixelBuffer::new(width, height, format, data).expect("pixel count matches dimensions")
}

/// Smooth RGB gradient: red follows x, green follows y, blue is constant.
pub fn gradient_rgb(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 255 / width.saturating_sub(1).max(1)) as u8);
            data.push((y * 255 / height.saturating_sub(1).max(1)) as u8);
            data.push(128);
        }
    }
    PixelBuffer::new(width, height, PixelFormat::Rgb, data).expect("gradient size")
}

/// Deterministic pseudo-random RGBA content (xorshift), covering the full range.
pub fn noise_rgba(width: u32, height: u32, seed: u32) -> PixelBuffer {
    let mut state = seed.max(1);
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height * 4 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        data.push((state >> 24) as u8);
    }
    PixelBuffer::new(width, height, PixelFormat::Rgba, data).expect("noise size")
}

/// Encode a buffer as PNG bytes, preserving its channel layout.
pub fn encode_png(buffer: &PixelBuffer) -> Vec<u8> {
    let color = match buffer.format() {
        PixelFormat::Rgb => ExtendedColorType::Rgb8,
        PixelFormat::Rgba => ExtendedColorType::Rgba8,
    };
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes)
        .write_image(buffer.as_raw(), buffer.width(), buffer.height(), color)
        .expect("encode PNG");
    bytes
}

/// 16-bit grayscale PNG with every sample set to `value`.
pub fn gray16_png(width: u32, height: u32, value: u16) -> Vec<u8> {
    let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_pixel(width, height, Luma([value]));
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma16(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode 16-bit PNG");
    bytes
}

/// Mean absolute difference over the RGB samples of two same-sized buffers.
pub fn mean_abs_error_rgb(a: &PixelBuffer, b: &PixelBuffer) -> f64 {
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    let mut total = 0u64;
    let mut count = 0u64;
    for (pa, pb) in a.pixels().zip(b.pixels()) {
        for c in 0..3 {
            total += (pa[c] as i32 - pb[c] as i32).unsigned_abs() as u64;
            count += 1;
        }
    }
    total as f64 / count.max(1) as f64
}
