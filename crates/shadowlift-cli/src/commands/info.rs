use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use shadowlift_core::buffer::PixelBuffer;
use shadowlift_core::codec::decode;
use shadowlift_core::consts::DEFAULT_SHADOW_THRESHOLD;
use shadowlift_core::tone::luminance;

use super::read_source;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Luminance below which a pixel counts as shadow (0-255)
    #[arg(long, default_value_t = DEFAULT_SHADOW_THRESHOLD)]
    pub threshold: f32,
}

/// Luminance summary of a decoded image.
#[derive(Debug, PartialEq)]
struct ToneStats {
    mean_luminance: f64,
    shadow_fraction: f64,
}

fn tone_stats(buffer: &PixelBuffer, threshold: f32) -> ToneStats {
    let count = buffer.pixel_count();
    if count == 0 {
        return ToneStats {
            mean_luminance: 0.0,
            shadow_fraction: 0.0,
        };
    }
    let mut sum = 0.0f64;
    let mut shadows = 0usize;
    for px in buffer.pixels() {
        let l = luminance(px[0], px[1], px[2]);
        sum += l as f64;
        if l < threshold {
            shadows += 1;
        }
    }
    ToneStats {
        mean_luminance: sum / count as f64,
        shadow_fraction: shadows as f64 / count as f64,
    }
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let bytes = read_source(&args.file)?;
    let buffer = decode(&bytes).with_context(|| format!("Failed to decode {}", args.file.display()))?;
    let stats = tone_stats(&buffer, args.threshold);

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", buffer.width(), buffer.height());
    println!("Format:      {}", buffer.format());
    println!("File size:   {:.1} KB", bytes.len() as f64 / 1024.0);
    println!("Mean luma:   {:.1}", stats.mean_luminance);
    println!(
        "Shadows:     {:.1}% below L={:.0}",
        stats.shadow_fraction * 100.0,
        args.threshold
    );

    Ok(())
}
