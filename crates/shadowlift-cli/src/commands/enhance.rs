use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use shadowlift_core::buffer::EncodedImage;
use shadowlift_core::error::EnhanceError;
use shadowlift_core::pipeline::config::EnhanceConfig;
use shadowlift_core::tone::ToneMode;
use shadowlift_core::worker::{EnhanceJob, JobOutcome};
use tracing::info;

use crate::progress::SpinnerReporter;
use crate::summary::print_enhance_summary;

use super::read_source;

/// Directory under the system temp dir that receives unnamed outputs.
const OUTPUT_DIR_NAME: &str = "shadowlift_images";

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ToneModeArg {
    /// Uniform lift on every channel
    #[value(name = "a", alias = "linear")]
    A,
    /// Luminance-weighted lift of dark tones only
    #[value(name = "b", alias = "shadow")]
    B,
    /// Shadow curve, then uniform lift
    Combined,
}

impl From<ToneModeArg> for ToneMode {
    fn from(arg: ToneModeArg) -> Self {
        match arg {
            ToneModeArg::A => ToneMode::LinearOffset,
            ToneModeArg::B => ToneMode::ShadowCurve,
            ToneModeArg::Combined => ToneMode::Combined,
        }
    }
}

#[derive(Args)]
pub struct EnhanceArgs {
    /// Input image (PNG, JPEG, or anything the decoder recognises)
    pub file: PathBuf,

    /// Enhancement config file (TOML); flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Additive lift for mode A (0-255)
    #[arg(long)]
    pub lift: Option<f32>,

    /// Shadow curve strength for mode B (0.0-1.0)
    #[arg(long)]
    pub amount: Option<f32>,

    /// Tone mode
    #[arg(long, value_enum)]
    pub mode: Option<ToneModeArg>,

    /// JPEG quality (0-100)
    #[arg(long)]
    pub quality: Option<u8>,

    /// Luminance above which mode B leaves pixels alone (0-255)
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Lift applied to pure black by mode B at full amount (0-255)
    #[arg(long)]
    pub magnitude: Option<f32>,

    /// Output file path (default: a unique file in the temp directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only print the output path
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: &EnhanceArgs) -> Result<()> {
    let config = build_config(args)?;
    config.validate()?;

    let bytes = read_source(&args.file)?;
    if !args.quiet {
        print_enhance_summary(&args.file, args.output.as_deref(), &config);
    }

    let reporter = Arc::new(SpinnerReporter::new(args.quiet));
    let job = EnhanceJob::spawn_reported(bytes, config, reporter.clone())?;
    let encoded = match job.wait() {
        JobOutcome::Finished(Ok(encoded)) => encoded,
        JobOutcome::Finished(Err(e)) => {
            reporter.abandon();
            return Err(e)
                .with_context(|| format!("Failed to enhance {}", args.file.display()));
        }
        JobOutcome::Cancelled => {
            reporter.abandon();
            bail!("Enhancement of {} was cancelled", args.file.display());
        }
    };
    reporter.finish("Done");

    let path = persist(&encoded, args.output.as_deref())?;
    info!(path = %path.display(), size = encoded.len(), "Wrote enhanced image");
    println!("{}", path.display());

    Ok(())
}

/// Start from the config file (or defaults) and apply flag overrides.
fn build_config(args: &EnhanceArgs) -> Result<EnhanceConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| EnhanceError::InvalidArgument(e.to_string()))
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| EnhanceError::InvalidArgument(e.to_string()))
            .context("Invalid enhancement config")?
    } else {
        EnhanceConfig::default()
    };

    if let Some(lift) = args.lift {
        config.shadow_lift = lift;
    }
    if let Some(amount) = args.amount {
        config.shadow_amount = amount;
    }
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }
    if let Some(quality) = args.quality {
        config.output_quality = quality;
    }
    if let Some(threshold) = args.threshold {
        config.curve.threshold = threshold;
    }
    if let Some(magnitude) = args.magnitude {
        config.curve.magnitude = magnitude;
    }
    Ok(config)
}

/// Write the encoded image, returning where it landed.
fn persist(encoded: &EncodedImage, output: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = output {
        std::fs::write(path, &encoded.bytes)
            .map_err(EnhanceError::from)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(path.to_path_buf());
    }

    let dir = std::env::temp_dir().join(OUTPUT_DIR_NAME);
    std::fs::create_dir_all(&dir)
        .map_err(EnhanceError::from)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let suffix = format!(".{}", encoded.format.extension());
    let mut file = tempfile::Builder::new()
        .prefix("enhanced_")
        .suffix(&suffix)
        .rand_bytes(16)
        .tempfile_in(&dir)
        .map_err(EnhanceError::from)
        .with_context(|| format!("Failed to create output file in {}", dir.display()))?;
    file.write_all(&encoded.bytes)
        .map_err(EnhanceError::from)
        .context("Failed to write enhanced image")?;
    let (_, path) = file
        .keep()
        .map_err(|e| EnhanceError::from(e.error))
        .context("Failed to keep enhanced image")?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(file: &str) -> EnhanceArgs {
        EnhanceArgs {
            file: PathBuf::from(file),
            config: None,
            lift: None,
            amount: None,
            mode: None,
            quality: None,
            threshold: None,
            magnitude: None,
            output: None,
            quiet: true,
        }
    }

    #[test]
    fn flags_override_defaults() {
        let mut a = args("in.png");
        a.lift = Some(12.0);
        a.mode = Some(ToneModeArg::A);
        a.quality = Some(70);
        let config = build_config(&a).unwrap();
        assert_eq!(config.shadow_lift, 12.0);
        assert_eq!(config.mode, ToneMode::LinearOffset);
        assert_eq!(config.output_quality, 70);
        assert_eq!(config.shadow_amount, EnhanceConfig::default().shadow_amount);
    }

    #[test]
    fn config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enhance.toml");
        std::fs::write(&path, "shadow_amount = 0.3\nmode = \"A\"\n").unwrap();

        let mut a = args("in.png");
        a.config = Some(path);
        a.mode = Some(ToneModeArg::Combined);
        let config = build_config(&a).unwrap();
        assert_eq!(config.shadow_amount, 0.3);
        assert_eq!(config.mode, ToneMode::Combined);
    }

    #[test]
    fn bad_config_is_invalid_argument() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enhance.toml");
        std::fs::write(&path, "mode = \"sideways\"\n").unwrap();

        let mut a = args("in.png");
        a.config = Some(path);
        let err = build_config(&a).unwrap_err();
        let core = err.downcast_ref::<EnhanceError>().expect("core error in chain");
        assert!(matches!(core, EnhanceError::InvalidArgument(_)));
    }

    #[test]
    fn missing_config_is_invalid_argument() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args("in.png");
        a.config = Some(dir.path().join("absent.toml"));
        let err = build_config(&a).unwrap_err();
        let core = err.downcast_ref::<EnhanceError>().expect("core error in chain");
        assert!(matches!(core, EnhanceError::InvalidArgument(_)));
        assert!(format!("{err:#}").contains("absent.toml"), "{err:#}");
    }

    #[test]
    fn persist_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.jpg");
        let encoded = EncodedImage {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xD9],
            format: shadowlift_core::buffer::EncodedFormat::Jpeg,
            quality: 90,
            width: 1,
            height: 1,
        };
        let written = persist(&encoded, Some(&target)).unwrap();
        assert_eq!(written, target);
        assert_eq!(std::fs::read(&target).unwrap(), encoded.bytes);
    }

    #[test]
    fn persist_to_temp_dir_uses_unique_names() {
        let encoded = EncodedImage {
            bytes: vec![1, 2, 3],
            format: shadowlift_core::buffer::EncodedFormat::Jpeg,
            quality: 90,
            width: 1,
            height: 1,
        };
        let a = persist(&encoded, None).unwrap();
        let b = persist(&encoded, None).unwrap();
        assert_ne!(a, b);
        for path in [&a, &b] {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            assert!(name.starts_with("enhanced_") && name.ends_with(".jpg"), "{name}");
            std::fs::remove_file(path).unwrap();
        }
    }
}
