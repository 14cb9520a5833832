use std::path::Path;
use std::time::Instant;

use tracing::info;

use crate::buffer::EncodedImage;
use crate::codec::{decode_with_limits, encode};
use crate::error::{EnhanceError, Result};
use crate::tone;

use super::config::EnhanceConfig;
use super::types::{EnhanceStage, NoOpReporter, ProgressReporter};

/// Run decode, tone adjustment and encode with a thread-safe progress reporter.
pub fn enhance_bytes_reported(
    bytes: &[u8],
    config: &EnhanceConfig,
    reporter: &dyn ProgressReporter,
) -> Result<EncodedImage> {
    run_stages(bytes, config, reporter, &|| false)?.ok_or_else(|| {
        EnhanceError::Transform("pipeline stopped without a cancellation request".into())
    })
}

/// Run the full enhancement: decode → adjust → JPEG encode.
pub fn enhance_bytes(bytes: &[u8], config: &EnhanceConfig) -> Result<EncodedImage> {
    enhance_bytes_reported(bytes, config, &NoOpReporter)
}

/// Read `path` and enhance its contents.
///
/// A path that does not name an existing file is an invalid argument; any
/// other read failure is reported as I/O.
pub fn enhance_file(path: &Path, config: &EnhanceConfig) -> Result<EncodedImage> {
    if path.as_os_str().is_empty() || !path.is_file() {
        return Err(EnhanceError::MissingSource(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    info!(path = %path.display(), size = bytes.len(), "Read source image");
    enhance_bytes(&bytes, config)
}

/// Shared stage runner. `cancelled` is polled between stages; once it
/// returns true the partial result is dropped and `Ok(None)` is returned.
pub(crate) fn run_stages(
    bytes: &[u8],
    config: &EnhanceConfig,
    reporter: &dyn ProgressReporter,
    cancelled: &dyn Fn() -> bool,
) -> Result<Option<EncodedImage>> {
    config.validate()?;
    let started = Instant::now();

    reporter.begin_stage(EnhanceStage::Decoding);
    let decoded = decode_with_limits(bytes, &config.limits)?;
    reporter.finish_stage(EnhanceStage::Decoding);
    info!(
        width = decoded.width(),
        height = decoded.height(),
        format = %decoded.format(),
        "Decoded source"
    );
    if cancelled() {
        info!("Enhancement cancelled after decoding");
        return Ok(None);
    }

    reporter.begin_stage(EnhanceStage::Adjusting);
    let adjusted = tone::apply(&decoded, &config.adjustment(), config.mode)?;
    drop(decoded);
    reporter.finish_stage(EnhanceStage::Adjusting);
    info!(mode = %config.mode, "Tone adjustment complete");
    if cancelled() {
        info!("Enhancement cancelled after tone adjustment");
        return Ok(None);
    }

    reporter.begin_stage(EnhanceStage::Encoding);
    let encoded = encode(&adjusted, config.output_quality)?;
    reporter.finish_stage(EnhanceStage::Encoding);
    info!(
        quality = encoded.quality,
        size = encoded.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Enhancement complete"
    );

    Ok(Some(encoded))
}
