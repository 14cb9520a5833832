pub mod config;
pub mod enhance;
pub mod info;

use std::path::Path;

use anyhow::{Context, Result};
use shadowlift_core::error::EnhanceError;

/// Read a source image, reporting a missing file as an invalid argument.
pub(crate) fn read_source(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        return Err(EnhanceError::MissingSource(path.to_path_buf()).into());
    }
    std::fs::read(path)
        .map_err(EnhanceError::from)
        .with_context(|| format!("Failed to read {}", path.display()))
}
