use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Source image not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Could not decode image: {0}")]
    Decode(String),

    #[error("Image dimensions {width}x{height} exceed the limit of {max_width}x{max_height}")]
    DimensionsExceeded {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Pixel transform failed: {0}")]
    Transform(String),

    #[error("Could not encode image: {0}")]
    Encode(String),
}

/// Coarse error category, used by callers to pick a user-facing code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Decode,
    Transform,
    Encode,
    Io,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENTS",
            Self::Decode => "IMAGE_LOAD_FAILED",
            Self::Transform => "IMAGE_PROCESSING_ERROR",
            Self::Encode => "ENCODE_FAILED",
            Self::Io => "SAVE_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl EnhanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidArgument(_) | Self::MissingSource(_) => ErrorKind::InvalidArgument,
            Self::Decode(_) | Self::DimensionsExceeded { .. } => ErrorKind::Decode,
            Self::Transform(_) => ErrorKind::Transform,
            Self::Encode(_) => ErrorKind::Encode,
        }
    }
}

pub type Result<T> = std::result::Result<T, EnhanceError>;
