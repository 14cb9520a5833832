/// Enhancement stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnhanceStage {
    Decoding,
    Adjusting,
    Encoding,
}

impl std::fmt::Display for EnhanceStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decoding => write!(f, "Decoding image"),
            Self::Adjusting => write!(f, "Lifting shadows"),
            Self::Encoding => write!(f, "Encoding JPEG"),
        }
    }
}

/// Thread-safe progress reporting for the enhancement pipeline.
///
/// Implementors can use this to drive spinners, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started.
    fn begin_stage(&self, _stage: EnhanceStage) {}

    /// `stage` completed successfully.
    fn finish_stage(&self, _stage: EnhanceStage) {}
}

/// No-op progress reporter for callers that do not track stages.
pub(crate) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
