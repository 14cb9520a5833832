pub mod config;
mod orchestrator;
mod types;

pub(crate) use orchestrator::run_stages;
pub(crate) use types::NoOpReporter;
pub use orchestrator::{enhance_bytes, enhance_bytes_reported, enhance_file};
pub use types::{EnhanceStage, ProgressReporter};
