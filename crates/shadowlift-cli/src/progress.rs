use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use shadowlift_core::pipeline::{EnhanceStage, ProgressReporter};
use tracing::debug;

/// Progress reporter that drives a terminal spinner from the worker thread.
pub struct SpinnerReporter {
    bar: ProgressBar,
}

impl SpinnerReporter {
    pub fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg:20} {elapsed}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn finish(&self, message: &'static str) {
        self.bar.finish_with_message(message);
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl ProgressReporter for SpinnerReporter {
    fn begin_stage(&self, stage: EnhanceStage) {
        self.bar.set_message(stage.to_string());
    }

    fn finish_stage(&self, stage: EnhanceStage) {
        debug!(%stage, elapsed_ms = self.bar.elapsed().as_millis() as u64, "Stage finished");
    }
}
