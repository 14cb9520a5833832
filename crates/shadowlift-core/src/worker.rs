use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use tracing::{debug, warn};

use crate::buffer::EncodedImage;
use crate::error::{EnhanceError, Result};
use crate::pipeline::config::EnhanceConfig;
use crate::pipeline::{run_stages, NoOpReporter, ProgressReporter};

/// Final state of a background job.
#[derive(Debug)]
pub enum JobOutcome {
    Finished(Result<EncodedImage>),
    /// Cancelled between stages; partial output was discarded.
    Cancelled,
}

impl JobOutcome {
    /// Collapse into the pipeline result, or `None` when cancelled.
    pub fn into_result(self) -> Option<Result<EncodedImage>> {
        match self {
            Self::Finished(result) => Some(result),
            Self::Cancelled => None,
        }
    }
}

/// Enhancement running on its own thread.
///
/// Keeps interactive callers responsive: decode, adjust and encode all
/// happen on the worker and the outcome is delivered over a channel.
pub struct EnhanceJob {
    rx: mpsc::Receiver<JobOutcome>,
    cancel: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl EnhanceJob {
    /// Start enhancing `bytes` on a background thread.
    pub fn spawn(bytes: Vec<u8>, config: EnhanceConfig) -> Result<Self> {
        Self::spawn_reported(bytes, config, Arc::new(NoOpReporter))
    }

    /// Like [`EnhanceJob::spawn`], forwarding stage progress to `reporter`
    /// from the worker thread.
    pub fn spawn_reported(
        bytes: Vec<u8>,
        config: EnhanceConfig,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);

        let handle = std::thread::Builder::new()
            .name("shadowlift-worker".into())
            .spawn(move || {
                let is_cancelled = || flag.load(Ordering::Acquire);
                let outcome = if is_cancelled() {
                    JobOutcome::Cancelled
                } else {
                    match run_stages(&bytes, &config, reporter.as_ref(), &is_cancelled) {
                        Ok(Some(encoded)) => JobOutcome::Finished(Ok(encoded)),
                        Ok(None) => JobOutcome::Cancelled,
                        Err(e) => JobOutcome::Finished(Err(e)),
                    }
                };
                debug!(cancelled = matches!(outcome, JobOutcome::Cancelled), "Worker done");
                // Receiver gone means the caller abandoned the job.
                let _ = tx.send(outcome);
            })?;

        Ok(Self {
            rx,
            cancel,
            handle: Some(handle),
        })
    }

    /// Ask the worker to stop at the next stage boundary.
    ///
    /// Has no effect once the last stage has started.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// Block until the worker delivers its outcome.
    pub fn wait(mut self) -> JobOutcome {
        let outcome = self.rx.recv().unwrap_or_else(|_| lost_worker());
        self.join();
        outcome
    }

    /// Return the outcome if ready, or the job itself if still running.
    pub fn try_wait(mut self) -> std::result::Result<JobOutcome, Self> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.join();
                Ok(outcome)
            }
            Err(mpsc::TryRecvError::Empty) => Err(self),
            Err(mpsc::TryRecvError::Disconnected) => {
                self.join();
                Ok(lost_worker())
            }
        }
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Enhancement worker panicked");
            }
        }
    }
}

fn lost_worker() -> JobOutcome {
    JobOutcome::Finished(Err(EnhanceError::Transform(
        "worker thread exited without a result".into(),
    )))
}
