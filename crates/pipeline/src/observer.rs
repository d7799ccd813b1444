use notes_core::{ProcessingState, Progress};

/// Receives state and progress changes from the pipeline.
///
/// Called outside the session lock, possibly from a blocking worker thread.
pub trait PipelineObserver: Send + Sync {
    fn on_update(&self, state: ProcessingState, progress: Progress) {
        let _ = (state, progress);
    }
}

/// Observer that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
