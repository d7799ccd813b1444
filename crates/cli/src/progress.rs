//! Terminal progress display for pipeline updates.

use indicatif::{ProgressBar, ProgressStyle};
use notes_core::{ProcessingState, Progress};
use notes_pipeline::PipelineObserver;
use std::sync::Mutex;

/// Renders pipeline state changes as a progress bar on stderr.
pub struct ProgressReporter {
    bar: ProgressBar,
    state: Mutex<ProcessingState>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("█▓▒░"));
        }
        Self {
            bar,
            state: Mutex::new(ProcessingState::Idle),
        }
    }

    fn phase_label(state: ProcessingState) -> &'static str {
        match state {
            ProcessingState::Parsing => "Parsing file",
            ProcessingState::GeneratingNotes => "Generating speaker notes",
            ProcessingState::CreatingOutput => "Creating presentation",
            ProcessingState::Done => "Done",
            ProcessingState::Error => "Failed",
            ProcessingState::Idle => "",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineObserver for ProgressReporter {
    fn on_update(&self, state: ProcessingState, progress: Progress) {
        let mut current = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if *current != state {
            *current = state;
            if state.is_busy() {
                self.bar.reset();
                self.bar.set_length(progress.total as u64);
                self.bar.set_message(Self::phase_label(state));
            } else {
                self.bar.finish_and_clear();
                return;
            }
        }

        if progress.total > 0 {
            self.bar.set_length(progress.total as u64);
            self.bar.set_position(progress.current as u64);
        }
    }
}
