//! Session state: processing phase, progress, and the deck being built.
//!
//! The session is the single owner of the slide sequence and the current
//! [`ProcessingState`]. Every run is stamped with a [`RunToken`]; mutations
//! that carry a token from an older run are dropped, so a reset followed by
//! a new upload can never be overwritten by a result that was still in
//! flight when the user restarted.

use crate::types::is_contiguous;
use crate::{Error, Result, SlideRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The phase of the processing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingState {
    #[default]
    Idle,
    Parsing,
    GeneratingNotes,
    CreatingOutput,
    Done,
    Error,
}

impl ProcessingState {
    /// Whether this state blocks new uploads.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Parsing | Self::GeneratingNotes | Self::CreatingOutput
        )
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Parsing => "parsing",
            Self::GeneratingNotes => "generating notes",
            Self::CreatingOutput => "creating output",
            Self::Done => "done",
            Self::Error => "in error",
        };
        f.write_str(label)
    }
}

/// Progress counters for the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }

    /// Completed fraction in `0.0..=1.0`; zero when there is no total.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.current.min(self.total)) as f64 / self.total as f64
    }
}

/// Identifies one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken(u64);

/// Read-only copy of the session for observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: ProcessingState,
    pub progress: Progress,
    pub file_name: Option<String>,
    pub slide_count: usize,
    pub error: Option<String>,
}

/// Mutable session owned by the pipeline controller.
#[derive(Debug, Default)]
pub struct Session {
    state: ProcessingState,
    progress: Progress,
    file_name: Option<String>,
    slides: Vec<SlideRecord>,
    error: Option<String>,
    epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProcessingState {
        self.state
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn slides(&self) -> &[SlideRecord] {
        &self.slides
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            progress: self.progress,
            file_name: self.file_name.clone(),
            slide_count: self.slides.len(),
            error: self.error.clone(),
        }
    }

    /// Whether `token` belongs to the current run.
    pub fn is_current(&self, token: RunToken) -> bool {
        token.0 == self.epoch
    }

    /// Clear everything and return to `Idle`.
    ///
    /// Any run still in flight becomes stale.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.state = ProcessingState::Idle;
        self.progress = Progress::default();
        self.file_name = None;
        self.slides.clear();
        self.error = None;
    }

    /// Start a new run for `file_name`: `Idle | Done | Error -> Parsing`.
    pub fn begin_parsing(&mut self, file_name: impl Into<String>) -> Result<RunToken> {
        if self.is_busy() {
            return Err(Error::Busy(self.state.to_string()));
        }
        self.reset();
        self.file_name = Some(file_name.into());
        self.state = ProcessingState::Parsing;
        Ok(RunToken(self.epoch))
    }

    /// Record an invalid upload without starting a run.
    pub fn reject_input(&mut self, message: impl Into<String>) -> Result<()> {
        if self.is_busy() {
            return Err(Error::Busy(self.state.to_string()));
        }
        self.error = Some(message.into());
        Ok(())
    }

    /// Update progress for the current phase.
    pub fn set_progress(&mut self, token: RunToken, progress: Progress) -> bool {
        if !self.accepts(token) || !self.state.is_busy() {
            return false;
        }
        self.progress = progress;
        true
    }

    /// `Parsing -> GeneratingNotes`, storing the extracted slides.
    pub fn finish_parsing(&mut self, token: RunToken, slides: Vec<SlideRecord>) -> bool {
        if !self.accepts(token) || self.state != ProcessingState::Parsing {
            return false;
        }
        debug_assert!(is_contiguous(&slides));
        self.slides = slides;
        self.enter(ProcessingState::GeneratingNotes);
        true
    }

    /// `GeneratingNotes -> Done`, replacing the slides with annotated ones.
    pub fn finish_notes(&mut self, token: RunToken, slides: Vec<SlideRecord>) -> bool {
        if !self.accepts(token) || self.state != ProcessingState::GeneratingNotes {
            return false;
        }
        self.slides = slides;
        self.enter(ProcessingState::Done);
        true
    }

    /// `Done -> CreatingOutput`.
    pub fn begin_export(&mut self) -> Result<RunToken> {
        if self.state != ProcessingState::Done {
            return Err(Error::InvalidState {
                operation: "export",
                state: self.state.to_string(),
            });
        }
        self.error = None;
        self.enter(ProcessingState::CreatingOutput);
        Ok(RunToken(self.epoch))
    }

    /// `CreatingOutput -> Done`.
    pub fn finish_export(&mut self, token: RunToken) -> bool {
        if !self.accepts(token) || self.state != ProcessingState::CreatingOutput {
            return false;
        }
        self.enter(ProcessingState::Done);
        true
    }

    /// `Parsing | CreatingOutput -> Error`.
    ///
    /// Slides are kept, so a failed export does not lose the deck.
    pub fn fail(&mut self, token: RunToken, message: impl Into<String>) -> bool {
        if !self.accepts(token) || !self.state.is_busy() {
            return false;
        }
        self.error = Some(message.into());
        self.enter(ProcessingState::Error);
        true
    }

    /// Overwrite the speaker notes of the slide at `index` (0-based).
    pub fn edit_notes(&mut self, index: usize, notes: impl Into<String>) -> Result<()> {
        if self.state != ProcessingState::Done {
            return Err(Error::InvalidState {
                operation: "edit notes",
                state: self.state.to_string(),
            });
        }
        let len = self.slides.len();
        let slide = self
            .slides
            .get_mut(index)
            .ok_or(Error::SlideOutOfRange { index, len })?;
        slide.speaker_notes = notes.into();
        Ok(())
    }

    fn accepts(&self, token: RunToken) -> bool {
        if self.is_current(token) {
            return true;
        }
        log::debug!(
            "Discarding update from stale run {} (current run {})",
            token.0,
            self.epoch
        );
        false
    }

    fn enter(&mut self, state: ProcessingState) {
        self.state = state;
        self.progress = Progress::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn done_session(slides: Vec<SlideRecord>) -> (Session, RunToken) {
        let mut session = Session::new();
        let token = session.begin_parsing("deck.pptx").unwrap();
        assert!(session.finish_parsing(token, slides.clone()));
        assert!(session.finish_notes(token, slides));
        (session, token)
    }

    #[test]
    fn test_busy_states() {
        assert!(ProcessingState::Parsing.is_busy());
        assert!(ProcessingState::GeneratingNotes.is_busy());
        assert!(ProcessingState::CreatingOutput.is_busy());
        assert!(!ProcessingState::Idle.is_busy());
        assert!(!ProcessingState::Done.is_busy());
        assert!(!ProcessingState::Error.is_busy());
    }

    #[test]
    fn test_full_happy_path() {
        let mut session = Session::new();
        assert_eq!(session.state(), ProcessingState::Idle);

        let token = session.begin_parsing("deck.pdf").unwrap();
        assert_eq!(session.state(), ProcessingState::Parsing);
        assert!(session.set_progress(token, Progress::new(1, 2)));

        assert!(session.finish_parsing(token, vec![SlideRecord::new(1, "a")]));
        assert_eq!(session.state(), ProcessingState::GeneratingNotes);
        assert_eq!(session.progress(), Progress::default());

        assert!(session.finish_notes(token, vec![SlideRecord::new(1, "a").annotate("n", vec![])]));
        assert_eq!(session.state(), ProcessingState::Done);

        let export = session.begin_export().unwrap();
        assert_eq!(session.state(), ProcessingState::CreatingOutput);
        assert!(session.finish_export(export));
        assert_eq!(session.state(), ProcessingState::Done);
        assert_eq!(session.slides()[0].speaker_notes, "n");
    }

    #[test]
    fn test_begin_rejected_while_busy() {
        let mut session = Session::new();
        session.begin_parsing("first.pptx").unwrap();

        let err = session.begin_parsing("second.pptx").unwrap_err();
        assert!(matches!(err, Error::Busy(_)));
        assert_eq!(session.file_name(), Some("first.pptx"));
        assert!(session.reject_input("nope").is_err());
    }

    #[test]
    fn test_reset_from_error_and_done() {
        let mut session = Session::new();
        let token = session.begin_parsing("bad.pdf").unwrap();
        assert!(session.fail(token, "An error occurred: broken"));
        assert_eq!(session.state(), ProcessingState::Error);
        assert_eq!(session.error(), Some("An error occurred: broken"));

        session.reset();
        assert_eq!(session.state(), ProcessingState::Idle);
        assert_eq!(session.progress(), Progress::new(0, 0));
        assert!(session.slides().is_empty());
        assert_eq!(session.error(), None);

        let (mut session, _) = done_session(vec![SlideRecord::new(1, "x")]);
        session.reset();
        assert_eq!(session.state(), ProcessingState::Idle);
        assert!(session.slides().is_empty());
        assert_eq!(session.file_name(), None);
    }

    #[test]
    fn test_stale_token_is_ignored() {
        let mut session = Session::new();
        let stale = session.begin_parsing("old.pptx").unwrap();
        session.reset();
        let fresh = session.begin_parsing("new.pptx").unwrap();

        assert!(!session.is_current(stale));
        assert!(!session.finish_parsing(stale, vec![SlideRecord::new(1, "old")]));
        assert!(!session.set_progress(stale, Progress::new(5, 5)));
        assert!(!session.fail(stale, "old failure"));
        assert_eq!(session.state(), ProcessingState::Parsing);
        assert!(session.slides().is_empty());

        assert!(session.finish_parsing(fresh, vec![SlideRecord::new(1, "new")]));
        assert_eq!(session.slides()[0].original_text, "new");
    }

    #[test]
    fn test_edit_notes_idempotent() {
        let (mut session, _) =
            done_session(vec![SlideRecord::new(1, "a"), SlideRecord::new(2, "b")]);

        session.edit_notes(1, "Revised").unwrap();
        let after_first = session.slides().to_vec();
        session.edit_notes(1, "Revised").unwrap();
        assert_eq!(session.slides(), after_first.as_slice());
        assert_eq!(session.slides()[1].speaker_notes, "Revised");
        assert_eq!(session.slides()[0].speaker_notes, "");
    }

    #[test]
    fn test_edit_notes_out_of_range_and_wrong_state() {
        let (mut session, _) = done_session(vec![SlideRecord::new(1, "a")]);
        let err = session.edit_notes(4, "x").unwrap_err();
        assert!(matches!(err, Error::SlideOutOfRange { index: 4, len: 1 }));

        let mut idle = Session::new();
        assert!(matches!(
            idle.edit_notes(0, "x"),
            Err(Error::InvalidState { .. })
        ));
    }

    #[test]
    fn test_export_only_from_done() {
        let mut session = Session::new();
        assert!(matches!(
            session.begin_export(),
            Err(Error::InvalidState { operation: "export", .. })
        ));
    }

    #[test]
    fn test_failed_export_keeps_slides() {
        let (mut session, _) = done_session(vec![SlideRecord::new(1, "keep me")]);
        let token = session.begin_export().unwrap();
        assert!(session.fail(token, "disk full"));
        assert_eq!(session.state(), ProcessingState::Error);
        assert_eq!(session.slides().len(), 1);
    }

    #[test]
    fn test_progress_fraction() {
        assert_eq!(Progress::new(0, 0).fraction(), 0.0);
        assert_eq!(Progress::new(1, 4).fraction(), 0.25);
        assert_eq!(Progress::new(9, 4).fraction(), 1.0);
    }
}
