//! The processing pipeline: extract, annotate, review, export.
//!
//! A [`Pipeline`] owns the handles needed to run one input file through
//! the session state machine:
//!
//! ```text
//! Idle -> Parsing -> GeneratingNotes -> Done <-> CreatingOutput
//!            \                                      /
//!             +------------> Error <---------------+
//! ```
//!
//! The session is shared behind a mutex that is only held for short,
//! synchronous updates. Every run carries a [`RunToken`]; when the session
//! is reset or a new run starts, updates from the old run are dropped and
//! the old run ends with [`Error::Superseded`].

use crate::extract::DocumentExtractor;
use crate::observer::{NoopObserver, PipelineObserver};
use notes_ai::{NoteGenerator, TextGenerator};
use notes_core::naming::ensure_pptx_extension;
use notes_core::{
    output_file_name, Error, InputFile, ProcessingState, Progress, Result, RunToken, Session,
    SessionSnapshot, SlideRecord,
};
use notes_pptx::DeckWriter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Session shared between the pipeline and its front end.
pub type SharedSession = Arc<Mutex<Session>>;

/// Message stored on the session when an upload is rejected.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid file type. Please upload a PDF or PPTX file.";

pub struct Pipeline<G> {
    session: SharedSession,
    extractor: Arc<DocumentExtractor>,
    notes: NoteGenerator<G>,
    writer: DeckWriter,
    observer: Arc<dyn PipelineObserver>,
}

impl<G: TextGenerator> Pipeline<G> {
    pub fn new(extractor: DocumentExtractor, generator: G) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            extractor: Arc::new(extractor),
            notes: NoteGenerator::new(generator),
            writer: DeckWriter::new(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Drive an existing shared session instead of a private one.
    pub fn with_session(mut self, session: SharedSession) -> Self {
        self.session = session;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_writer(mut self, writer: DeckWriter) -> Self {
        self.writer = writer;
        self
    }

    pub fn session(&self) -> SharedSession {
        Arc::clone(&self.session)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        lock(&self.session).snapshot()
    }

    /// Copy of the current slide records.
    pub fn slides(&self) -> Vec<SlideRecord> {
        lock(&self.session).slides().to_vec()
    }

    /// Run `input` through extraction and note generation.
    ///
    /// Returns the number of slides on success. Invalid input is rejected
    /// without leaving `Idle`; a run already in progress yields
    /// [`Error::Busy`].
    pub async fn process(&self, input: InputFile) -> Result<usize> {
        if input.kind().is_none() {
            lock(&self.session).reject_input(INVALID_INPUT_MESSAGE)?;
            log::warn!("Rejected {}: unsupported file type", input.name);
            return Err(Error::UnsupportedFormat(input.name));
        }

        let token = lock(&self.session).begin_parsing(input.name.clone())?;
        log::info!("Processing {}", input.name);
        self.notify();

        let slides = match self.extract(token, input).await {
            Ok(slides) => slides,
            Err(e) => {
                log::error!("Extraction failed: {}", e);
                if lock(&self.session).fail(token, format!("An error occurred: {}", e)) {
                    self.notify();
                }
                return Err(e);
            }
        };

        let total = slides.len();
        if !lock(&self.session).finish_parsing(token, slides.clone()) {
            return Err(Error::Superseded);
        }
        self.notify();

        let annotated = self.annotate(token, &slides).await?;

        if !lock(&self.session).finish_notes(token, annotated) {
            return Err(Error::Superseded);
        }
        log::info!("Generated notes for {} slides", total);
        self.notify();
        Ok(total)
    }

    async fn extract(&self, token: RunToken, input: InputFile) -> Result<Vec<SlideRecord>> {
        let extractor = Arc::clone(&self.extractor);
        let session = Arc::clone(&self.session);
        let observer = Arc::clone(&self.observer);

        tokio::task::spawn_blocking(move || {
            extractor.extract(&input, |progress| {
                if lock(&session).set_progress(token, progress) {
                    observer.on_update(ProcessingState::Parsing, progress);
                }
            })
        })
        .await
        .map_err(|e| Error::ExtractionError(format!("Extraction task failed: {}", e)))?
    }

    /// Generate notes slide by slide, in order.
    async fn annotate(&self, token: RunToken, slides: &[SlideRecord]) -> Result<Vec<SlideRecord>> {
        let total = slides.len();
        let mut annotated = Vec::with_capacity(total);

        for (idx, slide) in slides.iter().enumerate() {
            let notes = self
                .notes
                .generate(&slide.original_text, slide.slide_number, slides)
                .await;
            annotated.push(slide.clone().annotate(notes.notes, notes.sources));

            if !lock(&self.session).set_progress(token, Progress::new(idx + 1, total)) {
                log::debug!("Run reset during note generation; stopping");
                return Err(Error::Superseded);
            }
            self.notify();
        }

        Ok(annotated)
    }

    /// Write the reviewed deck to `output_dir`.
    ///
    /// `name` overrides the derived `<input>_with_notes.pptx` file name.
    pub async fn export(&self, output_dir: &Path, name: Option<&str>) -> Result<PathBuf> {
        let (token, slides, file_name) = {
            let mut session = lock(&self.session);
            let token = session.begin_export()?;
            (
                token,
                session.slides().to_vec(),
                session.file_name().map(str::to_string),
            )
        };
        self.notify();

        let output_name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => ensure_pptx_extension(name),
            None => output_file_name(file_name.as_deref()),
        };
        let path = output_dir.join(&output_name);

        match self.write_deck(token, slides, &path).await {
            Ok(bytes) => {
                log::info!("Wrote {} ({} bytes)", path.display(), bytes);
                if !lock(&self.session).finish_export(token) {
                    return Err(Error::Superseded);
                }
                self.notify();
                Ok(path)
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                let message = format!("An error occurred while creating the presentation: {}", e);
                if lock(&self.session).fail(token, message) {
                    self.notify();
                }
                Err(e)
            }
        }
    }

    async fn write_deck(
        &self,
        token: RunToken,
        slides: Vec<SlideRecord>,
        path: &Path,
    ) -> Result<usize> {
        let writer = self.writer.clone();
        let session = Arc::clone(&self.session);
        let observer = Arc::clone(&self.observer);
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Presentation")
            .to_string();

        let bytes = tokio::task::spawn_blocking(move || {
            writer.build(&slides, &title, |progress| {
                if lock(&session).set_progress(token, progress) {
                    observer.on_update(ProcessingState::CreatingOutput, progress);
                }
            })
        })
        .await
        .map_err(|e| Error::ExportError(format!("Export task failed: {}", e)))??;

        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| Error::ExportError(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(bytes.len())
    }

    /// Replace the notes of the slide at `index` (0-based) after review.
    pub fn edit_notes(&self, index: usize, notes: impl Into<String>) -> Result<()> {
        lock(&self.session).edit_notes(index, notes)
    }

    /// Return to `Idle`, discarding the deck and any in-flight run.
    pub fn reset(&self) {
        lock(&self.session).reset();
        self.notify();
    }

    fn notify(&self) {
        let (state, progress) = {
            let session = lock(&self.session);
            (session.state(), session.progress())
        };
        self.observer.on_update(state, progress);
    }
}

fn lock(session: &Mutex<Session>) -> std::sync::MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
