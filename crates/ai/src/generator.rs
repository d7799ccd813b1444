//! Per-slide note generation with fallback.

use crate::prompt::{speaker_notes_prompt, ContextWindow};
use crate::TextGenerator;
use notes_core::{SlideRecord, Source};

/// Notes stored for a slide whose generation failed.
pub const FALLBACK_NOTES: &str = "Could not generate notes for this slide.";

/// Generated notes and the web sources backing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideNotes {
    pub notes: String,
    pub sources: Vec<Source>,
}

impl SlideNotes {
    pub fn fallback() -> Self {
        Self {
            notes: FALLBACK_NOTES.to_string(),
            sources: Vec::new(),
        }
    }
}

/// Turns slide text into speaker notes.
pub struct NoteGenerator<G> {
    backend: G,
}

impl<G: TextGenerator> NoteGenerator<G> {
    pub fn new(backend: G) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &G {
        &self.backend
    }

    /// Generate notes for 1-based `slide_number`, using its neighbours in
    /// `all_slides` as context.
    ///
    /// Never fails: any service error yields [`SlideNotes::fallback`].
    pub async fn generate(
        &self,
        slide_text: &str,
        slide_number: usize,
        all_slides: &[SlideRecord],
    ) -> SlideNotes {
        let context = ContextWindow::around(slide_number, all_slides);
        let prompt = speaker_notes_prompt(slide_number, slide_text, &context);

        match self.backend.generate(&prompt).await {
            Ok(generation) => {
                log::debug!(
                    "Slide {}: {} chars of notes, {} sources",
                    slide_number,
                    generation.text.len(),
                    generation.sources.len()
                );
                SlideNotes {
                    notes: generation.text,
                    sources: generation.sources,
                }
            }
            Err(e) => {
                log::error!("Error generating notes for slide {}: {}", slide_number, e);
                SlideNotes::fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Generation, GenerationError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records prompts and answers from a script.
    struct ScriptedGenerator {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl ScriptedGenerator {
        fn new(fail: bool) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<Generation, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(GenerationError::Api {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(Generation {
                text: "Generated".to_string(),
                sources: vec![Source::new("https://example.org", "Example")],
            })
        }
    }

    fn deck() -> Vec<SlideRecord> {
        vec![
            SlideRecord::new(1, "Alpha"),
            SlideRecord::new(2, "Beta"),
            SlideRecord::new(3, "Gamma"),
        ]
    }

    #[tokio::test]
    async fn test_generate_success() {
        let generator = NoteGenerator::new(ScriptedGenerator::new(false));
        let slides = deck();
        let notes = generator.generate("Beta", 2, &slides).await;

        assert_eq!(notes.notes, "Generated");
        assert_eq!(notes.sources.len(), 1);

        let prompts = generator.backend().prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("SLIDE 2 CONTENT:\nBeta"));
        assert!(prompts[0].contains("Alpha"));
        assert!(prompts[0].contains("Gamma"));
    }

    #[tokio::test]
    async fn test_generate_failure_falls_back() {
        let generator = NoteGenerator::new(ScriptedGenerator::new(true));
        let notes = generator.generate("Alpha", 1, &deck()).await;
        assert_eq!(notes, SlideNotes::fallback());
        assert_eq!(notes.notes, "Could not generate notes for this slide.");
        assert!(notes.sources.is_empty());
    }
}
