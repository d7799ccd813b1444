//! Speaker-note generation.
//!
//! [`NoteGenerator`] builds a prompt for each slide (with its neighbours as
//! context) and sends it to a [`TextGenerator`]. [`GeminiClient`] is the
//! production backend: Gemini `generateContent` with Google Search
//! grounding, returning the cited web sources alongside the text.

pub mod client;
pub mod error;
pub mod generator;
pub mod prompt;

use async_trait::async_trait;
use notes_core::Source;

pub use client::{GeminiClient, GeminiConfig};
pub use error::GenerationError;
pub use generator::{NoteGenerator, SlideNotes, FALLBACK_NOTES};
pub use prompt::ContextWindow;

/// Text returned by a generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub sources: Vec<Source>,
}

/// A service that answers a prompt with grounded text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation, GenerationError>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for std::sync::Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<Generation, GenerationError> {
        (**self).generate(prompt).await
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate(&self, prompt: &str) -> Result<Generation, GenerationError> {
        (**self).generate(prompt).await
    }
}
