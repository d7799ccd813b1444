//! Drives a presentation through extraction, speaker-note generation,
//! review and export.

pub mod extract;
pub mod observer;
pub mod pipeline;

pub use extract::{BoxedEngine, DocumentExtractor};
pub use observer::{NoopObserver, PipelineObserver};
pub use pipeline::{Pipeline, SharedSession, INVALID_INPUT_MESSAGE};
