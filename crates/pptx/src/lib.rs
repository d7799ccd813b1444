//! PPTX (Office Open XML) support.
//!
//! Reads slide text from .pptx archives and writes annotated decks with
//! speaker notes.

pub mod layout;
pub mod parts;
pub mod reader;
pub mod writer;

pub use layout::DeckLayout;
pub use reader::SlideArchiveReader;
pub use writer::DeckWriter;
