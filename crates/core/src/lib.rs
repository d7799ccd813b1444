//! Core domain types, session state, and text cleanup for generating
//! speaker notes from presentations.

pub mod error;
pub mod naming;
pub mod session;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use naming::output_file_name;
pub use session::{ProcessingState, Progress, RunToken, Session, SessionSnapshot};
pub use types::{InputFile, PreviewImage, SlideRecord, Source, SourceKind, PDF_MIME};
