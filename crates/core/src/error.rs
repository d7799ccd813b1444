//! Error types for presentation extraction, export, and session control.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting, exporting, or driving a session.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input is neither a PDF nor a recognized slide archive.
    #[error("Invalid file type. Please upload a PDF or PPTX file. ({0})")]
    UnsupportedFormat(String),

    /// The underlying engine could not read the document structure.
    #[error("Text extraction error: {0}")]
    ExtractionError(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or writing error (for PPTX).
    #[error("XML error: {0}")]
    XmlError(String),

    /// Building the output presentation failed.
    #[error("Export error: {0}")]
    ExportError(String),

    /// A run is already in progress.
    #[error("A file is already being processed ({0})")]
    Busy(String),

    /// The requested operation is not valid in the current state.
    #[error("Operation '{operation}' is not allowed while {state}")]
    InvalidState {
        operation: &'static str,
        state: String,
    },

    /// A slide index outside the current deck.
    #[error("Slide {index} does not exist (deck has {len} slides)")]
    SlideOutOfRange { index: usize, len: usize },

    /// The run was reset or replaced before it finished.
    #[error("The run was reset before it finished")]
    Superseded,
}

impl Error {
    /// Fold a lower-level archive error into the extraction category.
    pub fn into_extraction(self) -> Self {
        match self {
            Error::ZipError(msg) | Error::XmlError(msg) => Error::ExtractionError(msg),
            other => other,
        }
    }

    /// Fold a lower-level archive error into the export category.
    pub fn into_export(self) -> Self {
        match self {
            Error::ZipError(msg) | Error::XmlError(msg) => Error::ExportError(msg),
            Error::IoError(e) => Error::ExportError(e.to_string()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_extraction_maps_archive_errors() {
        let err = Error::ZipError("bad header".to_string()).into_extraction();
        assert!(matches!(err, Error::ExtractionError(ref m) if m == "bad header"));

        let err = Error::XmlError("unclosed tag".to_string()).into_extraction();
        assert!(matches!(err, Error::ExtractionError(_)));
    }

    #[test]
    fn test_into_export_keeps_other_errors() {
        let err = Error::SlideOutOfRange { index: 3, len: 2 }.into_export();
        assert!(matches!(err, Error::SlideOutOfRange { index: 3, len: 2 }));

        let err = Error::XmlError("writer closed".to_string()).into_export();
        assert!(matches!(err, Error::ExportError(_)));
    }
}
