//! Format dispatch for input files.

use notes_core::{Error, InputFile, Progress, Result, SlideRecord, SourceKind};
use notes_pdf::{PdfExtractor, RasterEngine};
use notes_pptx::SlideArchiveReader;
use std::io::Cursor;

/// Raster engine shared by the pipeline.
pub type BoxedEngine = Box<dyn RasterEngine>;

/// Reads an [`InputFile`] into slide records using the backend for its kind.
pub struct DocumentExtractor {
    archive: SlideArchiveReader,
    raster: Option<PdfExtractor<BoxedEngine>>,
}

impl DocumentExtractor {
    /// Extractor for slide archives only; PDF input fails.
    pub fn new() -> Self {
        Self {
            archive: SlideArchiveReader::new(),
            raster: None,
        }
    }

    /// Enable PDF input.
    pub fn with_raster(mut self, raster: PdfExtractor<BoxedEngine>) -> Self {
        self.raster = Some(raster);
        self
    }

    pub fn supports(&self, kind: SourceKind) -> bool {
        match kind {
            SourceKind::Pptx => true,
            SourceKind::Pdf => self.raster.is_some(),
        }
    }

    /// Extract slide records. Progress is reported only for raster input.
    pub fn extract<F>(&self, input: &InputFile, on_progress: F) -> Result<Vec<SlideRecord>>
    where
        F: FnMut(Progress),
    {
        let kind = input
            .kind()
            .ok_or_else(|| Error::UnsupportedFormat(input.name.clone()))?;
        log::debug!("Extracting {} as {}", input.name, kind);

        match kind {
            SourceKind::Pptx => self
                .archive
                .read(Cursor::new(input.bytes.as_slice()))
                .map_err(Error::into_extraction),
            SourceKind::Pdf => {
                let raster = self.raster.as_ref().ok_or_else(|| {
                    Error::ExtractionError("PDF engine unavailable".to_string())
                })?;
                raster.extract(&input.bytes, on_progress)
            }
        }
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_core::PDF_MIME;

    #[test]
    fn test_unsupported_input() {
        let input = InputFile::new("notes.txt", Some("text/plain".to_string()), b"hi".to_vec());
        let err = DocumentExtractor::new().extract(&input, |_| {}).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref n) if n == "notes.txt"));
    }

    #[test]
    fn test_pdf_without_engine() {
        let extractor = DocumentExtractor::new();
        assert!(!extractor.supports(SourceKind::Pdf));
        assert!(extractor.supports(SourceKind::Pptx));

        let input = InputFile::new("deck.pdf", Some(PDF_MIME.to_string()), b"%PDF-1.7".to_vec());
        let err = extractor.extract(&input, |_| {}).unwrap_err();
        assert!(matches!(err, Error::ExtractionError(_)));
    }

    #[test]
    fn test_corrupt_archive_is_extraction_error() {
        let input = InputFile::new("deck.pptx", None, b"not a zip".to_vec());
        let err = DocumentExtractor::new().extract(&input, |_| {}).unwrap_err();
        assert!(matches!(err, Error::ExtractionError(_)));
    }
}
