//! Domain types for representing an extracted and annotated deck.

use serde::{Deserialize, Serialize};
use std::fmt;

/// MIME type that identifies raster-sourced (PDF) input.
pub const PDF_MIME: &str = "application/pdf";

/// The kind of document a slide deck was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// PDF, rendered page by page into raster previews.
    Pdf,
    /// PPTX (Office Open XML) slide archive, text only.
    Pptx,
}

impl SourceKind {
    /// Detect the kind from a filename and its declared MIME type.
    ///
    /// A `.pptx` suffix wins over the MIME type, matching how uploads are
    /// routed: archives by name, PDFs by content type.
    pub fn detect(filename: &str, mime: Option<&str>) -> Option<Self> {
        if filename.to_lowercase().ends_with(".pptx") {
            return Some(Self::Pptx);
        }
        mime.and_then(Self::from_mime)
    }

    /// Detect the kind from a MIME type. Only PDFs are routed this way.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_lowercase().as_str() {
            PDF_MIME => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "pptx" => Some(Self::Pptx),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"%PDF-") {
            return Some(Self::Pdf);
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        None
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Pptx => write!(f, "PPTX"),
        }
    }
}

/// A file handed to the pipeline by the front end.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// Original filename (without path).
    pub name: String,

    /// Declared MIME type, if the front end knows one.
    pub mime: Option<String>,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl InputFile {
    /// Create an input with an explicit MIME type.
    pub fn new(name: impl Into<String>, mime: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime,
            bytes,
        }
    }

    /// Create an input and sniff its MIME type from the content or extension.
    pub fn sniffed(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let is_pdf = SourceKind::from_magic(&bytes) == Some(SourceKind::Pdf)
            || name
                .rsplit_once('.')
                .and_then(|(_, ext)| SourceKind::from_extension(ext))
                == Some(SourceKind::Pdf);
        let mime = is_pdf.then(|| PDF_MIME.to_string());
        Self { name, mime, bytes }
    }

    /// The kind of this input, if it is one the pipeline accepts.
    pub fn kind(&self) -> Option<SourceKind> {
        SourceKind::detect(&self.name, self.mime.as_deref())
    }
}

/// A rendered page preview, JPEG-encoded.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewImage {
    /// Width in pixels.
    pub width: u32,

    /// Height in pixels.
    pub height: u32,

    /// Encoded JPEG data.
    #[serde(skip)]
    pub jpeg: Vec<u8>,
}

impl PreviewImage {
    pub fn new(width: u32, height: u32, jpeg: Vec<u8>) -> Self {
        Self {
            width,
            height,
            jpeg,
        }
    }
}

impl fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("jpeg_len", &self.jpeg.len())
            .finish()
    }
}

/// A web resource cited by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

impl Source {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }
}

/// A single slide: extracted content plus its generated notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// 1-based slide number.
    pub slide_number: usize,

    /// Rendered preview, present only for raster-sourced decks.
    pub preview_image: Option<PreviewImage>,

    /// Text extracted from the slide, possibly empty.
    pub original_text: String,

    /// Generated (and user-editable) speaker notes.
    pub speaker_notes: String,

    /// Sources cited while generating the notes.
    pub sources: Vec<Source>,
}

impl SlideRecord {
    /// Create a text-only slide without notes.
    pub fn new(slide_number: usize, original_text: impl Into<String>) -> Self {
        Self {
            slide_number,
            preview_image: None,
            original_text: original_text.into(),
            speaker_notes: String::new(),
            sources: Vec::new(),
        }
    }

    /// Create a slide carrying a rendered preview.
    pub fn with_preview(
        slide_number: usize,
        original_text: impl Into<String>,
        preview: PreviewImage,
    ) -> Self {
        Self {
            preview_image: Some(preview),
            ..Self::new(slide_number, original_text)
        }
    }

    /// Attach generated notes and their sources.
    pub fn annotate(mut self, notes: impl Into<String>, sources: Vec<Source>) -> Self {
        self.speaker_notes = notes.into();
        self.sources = sources;
        self
    }

    pub fn has_preview(&self) -> bool {
        self.preview_image.is_some()
    }
}

/// Check that slide numbers run 1..=N in sequence order.
pub fn is_contiguous(slides: &[SlideRecord]) -> bool {
    slides
        .iter()
        .enumerate()
        .all(|(idx, slide)| slide.slide_number == idx + 1)
}
