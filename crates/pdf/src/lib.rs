//! PDF backend: renders each page to a JPEG preview and collects its text.

pub mod engine;
pub mod extractor;
pub mod pdfium;

pub use engine::{RasterDocument, RasterEngine};
pub use extractor::{PdfExtractor, RenderOptions};
pub use pdfium::PdfiumEngine;
