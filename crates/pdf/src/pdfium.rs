//! pdfium-backed [`RasterEngine`].

use crate::engine::{RasterDocument, RasterEngine};
use image::{DynamicImage, RgbImage, RgbaImage};
use notes_core::{Error, Result};
use pdfium_render::prelude::*;
use std::path::Path;

/// Raster engine backed by the pdfium shared library.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Bind to the pdfium library in `library_dir`, or the system library
    /// when no directory is given.
    pub fn bind(library_dir: Option<&Path>) -> Result<Self> {
        let bindings = match library_dir {
            Some(dir) => {
                log::debug!("Binding pdfium from {}", dir.display());
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            }
            None => Pdfium::bind_to_system_library(),
        }
        .map_err(|e| Error::ExtractionError(format!("PDF engine unavailable: {:?}", e)))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl RasterEngine for PdfiumEngine {
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn RasterDocument + 'a>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| Error::ExtractionError(format!("Failed to open PDF: {:?}", e)))?;
        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumDocument<'a> {
    fn page(&self, index: usize) -> Result<PdfPage<'a>> {
        let page_index = PdfPageIndex::try_from(index)
            .map_err(|_| Error::ExtractionError(format!("Page index {} out of range", index)))?;
        self.document
            .pages()
            .get(page_index)
            .map_err(|e| page_error(index, e))
    }
}

impl RasterDocument for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        let page = self.page(index)?;
        Ok((page.width().value, page.height().value))
    }

    fn render_page(&self, index: usize, width: u32, height: u32) -> Result<RgbImage> {
        let page = self.page(index)?;
        let config = PdfRenderConfig::new().set_target_size(width as Pixels, height as Pixels);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| page_error(index, e))?;

        let rgba = RgbaImage::from_raw(
            bitmap.width() as u32,
            bitmap.height() as u32,
            bitmap.as_rgba_bytes(),
        )
        .ok_or_else(|| {
            Error::ExtractionError(format!("Page {}: bitmap size mismatch", index + 1))
        })?;

        Ok(DynamicImage::ImageRgba8(rgba).to_rgb8())
    }

    fn page_text_items(&self, index: usize) -> Result<Vec<String>> {
        let page = self.page(index)?;
        let text = page.text().map_err(|e| page_error(index, e))?;
        Ok(text
            .segments()
            .iter()
            .map(|segment| segment.text())
            .collect())
    }
}

fn page_error(index: usize, e: PdfiumError) -> Error {
    Error::ExtractionError(format!("Page {}: {:?}", index + 1, e))
}
