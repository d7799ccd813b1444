//! Page-by-page PDF extraction into slide records.

use crate::engine::RasterEngine;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use notes_core::text::{clean_layout_text, join_text_items};
use notes_core::{Error, PreviewImage, Progress, Result, SlideRecord};

/// Rendering options for page previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Width of the rendered preview in pixels.
    pub target_width: u32,
    /// JPEG quality, 1 to 100.
    pub jpeg_quality: u8,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            target_width: 1280,
            jpeg_quality: 80,
        }
    }
}

impl RenderOptions {
    pub fn with_target_width(mut self, width: u32) -> Self {
        self.target_width = width.max(1);
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Preview height for a page of `page_width` x `page_height` points.
    pub fn target_height(&self, page_width: f32, page_height: f32) -> u32 {
        if page_width <= 0.0 || page_height <= 0.0 {
            return self.target_width;
        }
        let scale = self.target_width as f64 / page_width as f64;
        ((page_height as f64 * scale).round() as u32).max(1)
    }
}

/// Extracts one [`SlideRecord`] per PDF page with a JPEG preview.
pub struct PdfExtractor<E> {
    engine: E,
    options: RenderOptions,
}

impl<E: RasterEngine> PdfExtractor<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Extract all pages of the document in `bytes`.
    ///
    /// `on_page` is called with `(i, N)` after the i-th page is done.
    pub fn extract<F>(&self, bytes: &[u8], mut on_page: F) -> Result<Vec<SlideRecord>>
    where
        F: FnMut(Progress),
    {
        let document = self.engine.open(bytes)?;
        let total = document.page_count();
        log::debug!("PDF has {} pages", total);

        let mut slides = Vec::with_capacity(total);
        for index in 0..total {
            let (page_width, page_height) = document.page_size(index)?;
            let width = self.options.target_width;
            let height = self.options.target_height(page_width, page_height);

            let image = document.render_page(index, width, height)?;
            let jpeg = encode_jpeg(&image, self.options.jpeg_quality)?;
            let preview = PreviewImage::new(image.width(), image.height(), jpeg);

            let items = document.page_text_items(index)?;
            let text = clean_layout_text(&join_text_items(&items));

            log::debug!(
                "Page {}: {}x{} preview, {} text items",
                index + 1,
                preview.width,
                preview.height,
                items.len()
            );
            slides.push(SlideRecord::with_preview(index + 1, text, preview));
            on_page(Progress::new(index + 1, total));
        }

        Ok(slides)
    }
}

fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .encode_image(image)
        .map_err(|e| Error::ExtractionError(format!("Failed to encode preview: {}", e)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RasterDocument;
    use image::Rgb;

    /// In-memory document: pages of (width, height, text items).
    struct FakeEngine {
        pages: Vec<(f32, f32, Vec<&'static str>)>,
        fail_render_at: Option<usize>,
    }

    struct FakeDocument<'a> {
        engine: &'a FakeEngine,
    }

    impl RasterEngine for FakeEngine {
        fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn RasterDocument + 'a>> {
            if !bytes.starts_with(b"%PDF-") {
                return Err(Error::ExtractionError("not a PDF".to_string()));
            }
            Ok(Box::new(FakeDocument { engine: self }))
        }
    }

    impl RasterDocument for FakeDocument<'_> {
        fn page_count(&self) -> usize {
            self.engine.pages.len()
        }

        fn page_size(&self, index: usize) -> Result<(f32, f32)> {
            let (w, h, _) = &self.engine.pages[index];
            Ok((*w, *h))
        }

        fn render_page(&self, index: usize, width: u32, height: u32) -> Result<RgbImage> {
            if self.engine.fail_render_at == Some(index) {
                return Err(Error::ExtractionError(format!("render failed on {}", index)));
            }
            Ok(RgbImage::from_pixel(width, height, Rgb([200, 200, 200])))
        }

        fn page_text_items(&self, index: usize) -> Result<Vec<String>> {
            Ok(self.engine.pages[index]
                .2
                .iter()
                .map(|s| s.to_string())
                .collect())
        }
    }

    fn engine() -> FakeEngine {
        FakeEngine {
            pages: vec![
                (960.0, 540.0, vec!["Quarterly", "Results"]),
                (612.0, 792.0, vec!["Revenue  up\n", "12%"]),
                (720.0, 405.0, vec![]),
            ],
            fail_render_at: None,
        }
    }

    #[test]
    fn test_target_height_preserves_aspect_ratio() {
        let options = RenderOptions::default();
        assert_eq!(options.target_height(960.0, 540.0), 720);
        assert_eq!(options.target_height(612.0, 792.0), 1656);
        assert_eq!(options.target_height(0.0, 100.0), 1280);
    }

    #[test]
    fn test_options_builders_clamp() {
        let options = RenderOptions::default()
            .with_target_width(0)
            .with_jpeg_quality(0);
        assert_eq!(options.target_width, 1);
        assert_eq!(options.jpeg_quality, 1);
    }

    #[test]
    fn test_extract_pages_in_order() {
        let extractor = PdfExtractor::new(engine());
        let slides = extractor.extract(b"%PDF-1.7", |_| {}).unwrap();

        assert_eq!(slides.len(), 3);
        assert_eq!(slides[0].slide_number, 1);
        assert_eq!(slides[0].original_text, "Quarterly Results");
        assert_eq!(slides[1].original_text, "Revenue up 12%");
        assert_eq!(slides[2].original_text, "");

        let first = slides[0].preview_image.as_ref().unwrap();
        assert_eq!((first.width, first.height), (1280, 720));
        assert!(first.jpeg.starts_with(&[0xFF, 0xD8]));

        let second = slides[1].preview_image.as_ref().unwrap();
        assert_eq!((second.width, second.height), (1280, 1656));
        assert!(slides.iter().all(|s| s.speaker_notes.is_empty()));
    }

    #[test]
    fn test_extract_custom_width() {
        let extractor = PdfExtractor::new(engine())
            .with_options(RenderOptions::default().with_target_width(640));
        let slides = extractor.extract(b"%PDF-1.7", |_| {}).unwrap();
        let preview = slides[0].preview_image.as_ref().unwrap();
        assert_eq!((preview.width, preview.height), (640, 360));
    }

    #[test]
    fn test_extract_reports_progress() {
        let mut seen = Vec::new();
        PdfExtractor::new(engine())
            .extract(b"%PDF-1.7", |p| seen.push(p))
            .unwrap();
        assert_eq!(
            seen,
            vec![Progress::new(1, 3), Progress::new(2, 3), Progress::new(3, 3)]
        );
    }

    #[test]
    fn test_extract_unreadable_document() {
        let err = PdfExtractor::new(engine())
            .extract(b"garbage", |_| {})
            .unwrap_err();
        assert!(matches!(err, Error::ExtractionError(_)));
    }

    #[test]
    fn test_extract_render_failure_is_fatal() {
        let mut failing = engine();
        failing.fail_render_at = Some(1);
        let mut seen = Vec::new();
        let err = PdfExtractor::new(failing)
            .extract(b"%PDF-1.7", |p| seen.push(p))
            .unwrap_err();
        assert!(matches!(err, Error::ExtractionError(_)));
        assert_eq!(seen, vec![Progress::new(1, 3)]);
    }
}
