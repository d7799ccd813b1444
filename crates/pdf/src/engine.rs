//! Capability traits for page rasterization.

use image::RgbImage;
use notes_core::Result;

/// A library able to open paged documents from memory.
pub trait RasterEngine: Send + Sync {
    /// Open a document held in `bytes`.
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn RasterDocument + 'a>>;
}

/// An opened paged document.
pub trait RasterDocument {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// Natural page size (width, height) in points.
    fn page_size(&self, index: usize) -> Result<(f32, f32)>;

    /// Render a page to exactly `width` x `height` pixels.
    fn render_page(&self, index: usize, width: u32, height: u32) -> Result<RgbImage>;

    /// Text items of a page in reading order.
    fn page_text_items(&self, index: usize) -> Result<Vec<String>>;
}

impl<T: RasterEngine + ?Sized> RasterEngine for Box<T> {
    fn open<'a>(&'a self, bytes: &'a [u8]) -> Result<Box<dyn RasterDocument + 'a>> {
        (**self).open(bytes)
    }
}
