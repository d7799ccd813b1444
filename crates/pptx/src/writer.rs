//! Annotated deck writer.
//!
//! Builds a widescreen PPTX with one slide per [`SlideRecord`]: rendered
//! pages become full-bleed background pictures, text-only slides get a
//! "Slide N" heading and their extracted text. Every slide carries its
//! speaker notes on a notes page.

use crate::layout::DeckLayout;
use crate::parts::{self, SlideContent, SLIDE_IMAGE_REL};
use notes_core::{Error, Progress, Result, SlideRecord};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writer for annotated PPTX decks.
#[derive(Debug, Clone, Default)]
pub struct DeckWriter {
    layout: DeckLayout,
}

impl DeckWriter {
    /// Create a writer using the widescreen layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom layout.
    pub fn with_layout(mut self, layout: DeckLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Build the deck in memory.
    ///
    /// `on_slide` is called with `(i, N)` after the i-th slide is added.
    pub fn build<F>(&self, slides: &[SlideRecord], title: &str, mut on_slide: F) -> Result<Vec<u8>>
    where
        F: FnMut(Progress),
    {
        if slides.is_empty() {
            return Err(Error::ExportError(
                "There are no slides to download.".to_string(),
            ));
        }

        let total = slides.len();
        let mut package = Package::new();

        package
            .add("[Content_Types].xml", parts::content_types(total))
            .and_then(|p| p.add("_rels/.rels", parts::package_relationships()))
            .and_then(|p| p.add("docProps/core.xml", parts::core_properties(title)))
            .and_then(|p| p.add("docProps/app.xml", parts::app_properties(total)))
            .and_then(|p| p.add("ppt/presentation.xml", parts::presentation(&self.layout, total)))
            .and_then(|p| {
                p.add(
                    "ppt/_rels/presentation.xml.rels",
                    parts::presentation_relationships(total),
                )
            })
            .and_then(|p| p.add("ppt/slideMasters/slideMaster1.xml", parts::slide_master()))
            .and_then(|p| {
                p.add(
                    "ppt/slideMasters/_rels/slideMaster1.xml.rels",
                    parts::slide_master_relationships(),
                )
            })
            .and_then(|p| p.add("ppt/slideLayouts/slideLayout1.xml", parts::slide_layout()))
            .and_then(|p| {
                p.add(
                    "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
                    parts::slide_layout_relationships(),
                )
            })
            .and_then(|p| p.add("ppt/notesMasters/notesMaster1.xml", parts::notes_master()))
            .and_then(|p| {
                p.add(
                    "ppt/notesMasters/_rels/notesMaster1.xml.rels",
                    parts::notes_master_relationships(),
                )
            })
            .and_then(|p| p.add("ppt/theme/theme1.xml", parts::theme("Slide Notes")))
            .and_then(|p| p.add("ppt/theme/theme2.xml", parts::theme("Slide Notes Notes")))?;

        for (idx, slide) in slides.iter().enumerate() {
            let number = idx + 1;
            self.add_slide(&mut package, number, slide)?;
            on_slide(Progress::new(number, total));
        }

        let bytes = package.finish()?;
        log::debug!("Built deck with {} slides ({} bytes)", total, bytes.len());
        Ok(bytes)
    }

    fn add_slide(&self, package: &mut Package, number: usize, slide: &SlideRecord) -> Result<()> {
        let media = match &slide.preview_image {
            Some(image) => {
                let name = format!("image{}.jpeg", number);
                package.add_binary(&format!("ppt/media/{}", name), &image.jpeg)?;
                Some(name)
            }
            None => None,
        };

        let heading = format!("Slide {}", slide.slide_number);
        let content = match media {
            Some(_) => SlideContent::Background {
                image_rel: SLIDE_IMAGE_REL,
            },
            None => SlideContent::Text {
                heading: &heading,
                body: &slide.original_text,
            },
        };

        package
            .add(
                &format!("ppt/slides/slide{}.xml", number),
                parts::slide(&self.layout, content),
            )?
            .add(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                parts::slide_relationships(number, media.as_deref()),
            )?
            .add(
                &format!("ppt/notesSlides/notesSlide{}.xml", number),
                parts::notes_slide(&slide.speaker_notes),
            )?
            .add(
                &format!("ppt/notesSlides/_rels/notesSlide{}.xml.rels", number),
                parts::notes_slide_relationships(number),
            )?;

        Ok(())
    }
}

/// In-memory ZIP package being assembled.
struct Package {
    zip: ZipWriter<Cursor<Vec<u8>>>,
}

impl Package {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    fn add(&mut self, path: &str, xml: String) -> Result<&mut Self> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.write_entry(path, xml.as_bytes(), options)?;
        Ok(self)
    }

    fn add_binary(&mut self, path: &str, bytes: &[u8]) -> Result<&mut Self> {
        // JPEG data does not compress further.
        let options = FileOptions::default().compression_method(CompressionMethod::Stored);
        self.write_entry(path, bytes, options)?;
        Ok(self)
    }

    fn write_entry(&mut self, path: &str, bytes: &[u8], options: FileOptions) -> Result<()> {
        self.zip
            .start_file(path, options)
            .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", path, e)))
            .map_err(Error::into_export)?;
        self.zip
            .write_all(bytes)
            .map_err(|e| Error::ExportError(format!("Failed to write '{}': {}", path, e)))
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        let cursor = self
            .zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
            .map_err(Error::into_export)?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{extract_text_nodes, SlideArchiveReader};
    use notes_core::PreviewImage;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_entry(bytes: &[u8], path: &str) -> Option<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(path).ok()?;
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        Some(content)
    }

    fn text_deck() -> Vec<SlideRecord> {
        vec![
            SlideRecord::new(1, "Hello").annotate("Notes for hello", vec![]),
            SlideRecord::new(2, "World").annotate("Notes for world", vec![]),
        ]
    }

    #[test]
    fn test_build_rejects_empty_deck() {
        let err = DeckWriter::new().build(&[], "Empty", |_| {}).unwrap_err();
        assert!(matches!(err, Error::ExportError(_)));
    }

    #[test]
    fn test_build_text_deck() {
        let bytes = DeckWriter::new().build(&text_deck(), "Deck", |_| {}).unwrap();

        let slide1 = read_entry(&bytes, "ppt/slides/slide1.xml").unwrap();
        let nodes = extract_text_nodes(&slide1).unwrap();
        assert_eq!(nodes, vec!["Slide 1", "Hello"]);
        assert!(!slide1.contains("<p:bg>"));

        let notes2 = read_entry(&bytes, "ppt/notesSlides/notesSlide2.xml").unwrap();
        assert_eq!(extract_text_nodes(&notes2).unwrap(), vec!["Notes for world"]);

        assert!(read_entry(&bytes, "ppt/media/image1.jpeg").is_none());
        assert!(read_entry(&bytes, "ppt/slides/slide3.xml").is_none());
    }

    #[test]
    fn test_built_deck_reads_back() {
        let bytes = DeckWriter::new().build(&text_deck(), "Deck", |_| {}).unwrap();
        let slides = SlideArchiveReader::new().read(Cursor::new(bytes)).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[1].original_text, "Slide 2 World");
    }

    #[test]
    fn test_build_image_deck() {
        let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        let slides = vec![SlideRecord::with_preview(
            1,
            "Rendered text",
            PreviewImage::new(1280, 720, jpeg.clone()),
        )
        .annotate("Image notes", vec![])];

        let bytes = DeckWriter::new().build(&slides, "Images", |_| {}).unwrap();

        let slide = read_entry(&bytes, "ppt/slides/slide1.xml").unwrap();
        assert!(slide.contains("<a:blip r:embed=\"rId3\"/>"));
        assert!(extract_text_nodes(&slide).unwrap().is_empty());

        let rels = read_entry(&bytes, "ppt/slides/_rels/slide1.xml.rels").unwrap();
        assert!(rels.contains("../media/image1.jpeg"));

        let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let mut media = Vec::new();
        archive
            .by_name("ppt/media/image1.jpeg")
            .unwrap()
            .read_to_end(&mut media)
            .unwrap();
        assert_eq!(media, jpeg);
    }

    #[test]
    fn test_build_reports_progress_per_slide() {
        let mut seen = Vec::new();
        DeckWriter::new()
            .build(&text_deck(), "Deck", |p| seen.push(p))
            .unwrap();
        assert_eq!(seen, vec![Progress::new(1, 2), Progress::new(2, 2)]);
    }
}
