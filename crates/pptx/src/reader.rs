//! PPTX slide text reader.

use notes_core::text::{decode_minimal_entities, join_text_items};
use notes_core::{Error, Result, SlideRecord};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Path of the `number`-th slide part inside a PPTX archive.
pub fn slide_entry_path(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}

/// Reader for PPTX (Office Open XML) slide archives.
///
/// Slides are read from the numbered entries `ppt/slides/slide1.xml`,
/// `slide2.xml`, ... until the first missing number. Each slide yields a
/// text-only [`SlideRecord`].
pub struct SlideArchiveReader;

impl SlideArchiveReader {
    /// Create a new slide archive reader.
    pub fn new() -> Self {
        Self
    }

    /// Read all numbered slides from an archive.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<Vec<SlideRecord>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut slides = Vec::new();
        let mut number = 1;

        while let Some(xml) = self.read_slide_xml(&mut archive, number)? {
            let nodes = extract_text_nodes(&xml)
                .map_err(|e| Error::XmlError(format!("slide {}: {}", number, e)))?;
            log::debug!("Slide {}: {} text nodes", number, nodes.len());
            slides.push(SlideRecord::new(number, join_text_items(&nodes)));
            number += 1;
        }

        log::debug!("Read {} slides from archive", slides.len());
        Ok(slides)
    }

    /// Read a numbered slide part, or `None` when the entry does not exist.
    fn read_slide_xml<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        number: usize,
    ) -> Result<Option<String>> {
        let path = slide_entry_path(number);
        let mut file = match archive.by_name(&path) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => {
                return Err(Error::ZipError(format!(
                    "Failed to open '{}' in archive: {}",
                    path, e
                )))
            }
        };

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(Some(content))
    }
}

impl Default for SlideArchiveReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Collect the text of every `<a:t>` element in document order.
///
/// Node text is taken verbatim apart from decoding `&lt;`, `&gt;` and
/// `&amp;`. Self-closing `<a:t/>` elements carry no text and are skipped.
pub fn extract_text_nodes(xml: &str) -> std::result::Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut nodes = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) if is_text_element(e.name().as_ref()) => {
                current = Some(String::new());
            }
            Event::Text(e) => {
                if let Some(ref mut text) = current {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::CData(e) => {
                if let Some(ref mut text) = current {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::End(ref e) if is_text_element(e.name().as_ref()) => {
                if let Some(text) = current.take() {
                    nodes.push(decode_minimal_entities(&text));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(nodes)
}

/// Whether `name` is a DrawingML text run element (`a:t`).
fn is_text_element(name: &[u8]) -> bool {
    name == b"a:t" || (local_name(name) == b"t" && !name.contains(&b':'))
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
