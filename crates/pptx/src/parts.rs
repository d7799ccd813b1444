//! OOXML package parts for a generated presentation.
//!
//! Fixed parts (master, layout, themes) are static markup; per-slide parts
//! are assembled from escaped text. Every function returns a complete XML
//! document.

use crate::layout::{DeckLayout, TextBox};
use quick_xml::escape::escape;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Relationship types used by the package.
pub mod rel {
    pub const OFFICE_DOCUMENT: &str = "officeDocument";
    pub const EXTENDED_PROPERTIES: &str = "extended-properties";
    pub const SLIDE_MASTER: &str = "slideMaster";
    pub const SLIDE_LAYOUT: &str = "slideLayout";
    pub const NOTES_MASTER: &str = "notesMaster";
    pub const NOTES_SLIDE: &str = "notesSlide";
    pub const SLIDE: &str = "slide";
    pub const THEME: &str = "theme";
    pub const IMAGE: &str = "image";
}

const CORE_PROPERTIES_REL: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";

/// One entry of a `.rels` part.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub id: String,
    pub kind: String,
    pub target: String,
}

impl Relationship {
    /// A relationship whose type lives under the office-document namespace.
    pub fn office(id: impl Into<String>, kind: &str, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: format!("{}/{}", REL_BASE, kind),
            target: target.into(),
        }
    }
}

/// Render a relationships part.
pub fn relationships(rels: &[Relationship]) -> String {
    let mut xml = format!("{}<Relationships xmlns=\"{}\">", XML_DECL, NS_RELS);
    for r in rels {
        xml.push_str(&format!(
            "<Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>",
            r.id,
            r.kind,
            escape(&r.target)
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Render `[Content_Types].xml` for a deck of `slide_count` slides.
pub fn content_types(slide_count: usize) -> String {
    const PML: &str = "application/vnd.openxmlformats-officedocument.presentationml";
    let mut xml = format!(
        "{}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Default Extension=\"jpeg\" ContentType=\"image/jpeg\"/>\
         <Override PartName=\"/ppt/presentation.xml\" ContentType=\"{pml}.presentation.main+xml\"/>\
         <Override PartName=\"/ppt/slideMasters/slideMaster1.xml\" ContentType=\"{pml}.slideMaster+xml\"/>\
         <Override PartName=\"/ppt/slideLayouts/slideLayout1.xml\" ContentType=\"{pml}.slideLayout+xml\"/>\
         <Override PartName=\"/ppt/notesMasters/notesMaster1.xml\" ContentType=\"{pml}.notesMaster+xml\"/>\
         <Override PartName=\"/ppt/theme/theme1.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
         <Override PartName=\"/ppt/theme/theme2.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.theme+xml\"/>\
         <Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>\
         <Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>",
        XML_DECL,
        pml = PML
    );
    for n in 1..=slide_count {
        xml.push_str(&format!(
            "<Override PartName=\"/ppt/slides/slide{n}.xml\" ContentType=\"{pml}.slide+xml\"/>\
             <Override PartName=\"/ppt/notesSlides/notesSlide{n}.xml\" ContentType=\"{pml}.notesSlide+xml\"/>",
            n = n,
            pml = PML
        ));
    }
    xml.push_str("</Types>");
    xml
}

/// Package-level relationships.
pub fn package_relationships() -> String {
    relationships(&[
        Relationship::office("rId1", rel::OFFICE_DOCUMENT, "ppt/presentation.xml"),
        Relationship {
            id: "rId2".to_string(),
            kind: CORE_PROPERTIES_REL.to_string(),
            target: "docProps/core.xml".to_string(),
        },
        Relationship::office("rId3", rel::EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

/// `docProps/core.xml`.
pub fn core_properties(title: &str) -> String {
    format!(
        "{}<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
         <dc:title>{}</dc:title><dc:creator>slide-notes</dc:creator></cp:coreProperties>",
        XML_DECL,
        escape(&xml_safe(title))
    )
}

/// `docProps/app.xml`.
pub fn app_properties(slide_count: usize) -> String {
    format!(
        "{}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\">\
         <Application>slide-notes</Application><Slides>{n}</Slides><Notes>{n}</Notes>\
         <PresentationFormat>Widescreen</PresentationFormat></Properties>",
        XML_DECL,
        n = slide_count
    )
}

/// Relationship id of the first slide in `ppt/_rels/presentation.xml.rels`.
const FIRST_SLIDE_REL: usize = 4;

/// `ppt/presentation.xml`.
pub fn presentation(layout: &DeckLayout, slide_count: usize) -> String {
    let slide_ids: String = (0..slide_count)
        .map(|i| {
            format!(
                "<p:sldId id=\"{}\" r:id=\"rId{}\"/>",
                256 + i,
                FIRST_SLIDE_REL + i
            )
        })
        .collect();

    format!(
        "{}<p:presentation xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\" saveSubsetFonts=\"1\">\
         <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\
         <p:notesMasterIdLst><p:notesMasterId r:id=\"rId2\"/></p:notesMasterIdLst>\
         <p:sldIdLst>{}</p:sldIdLst>\
         <p:sldSz cx=\"{}\" cy=\"{}\"/><p:notesSz cx=\"6858000\" cy=\"9144000\"/>\
         </p:presentation>",
        XML_DECL, NS_A, NS_R, NS_P, slide_ids, layout.width, layout.height
    )
}

/// `ppt/_rels/presentation.xml.rels`.
pub fn presentation_relationships(slide_count: usize) -> String {
    let mut rels = vec![
        Relationship::office("rId1", rel::SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        Relationship::office("rId2", rel::NOTES_MASTER, "notesMasters/notesMaster1.xml"),
        Relationship::office("rId3", rel::THEME, "theme/theme1.xml"),
    ];
    for i in 0..slide_count {
        rels.push(Relationship::office(
            format!("rId{}", FIRST_SLIDE_REL + i),
            rel::SLIDE,
            format!("slides/slide{}.xml", i + 1),
        ));
    }
    relationships(&rels)
}

/// Empty group shape properties that open every shape tree.
const SP_TREE_HEADER: &str = "<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>\
     <p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>\
     <a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>";

const CLR_MAP: &str = "<p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" \
     accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" \
     accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>";

/// `ppt/slideMasters/slideMaster1.xml`.
pub fn slide_master() -> String {
    format!(
        "{}<p:sldMaster xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">\
         <p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg>\
         <p:spTree>{}</p:spTree></p:cSld>{}\
         <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\
         <p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles>\
         </p:sldMaster>",
        XML_DECL, NS_A, NS_R, NS_P, SP_TREE_HEADER, CLR_MAP
    )
}

pub fn slide_master_relationships() -> String {
    relationships(&[
        Relationship::office("rId1", rel::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
        Relationship::office("rId2", rel::THEME, "../theme/theme1.xml"),
    ])
}

/// `ppt/slideLayouts/slideLayout1.xml`: a blank layout.
pub fn slide_layout() -> String {
    format!(
        "{}<p:sldLayout xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\" preserve=\"1\">\
         <p:cSld name=\"Blank\"><p:spTree>{}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>",
        XML_DECL, NS_A, NS_R, NS_P, SP_TREE_HEADER
    )
}

pub fn slide_layout_relationships() -> String {
    relationships(&[Relationship::office(
        "rId1",
        rel::SLIDE_MASTER,
        "../slideMasters/slideMaster1.xml",
    )])
}

/// `ppt/notesMasters/notesMaster1.xml` with slide-image and body placeholders.
pub fn notes_master() -> String {
    format!(
        "{}<p:notesMaster xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">\
         <p:cSld><p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg><p:spTree>{}\
         <p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"Slide Image Placeholder 1\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\" noRot=\"1\" noChangeAspect=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph type=\"sldImg\" idx=\"2\"/></p:nvPr></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"685800\" y=\"1143000\"/><a:ext cx=\"5486400\" cy=\"3086100\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr></p:sp>\
         <p:sp><p:nvSpPr><p:cNvPr id=\"3\" name=\"Notes Placeholder 2\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph type=\"body\" sz=\"quarter\" idx=\"3\"/></p:nvPr></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"685800\" y=\"4400550\"/><a:ext cx=\"5486400\" cy=\"3600450\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></p:spPr>\
         <p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang=\"en-US\"/></a:p></p:txBody></p:sp>\
         </p:spTree></p:cSld>{}</p:notesMaster>",
        XML_DECL, NS_A, NS_R, NS_P, SP_TREE_HEADER, CLR_MAP
    )
}

pub fn notes_master_relationships() -> String {
    relationships(&[Relationship::office("rId1", rel::THEME, "../theme/theme2.xml")])
}

/// A complete Office theme named `name`.
pub fn theme(name: &str) -> String {
    let fill_style = "<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>";
    let line_style = |w: u32| {
        format!(
            "<a:ln w=\"{}\" cap=\"flat\" cmpd=\"sng\" algn=\"ctr\">\
             <a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill><a:prstDash val=\"solid\"/></a:ln>",
            w
        )
    };
    let effect_style = "<a:effectStyle><a:effectLst/></a:effectStyle>";
    format!(
        "{}<a:theme xmlns:a=\"{}\" name=\"{}\"><a:themeElements>\
         <a:clrScheme name=\"Office\">\
         <a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\
         <a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\
         <a:dk2><a:srgbClr val=\"44546A\"/></a:dk2><a:lt2><a:srgbClr val=\"E7E6E6\"/></a:lt2>\
         <a:accent1><a:srgbClr val=\"4472C4\"/></a:accent1><a:accent2><a:srgbClr val=\"ED7D31\"/></a:accent2>\
         <a:accent3><a:srgbClr val=\"A5A5A5\"/></a:accent3><a:accent4><a:srgbClr val=\"FFC000\"/></a:accent4>\
         <a:accent5><a:srgbClr val=\"5B9BD5\"/></a:accent5><a:accent6><a:srgbClr val=\"70AD47\"/></a:accent6>\
         <a:hlink><a:srgbClr val=\"0563C1\"/></a:hlink><a:folHlink><a:srgbClr val=\"954F72\"/></a:folHlink>\
         </a:clrScheme>\
         <a:fontScheme name=\"Office\">\
         <a:majorFont><a:latin typeface=\"Calibri Light\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:majorFont>\
         <a:minorFont><a:latin typeface=\"Calibri\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:minorFont>\
         </a:fontScheme>\
         <a:fmtScheme name=\"Office\">\
         <a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst>\
         <a:lnStyleLst>{l1}{l2}{l3}</a:lnStyleLst>\
         <a:effectStyleLst>{eff}{eff}{eff}</a:effectStyleLst>\
         <a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst>\
         </a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>",
        XML_DECL,
        NS_A,
        escape(name),
        fill = fill_style,
        l1 = line_style(6350),
        l2 = line_style(12700),
        l3 = line_style(19050),
        eff = effect_style,
    )
}

/// Slide content: either a full-bleed picture background or heading + body.
#[derive(Debug, Clone, Copy)]
pub enum SlideContent<'a> {
    /// Background picture referenced by relationship id.
    Background { image_rel: &'a str },
    /// Text-only slide.
    Text { heading: &'a str, body: &'a str },
}

/// `ppt/slides/slideN.xml`.
pub fn slide(layout: &DeckLayout, content: SlideContent<'_>) -> String {
    let (background, shapes) = match content {
        SlideContent::Background { image_rel } => (
            format!(
                "<p:bg><p:bgPr><a:blipFill dpi=\"0\" rotWithShape=\"1\"><a:blip r:embed=\"{}\"/>\
                 <a:srcRect/><a:stretch><a:fillRect/></a:stretch></a:blipFill><a:effectLst/></p:bgPr></p:bg>",
                image_rel
            ),
            String::new(),
        ),
        SlideContent::Text { heading, body } => (
            String::new(),
            format!(
                "{}{}",
                text_shape(2, "Heading", &layout.heading, &layout.text_color, heading),
                text_shape(3, "Body", &layout.body, &layout.text_color, body)
            ),
        ),
    };

    format!(
        "{}<p:sld xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\">\
         <p:cSld>{}<p:spTree>{}{}</p:spTree></p:cSld>\
         <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>",
        XML_DECL, NS_A, NS_R, NS_P, background, SP_TREE_HEADER, shapes
    )
}

/// Relationship id of the slide layout inside a slide's rels.
pub const SLIDE_LAYOUT_REL: &str = "rId1";
/// Relationship id of the notes page inside a slide's rels.
pub const SLIDE_NOTES_REL: &str = "rId2";
/// Relationship id of the background picture inside a slide's rels.
pub const SLIDE_IMAGE_REL: &str = "rId3";

/// `ppt/slides/_rels/slideN.xml.rels`.
pub fn slide_relationships(number: usize, image: Option<&str>) -> String {
    let mut rels = vec![
        Relationship::office(
            SLIDE_LAYOUT_REL,
            rel::SLIDE_LAYOUT,
            "../slideLayouts/slideLayout1.xml",
        ),
        Relationship::office(
            SLIDE_NOTES_REL,
            rel::NOTES_SLIDE,
            format!("../notesSlides/notesSlide{}.xml", number),
        ),
    ];
    if let Some(media) = image {
        rels.push(Relationship::office(
            SLIDE_IMAGE_REL,
            rel::IMAGE,
            format!("../media/{}", media),
        ));
    }
    relationships(&rels)
}

/// `ppt/notesSlides/notesSlideN.xml`.
pub fn notes_slide(notes: &str) -> String {
    format!(
        "{}<p:notes xmlns:a=\"{}\" xmlns:r=\"{}\" xmlns:p=\"{}\"><p:cSld><p:spTree>{}\
         <p:sp><p:nvSpPr><p:cNvPr id=\"2\" name=\"Slide Image Placeholder 1\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\" noRot=\"1\" noChangeAspect=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph type=\"sldImg\"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>\
         <p:sp><p:nvSpPr><p:cNvPr id=\"3\" name=\"Notes Placeholder 2\"/>\
         <p:cNvSpPr><a:spLocks noGrp=\"1\"/></p:cNvSpPr>\
         <p:nvPr><p:ph type=\"body\" idx=\"1\"/></p:nvPr></p:nvSpPr><p:spPr/>\
         <p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>\
         </p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:notes>",
        XML_DECL,
        NS_A,
        NS_R,
        NS_P,
        SP_TREE_HEADER,
        paragraphs(notes, None)
    )
}

/// `ppt/notesSlides/_rels/notesSlideN.xml.rels`.
pub fn notes_slide_relationships(number: usize) -> String {
    relationships(&[
        Relationship::office("rId1", rel::NOTES_MASTER, "../notesMasters/notesMaster1.xml"),
        Relationship::office("rId2", rel::SLIDE, format!("../slides/slide{}.xml", number)),
    ])
}

fn text_shape(id: u32, name: &str, frame: &TextBox, color: &str, text: &str) -> String {
    format!(
        "<p:sp><p:nvSpPr><p:cNvPr id=\"{id}\" name=\"{name} {id}\"/><p:cNvSpPr txBox=\"1\"/><p:nvPr/></p:nvSpPr>\
         <p:spPr><a:xfrm><a:off x=\"{x}\" y=\"{y}\"/><a:ext cx=\"{cx}\" cy=\"{cy}\"/></a:xfrm>\
         <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom><a:noFill/></p:spPr>\
         <p:txBody><a:bodyPr wrap=\"square\" rtlCol=\"0\" anchor=\"t\"/><a:lstStyle/>{paras}</p:txBody></p:sp>",
        id = id,
        name = name,
        x = frame.x,
        y = frame.y,
        cx = frame.cx,
        cy = frame.cy,
        paras = paragraphs(text, Some((frame, color)))
    )
}

/// One `<a:p>` per line of `text`, left aligned.
fn paragraphs(text: &str, style: Option<(&TextBox, &str)>) -> String {
    let run_props = match style {
        Some((frame, color)) => format!(
            "<a:rPr lang=\"en-US\" sz=\"{}\" b=\"{}\" dirty=\"0\"><a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill></a:rPr>",
            frame.size,
            if frame.bold { 1 } else { 0 },
            color
        ),
        None => "<a:rPr lang=\"en-US\" dirty=\"0\"/>".to_string(),
    };

    let safe = xml_safe(text);
    safe.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .map(|line| {
            if line.is_empty() {
                "<a:p><a:pPr algn=\"l\"/><a:endParaRPr lang=\"en-US\" dirty=\"0\"/></a:p>".to_string()
            } else {
                format!(
                    "<a:p><a:pPr algn=\"l\"/><a:r>{}<a:t>{}</a:t></a:r></a:p>",
                    run_props,
                    escape(line)
                )
            }
        })
        .collect()
}

/// Drop characters that are not allowed in XML 1.0 documents.
pub fn xml_safe(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_lists_every_slide() {
        let xml = content_types(2);
        assert!(xml.contains("/ppt/slides/slide1.xml"));
        assert!(xml.contains("/ppt/slides/slide2.xml"));
        assert!(xml.contains("/ppt/notesSlides/notesSlide2.xml"));
        assert!(!xml.contains("slide3.xml"));
        assert!(xml.contains("Extension=\"jpeg\""));
    }

    #[test]
    fn test_presentation_slide_ids() {
        let xml = presentation(&DeckLayout::wide(), 3);
        assert!(xml.contains("<p:sldId id=\"256\" r:id=\"rId4\"/>"));
        assert!(xml.contains("<p:sldId id=\"258\" r:id=\"rId6\"/>"));
        assert!(xml.contains("<p:sldSz cx=\"12192000\" cy=\"6858000\"/>"));

        let rels = presentation_relationships(3);
        assert!(rels.contains("Id=\"rId6\""));
        assert!(rels.contains("Target=\"slides/slide3.xml\""));
    }

    #[test]
    fn test_slide_with_background() {
        let xml = slide(&DeckLayout::wide(), SlideContent::Background { image_rel: SLIDE_IMAGE_REL });
        assert!(xml.contains("<a:blip r:embed=\"rId3\"/>"));
        assert!(!xml.contains("<a:t>"));
    }

    #[test]
    fn test_text_slide_escapes_content() {
        let xml = slide(
            &DeckLayout::wide(),
            SlideContent::Text { heading: "Slide 1", body: "R&D <draft>" },
        );
        assert!(xml.contains("<a:t>Slide 1</a:t>"));
        assert!(xml.contains("<a:t>R&amp;D &lt;draft&gt;</a:t>"));
        assert!(xml.contains("sz=\"1800\" b=\"1\""));
        assert!(xml.contains("sz=\"1200\" b=\"0\""));
        assert!(xml.contains("<a:srgbClr val=\"363636\"/>"));
        assert!(!xml.contains("<p:bg>"));
    }

    #[test]
    fn test_notes_slide_paragraphs() {
        let xml = notes_slide("First point\n\nSecond point");
        assert!(xml.contains("<a:t>First point</a:t>"));
        assert!(xml.contains("<a:t>Second point</a:t>"));
        assert_eq!(xml.matches("<a:p>").count(), 3);
        assert!(xml.contains("<p:ph type=\"body\" idx=\"1\"/>"));
    }

    #[test]
    fn test_slide_relationships() {
        let with_image = slide_relationships(2, Some("image2.jpeg"));
        assert!(with_image.contains("Target=\"../notesSlides/notesSlide2.xml\""));
        assert!(with_image.contains("Target=\"../media/image2.jpeg\""));

        let text_only = slide_relationships(1, None);
        assert!(!text_only.contains("media"));
    }

    #[test]
    fn test_xml_safe_strips_control_characters() {
        assert_eq!(xml_safe("tab\there\u{0B}\u{0}!"), "tab\there!");
        assert_eq!(xml_safe("line\r\nbreak"), "line\r\nbreak");
    }

    #[test]
    fn test_theme_is_named() {
        let xml = theme("Notes Theme");
        assert!(xml.contains("name=\"Notes Theme\""));
        assert_eq!(xml.matches("<a:effectStyle>").count(), 3);
    }
}
