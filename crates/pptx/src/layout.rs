//! Geometry and styling for generated slides.
//!
//! All positions are in EMU (English Metric Units, 914400 per inch).

/// EMU per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Convert inches to EMU.
pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

/// A positioned text box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBox {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
    /// Font size in hundredths of a point.
    pub size: u32,
    pub bold: bool,
}

/// Layout of the generated deck.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckLayout {
    /// Slide width in EMU.
    pub width: i64,
    /// Slide height in EMU.
    pub height: i64,
    /// Heading box for text-only slides ("Slide N").
    pub heading: TextBox,
    /// Body box for text-only slides.
    pub body: TextBox,
    /// Text color as a six-digit hex RGB value.
    pub text_color: String,
}

impl DeckLayout {
    /// 16:9 widescreen layout, 13.333 in x 7.5 in.
    pub fn wide() -> Self {
        let width = 12_192_000;
        let height = 6_858_000;
        Self {
            width,
            height,
            heading: TextBox {
                x: inches(0.5),
                y: inches(0.25),
                cx: width * 9 / 10,
                cy: inches(0.6),
                size: 1800,
                bold: true,
            },
            body: TextBox {
                x: inches(0.5),
                y: inches(1.0),
                cx: width * 9 / 10,
                cy: height * 8 / 10,
                size: 1200,
                bold: false,
            },
            text_color: "363636".to_string(),
        }
    }
}

impl Default for DeckLayout {
    fn default() -> Self {
        Self::wide()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inches() {
        assert_eq!(inches(1.0), 914_400);
        assert_eq!(inches(0.5), 457_200);
        assert_eq!(inches(0.25), 228_600);
    }

    #[test]
    fn test_wide_layout() {
        let layout = DeckLayout::wide();
        assert_eq!(layout.width, 12_192_000);
        assert_eq!(layout.height, 6_858_000);
        assert_eq!(layout.heading.size, 1800);
        assert!(layout.heading.bold);
        assert_eq!(layout.body.y, inches(1.0));
        assert_eq!(layout.body.cx, 10_972_800);
        assert_eq!(layout.body.cy, 5_486_400);
        assert_eq!(layout.text_color, "363636");
    }
}
