use crate::core::geometry::ScreenSize;

/// Text measurement collaborator.
///
/// The label layout algorithms only ever need the bounding box of a piece of
/// text at a font size; hosts plug in their platform's text stack here.
pub trait TextMeasurer {
    fn text_size(&self, text: &str, font_size_px: f64) -> ScreenSize;
}

/// Deterministic measurer for headless use and tests.
///
/// Approximates every glyph at a fixed fraction of the font size, which keeps
/// layout reproducible without a font backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGlyphMeasurer {
    pub glyph_width_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for UniformGlyphMeasurer {
    fn default() -> Self {
        Self {
            glyph_width_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl TextMeasurer for UniformGlyphMeasurer {
    fn text_size(&self, text: &str, font_size_px: f64) -> ScreenSize {
        let glyphs = text.chars().count() as f64;
        ScreenSize::new(
            glyphs * font_size_px * self.glyph_width_ratio,
            font_size_px * self.line_height_ratio,
        )
    }
}
