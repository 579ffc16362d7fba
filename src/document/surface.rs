//! Drawing surface the brief is laid out on

use super::BriefError;
use std::path::Path;

/// Millimetres per typographic point
pub const PT_TO_MM: f32 = 0.352_778;

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Rendering backend for the brief.
///
/// Coordinates are millimetres from the top-left corner of the current page.
/// Layout decisions (margins, thresholds, order) belong to the caller.
pub trait BriefSurface {
    fn set_fill_color(&mut self, color: Rgb);
    fn set_draw_color(&mut self, color: Rgb);
    fn set_text_color(&mut self, color: Rgb);
    fn set_line_width(&mut self, width: f32);
    fn set_font(&mut self, weight: FontWeight);
    fn set_font_size(&mut self, size: f32);

    /// Filled rectangle in the current fill color
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Straight line in the current draw color and width
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    /// Single line of text with its baseline at `y`
    fn text(&mut self, x: f32, y: f32, text: &str);
    fn add_page(&mut self);
    fn save(&mut self, path: &Path) -> Result<(), BriefError>;

    /// Width of `text` in the current font, in millimetres
    fn text_width(&self, text: &str) -> f32;

    /// Word-wrap `text` so that every line fits `max_width` millimetres
    fn split_text(&self, text: &str, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current_line = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if current_line.is_empty() {
                    word.to_string()
                } else {
                    format!("{current_line} {word}")
                };

                if self.text_width(&candidate) <= max_width {
                    current_line = candidate;
                    continue;
                }

                if !current_line.is_empty() {
                    lines.push(std::mem::take(&mut current_line));
                }

                // A single word wider than the line is broken by characters
                for c in word.chars() {
                    current_line.push(c);
                    if self.text_width(&current_line) > max_width && current_line.chars().count() > 1
                    {
                        current_line.pop();
                        lines.push(std::mem::take(&mut current_line));
                        current_line.push(c);
                    }
                }
            }
            lines.push(current_line);
        }

        lines
    }
}

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em (WinAnsi)
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 32..=126, in 1/1000 em (WinAnsi)
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for glyphs outside the tables
const FALLBACK_WIDTH: u16 = 556;

/// Advance width of one glyph in 1/1000 em
fn glyph_width(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Normal => &HELVETICA_WIDTHS,
        FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    match c {
        ' '..='~' => table[c as usize - ' ' as usize],
        '©' => 737,
        '•' => 350,
        '–' => 556,
        '—' | '…' => 1000,
        _ => FALLBACK_WIDTH,
    }
}

/// Advance width of Helvetica text, in millimetres.
///
/// Built-in PDF fonts carry no metrics we can query, so the standard AFM
/// widths are tabled here.
pub fn estimate_text_width(text: &str, font_size: f32, weight: FontWeight) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c, weight))).sum();
    units as f32 / 1000.0 * font_size * PT_TO_MM
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that only measures, one millimetre per character
    struct Monospace;

    impl BriefSurface for Monospace {
        fn set_fill_color(&mut self, _: Rgb) {}
        fn set_draw_color(&mut self, _: Rgb) {}
        fn set_text_color(&mut self, _: Rgb) {}
        fn set_line_width(&mut self, _: f32) {}
        fn set_font(&mut self, _: FontWeight) {}
        fn set_font_size(&mut self, _: f32) {}
        fn fill_rect(&mut self, _: f32, _: f32, _: f32, _: f32) {}
        fn line(&mut self, _: f32, _: f32, _: f32, _: f32) {}
        fn text(&mut self, _: f32, _: f32, _: &str) {}
        fn add_page(&mut self) {}
        fn save(&mut self, _: &Path) -> Result<(), BriefError> {
            Ok(())
        }
        fn text_width(&self, text: &str) -> f32 {
            text.chars().count() as f32
        }
    }

    #[test]
    fn test_split_keeps_short_text_on_one_line() {
        assert_eq!(Monospace.split_text("hello world", 20.0), vec!["hello world"]);
    }

    #[test]
    fn test_split_wraps_on_words() {
        assert_eq!(
            Monospace.split_text("aaa bbb ccc", 7.0),
            vec!["aaa bbb", "ccc"]
        );
    }

    #[test]
    fn test_split_breaks_long_words() {
        assert_eq!(Monospace.split_text("abcdefgh", 3.0), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_split_preserves_paragraphs() {
        assert_eq!(Monospace.split_text("a\n\nb", 10.0), vec!["a", "", "b"]);
    }

    #[test]
    fn test_widths_follow_glyph_metrics() {
        let narrow = estimate_text_width("iiii", 10.0, FontWeight::Normal);
        let wide = estimate_text_width("WWWW", 10.0, FontWeight::Normal);
        assert!(wide > narrow * 4.0);
    }

    #[test]
    fn test_widths_match_afm_values() {
        assert_eq!(glyph_width('W', FontWeight::Normal), 944);
        assert_eq!(glyph_width('i', FontWeight::Normal), 222);
        assert_eq!(glyph_width(' ', FontWeight::Normal), 278);
        assert_eq!(glyph_width('~', FontWeight::Normal), 584);
        assert_eq!(glyph_width('W', FontWeight::Bold), 944);
        assert_eq!(glyph_width('i', FontWeight::Bold), 278);
        assert_eq!(glyph_width('@', FontWeight::Bold), 975);
        assert_eq!(glyph_width('é', FontWeight::Normal), FALLBACK_WIDTH);
    }

    #[test]
    fn test_width_scales_with_font_size() {
        // 1000 units at 10pt is exactly 10pt
        let width = estimate_text_width("—", 10.0, FontWeight::Normal);
        assert!((width - 10.0 * PT_TO_MM).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider() {
        let normal = estimate_text_width("Label: ", 10.0, FontWeight::Normal);
        let bold = estimate_text_width("Label: ", 10.0, FontWeight::Bold);
        assert!(bold > normal);
        assert!(normal > 0.0);
    }
}
