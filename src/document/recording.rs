//! Surface that records draw calls, for layout tests

use super::surface::{estimate_text_width, BriefSurface, FontWeight, Rgb};
use super::BriefError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        page: usize,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    Line {
        page: usize,
        from: (f32, f32),
        to: (f32, f32),
        color: Rgb,
    },
    Text {
        page: usize,
        x: f32,
        y: f32,
        text: String,
        weight: FontWeight,
        size: f32,
        color: Rgb,
    },
    Saved(PathBuf),
}

#[derive(Debug)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
    page: usize,
    fill: Rgb,
    draw: Rgb,
    text_color: Rgb,
    weight: FontWeight,
    font_size: f32,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            page: 1,
            fill: Rgb(0, 0, 0),
            draw: Rgb(0, 0, 0),
            text_color: Rgb(0, 0, 0),
            weight: FontWeight::Normal,
            font_size: 16.0,
        }
    }
}

impl RecordingSurface {
    pub fn page_count(&self) -> usize {
        self.page
    }

    /// Text draws as `(page, y, text)` in call order
    pub fn texts(&self) -> Vec<(usize, f32, &str)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { page, y, text, .. } => Some((*page, *y, text.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn find_text(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text.contains(needle)))
    }
}

impl BriefSurface for RecordingSurface {
    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }
    fn set_draw_color(&mut self, color: Rgb) {
        self.draw = color;
    }
    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }
    fn set_line_width(&mut self, _width: f32) {}
    fn set_font(&mut self, weight: FontWeight) {
        self.weight = weight;
    }
    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::FillRect {
            page: self.page,
            x,
            y,
            width,
            height,
            color: self.fill,
        });
    }
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.ops.push(DrawOp::Line {
            page: self.page,
            from: (x1, y1),
            to: (x2, y2),
            color: self.draw,
        });
    }
    fn text(&mut self, x: f32, y: f32, text: &str) {
        self.ops.push(DrawOp::Text {
            page: self.page,
            x,
            y,
            text: text.to_string(),
            weight: self.weight,
            size: self.font_size,
            color: self.text_color,
        });
    }
    fn add_page(&mut self) {
        self.page += 1;
    }
    fn save(&mut self, path: &Path) -> Result<(), BriefError> {
        self.ops.push(DrawOp::Saved(path.to_path_buf()));
        Ok(())
    }
    fn text_width(&self, text: &str) -> f32 {
        estimate_text_width(text, self.font_size, self.weight)
    }
}
