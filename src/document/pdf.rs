//! PDF backend for the brief, built on printpdf

use super::surface::{estimate_text_width, BriefSurface, FontWeight, Rgb, PT_TO_MM};
use super::BriefError;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rect,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// A4 portrait, in millimetres
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

const LAYER_NAME: &str = "Content";

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        color.0 as f32 / 255.0,
        color.1 as f32 / 255.0,
        color.2 as f32 / 255.0,
        None,
    ))
}

/// PDF pages use a bottom-left origin
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT - y)
}

pub struct PdfSurface {
    /// Taken on save; later draw calls are dropped
    doc: Option<PdfDocumentReference>,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    weight: FontWeight,
    font_size: f32,
    fill: Rgb,
    draw: Rgb,
    text_color: Rgb,
    line_width: f32,
}

impl PdfSurface {
    pub fn new(title: &str) -> Result<Self, BriefError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| BriefError::Pdf(format!("{e:?}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| BriefError::Pdf(format!("{e:?}")))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc: Some(doc),
            layer,
            regular,
            bold,
            weight: FontWeight::Normal,
            font_size: 16.0,
            fill: Rgb(0, 0, 0),
            draw: Rgb(0, 0, 0),
            text_color: Rgb(0, 0, 0),
            line_width: 0.2,
        })
    }

    fn font(&self) -> &IndirectFontRef {
        match self.weight {
            FontWeight::Normal => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

impl BriefSurface for PdfSurface {
    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_draw_color(&mut self, color: Rgb) {
        self.draw = color;
    }

    fn set_text_color(&mut self, color: Rgb) {
        self.text_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn set_font(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.layer.set_fill_color(pdf_color(self.fill));
        let rect = Rect::new(Mm(x), flip(y + height), Mm(x + width), flip(y))
            .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.layer.set_outline_color(pdf_color(self.draw));
        // printpdf takes thickness in points
        self.layer.set_outline_thickness(self.line_width / PT_TO_MM);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), flip(y1)), false),
                (Point::new(Mm(x2), flip(y2)), false),
            ],
            is_closed: false,
        });
    }

    fn text(&mut self, x: f32, y: f32, text: &str) {
        // Text is painted with the fill color
        self.layer.set_fill_color(pdf_color(self.text_color));
        let font = self.font().clone();
        self.layer.use_text(text, self.font_size, Mm(x), flip(y), &font);
    }

    fn add_page(&mut self) {
        if let Some(doc) = &self.doc {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
            self.layer = doc.get_page(page).get_layer(layer);
        }
    }

    fn save(&mut self, path: &Path) -> Result<(), BriefError> {
        let doc = self.doc.take().ok_or(BriefError::AlreadySaved)?;
        let mut writer = BufWriter::new(File::create(path)?);
        doc.save(&mut writer)
            .map_err(|e| BriefError::Pdf(format!("{e:?}")))?;
        Ok(())
    }

    fn text_width(&self, text: &str) -> f32 {
        estimate_text_width(text, self.font_size, self.weight)
    }
}
