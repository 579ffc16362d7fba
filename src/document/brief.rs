//! Layout of the brand strategy brief

use super::surface::{BriefSurface, FontWeight, Rgb};
use crate::submission::Snapshot;
use serde::{Deserialize, Serialize};

const HEADER_FILL: Rgb = Rgb(30, 30, 30);
const HEADER_TEXT: Rgb = Rgb(255, 255, 255);
const BODY_TEXT: Rgb = Rgb(30, 30, 30);
const FOOTER_TEXT: Rgb = Rgb(150, 150, 150);
const ACCENT: Rgb = Rgb(243, 169, 59);

const PAGE_WIDTH: f32 = 210.0;
const HEADER_HEIGHT: f32 = 40.0;
const MARGIN: f32 = 20.0;
const CONTENT_WIDTH: f32 = 170.0;
const CONTENT_START: f32 = 75.0;
/// Cursor position after a page break
const TOP_MARGIN: f32 = 30.0;
/// Break before a section title past this point
const SECTION_BREAK: f32 = 250.0;
/// Break before an item or body line past this point
const LINE_BREAK: f32 = 275.0;
const FOOTER_Y: f32 = 285.0;
/// Values longer than this get their own wrapped block
const INLINE_LIMIT: usize = 60;
const BODY_LINE_HEIGHT: f32 = 5.0;

pub const MISSING_VALUE: &str = "No data provided";
pub const DEFAULT_STUDIO: &str = "Polaroid Dosa";

/// A labelled snapshot value inside a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefItem {
    pub label: String,
    pub key: String,
}

/// A titled group of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefSection {
    pub title: String,
    pub items: Vec<BriefItem>,
}

impl BriefSection {
    pub fn new(title: &str, items: &[(&str, &str)]) -> Self {
        Self {
            title: title.to_string(),
            items: items
                .iter()
                .map(|(label, key)| BriefItem {
                    label: label.to_string(),
                    key: key.to_string(),
                })
                .collect(),
        }
    }
}

/// Section list of the brand strategy brief
pub fn default_sections() -> Vec<BriefSection> {
    vec![
        BriefSection::new(
            "Core Basics",
            &[
                ("Description", "platform_description"),
                ("Current Stage", "stage"),
            ],
        ),
        BriefSection::new(
            "Target Audience",
            &[("User Groups", "usage_group"), ("Age Group", "age_group")],
        ),
        BriefSection::new(
            "Brand Personality",
            &[
                ("Personality Traits", "personality"),
                ("Friendly (1) vs Professional (5)", "casual_vs_pro"),
                ("Fun (1) vs Serious (5)", "playful_vs_serious"),
                ("Bold (1) vs Calm (5)", "bold_vs_calm"),
                ("Minimal (1) vs Detailed (5)", "minimal_vs_detailed"),
                ("Young (1) vs Mature (5)", "young_vs_mature"),
            ],
        ),
        BriefSection::new("Brand Voice & Tone", &[("Tone to Avoid", "avoid_tone")]),
        BriefSection::new(
            "Look & Feel",
            &[
                ("Visual Mood", "mood"),
                ("Color Preferences", "color_preferences"),
                ("Inspirations", "brand_inspiration"),
            ],
        ),
        BriefSection::new(
            "User Experience",
            &[("Desired User Feelings", "feelings")],
        ),
        BriefSection::new(
            "Brand Essence",
            &[("The 'X for Y' Statement", "brand_essence")],
        ),
        BriefSection::new("Other Details", &[("Additional Info", "additional_info")]),
    ]
}

/// File name for a snapshot's brief, derived from the platform name
pub fn brief_file_name(snapshot: &Snapshot) -> String {
    let base: String = snapshot
        .non_empty("platform_name")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or("Brand")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{base}_Strategy_Brief.pdf")
}

/// Lays the brief out onto a surface, tracking the vertical cursor
struct BriefWriter<'a, S: BriefSurface + ?Sized> {
    surface: &'a mut S,
    y: f32,
}

impl<S: BriefSurface + ?Sized> BriefWriter<'_, S> {
    /// Start a new page when the cursor is past `threshold`
    fn break_after(&mut self, threshold: f32) {
        if self.y > threshold {
            self.surface.add_page();
            self.y = TOP_MARGIN;
        }
    }

    fn header(&mut self, studio: &str, platform: &str) {
        let s = &mut *self.surface;
        s.set_fill_color(HEADER_FILL);
        s.fill_rect(0.0, 0.0, PAGE_WIDTH, HEADER_HEIGHT);

        s.set_text_color(HEADER_TEXT);
        s.set_font(FontWeight::Bold);
        s.set_font_size(22.0);
        s.text(MARGIN, 25.0, "BRAND STRATEGY BRIEF");

        s.set_font_size(10.0);
        s.text(150.0, 25.0, &format!("Generated by {studio}"));

        s.set_text_color(BODY_TEXT);
        s.set_font_size(16.0);
        s.text(MARGIN, 55.0, &format!("Platform: {platform}"));

        s.set_draw_color(ACCENT);
        s.set_line_width(1.0);
        s.line(MARGIN, 60.0, PAGE_WIDTH - MARGIN, 60.0);

        self.y = CONTENT_START;
    }

    fn section(&mut self, section: &BriefSection, snapshot: &Snapshot) {
        self.break_after(SECTION_BREAK);
        self.surface.set_font(FontWeight::Bold);
        self.surface.set_font_size(13.0);
        self.surface.set_text_color(ACCENT);
        self.surface
            .text(MARGIN, self.y, &section.title.to_uppercase());
        self.y += 10.0;

        for item in &section.items {
            let value = snapshot.non_empty(&item.key).unwrap_or(MISSING_VALUE);
            self.item(&item.label, value);
        }

        self.y += 5.0;
    }

    fn item(&mut self, label: &str, value: &str) {
        let label = format!("{label}: ");
        self.surface.set_font(FontWeight::Bold);
        self.surface.set_font_size(10.0);
        self.surface.set_text_color(BODY_TEXT);
        let label_width = self.surface.text_width(&label);

        self.break_after(LINE_BREAK);

        if value.chars().count() > INLINE_LIMIT {
            self.surface.text(MARGIN, self.y, &label);
            self.y += 6.0;
            self.surface.set_font(FontWeight::Normal);
            let lines = self.surface.split_text(value, CONTENT_WIDTH);
            for line in &lines {
                self.break_after(LINE_BREAK);
                self.surface.text(MARGIN, self.y, line);
                self.y += BODY_LINE_HEIGHT;
            }
            self.y += 10.0;
        } else {
            self.surface.text(MARGIN, self.y, &label);
            self.surface.set_font(FontWeight::Normal);
            self.surface.text(MARGIN + label_width, self.y, value);
            self.y += 10.0;
        }
    }

    fn footer(&mut self, studio: &str, year: i32) {
        self.surface.set_font_size(8.0);
        self.surface.set_text_color(FOOTER_TEXT);
        self.surface.text(
            MARGIN,
            FOOTER_Y,
            &format!("© {year} {studio} | Private & Confidential"),
        );
    }
}

/// Draw the full brief for `snapshot` onto `surface`
pub fn render_brief<S: BriefSurface + ?Sized>(
    surface: &mut S,
    snapshot: &Snapshot,
    sections: &[BriefSection],
    studio: &str,
    year: i32,
) {
    let platform = snapshot.non_empty("platform_name").unwrap_or("N/A");
    let mut writer = BriefWriter { surface, y: 0.0 };

    writer.header(studio, platform);
    for section in sections {
        writer.section(section, snapshot);
    }
    writer.footer(studio, year);
}
