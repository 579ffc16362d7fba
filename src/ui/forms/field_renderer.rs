//! Field rendering utilities for forms

use crate::state::{FieldValue, FormField, SCALE_MAX, SCALE_MIN};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows used by a multiline text box, borders included
const MULTILINE_HEIGHT: u16 = 6;

/// Rows needed to draw `field` at the given outer width
pub fn field_height(field: &FormField, width: u16) -> u16 {
    match &field.value {
        FieldValue::Text(_) if field.is_multiline => MULTILINE_HEIGHT,
        FieldValue::Text(_) | FieldValue::Scale(_) => 3,
        FieldValue::Choice { options, .. } | FieldValue::MultiSelect { options, .. } => {
            let inner = width.saturating_sub(2).max(1) as usize;
            let used: usize = options.iter().map(|o| o.chars().count() + 6).sum();
            2 + used.div_ceil(inner).max(1) as u16
        }
    }
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };

    let content = match &field.value {
        FieldValue::Text(_) => text_content(field.as_text(), field.is_multiline, is_active),
        FieldValue::Choice { options, selected } => {
            let marks = options
                .iter()
                .enumerate()
                .map(|(i, o)| (o.as_str(), *selected == Some(i)));
            option_content(marks, "(•)", "( )", field.cursor, is_active)
        }
        FieldValue::MultiSelect { options, checked } => {
            let marks = options.iter().zip(checked).map(|(o, c)| (o.as_str(), *c));
            option_content(marks, "[x]", "[ ]", field.cursor, is_active)
        }
        FieldValue::Scale(value) => scale_content(*value, field.cursor, is_active),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn text_content(text: &str, is_multiline: bool, is_active: bool) -> Paragraph<'static> {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_str = if text.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        text.to_string()
    };

    let cursor = if is_active { "▌" } else { "" };

    if is_multiline {
        let mut lines: Vec<Line> = display_str
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_str, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    }
}

/// Render options as chips, marking selection and highlighting the cursor
fn option_content<'a>(
    options: impl Iterator<Item = (&'a str, bool)>,
    on: &'static str,
    off: &'static str,
    cursor: usize,
    is_active: bool,
) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (idx, (label, marked)) in options.enumerate() {
        let mut style = if marked {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        if is_active && idx == cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(
            format!("{} {label}", if marked { on } else { off }),
            style,
        ));
        spans.push(Span::raw("  "));
    }
    Paragraph::new(Line::from(spans))
}

fn scale_content(value: Option<u8>, cursor: usize, is_active: bool) -> Paragraph<'static> {
    let mut spans = Vec::new();
    for (idx, n) in (SCALE_MIN..=SCALE_MAX).enumerate() {
        let mut style = if value == Some(n) {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if is_active && idx == cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {n} "), style));
        spans.push(Span::raw(" "));
    }
    if value.is_none() {
        spans.push(Span::styled(
            "(not rated)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Paragraph::new(Line::from(spans))
}
