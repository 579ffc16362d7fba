//! Step rendering for the discovery wizard

use super::components::{render_shortcut_button, BUTTON_HEIGHT};
use super::forms::{draw_field, field_height};
use crate::app::App;
use crate::state::{ForwardControl, Step, StepView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

/// Draw the visible step with its navigation buttons
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.state.step_view();
    let Some(step) = app
        .state
        .form
        .steps()
        .iter()
        .find(|s| view.is_visible(s.ordinal))
    else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Step form
            Constraint::Length(BUTTON_HEIGHT), // Navigation
        ])
        .split(area);

    draw_step(frame, chunks[0], step);
    draw_navigation(frame, chunks[1], &view);
}

fn draw_step(frame: &mut Frame, area: Rect, step: &Step) {
    let block = Block::default()
        .title(Line::from(vec![Span::styled(
            format!(" {}. {} ", step.ordinal, step.title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let subtitle = Paragraph::new(step.subtitle.as_str()).style(Style::default().fg(Color::Gray));
    frame.render_widget(subtitle, chunks[0]);

    let fields_area = chunks[1];
    let heights: Vec<u16> = step
        .fields
        .iter()
        .map(|f| field_height(f, fields_area.width))
        .collect();
    let window = visible_window(&heights, step.active_field_index, fields_area.height);

    let mut y = fields_area.y;
    for idx in window {
        let height = heights[idx].min(fields_area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let rect = Rect {
            x: fields_area.x,
            y,
            width: fields_area.width,
            height,
        };
        draw_field(frame, rect, &step.fields[idx], idx == step.active_field_index);
        y += height;
    }
}

fn draw_navigation(frame: &mut Frame, area: Rect, view: &StepView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(14),
            Constraint::Min(0),
            Constraint::Length(28),
        ])
        .split(area);

    render_shortcut_button(frame, chunks[0], "^P", "Back", false, view.back_enabled);

    match view.forward {
        ForwardControl::Next => {
            render_shortcut_button(frame, chunks[2], "^N", "Next", true, true);
        }
        ForwardControl::Submit { busy: true } => {
            render_shortcut_button(frame, chunks[2], "…", "Capturing Strategy...", false, false);
        }
        ForwardControl::Submit { busy: false } => {
            render_shortcut_button(frame, chunks[2], "^S", "Submit", true, true);
        }
    }
}

/// Range of fields to draw so that the active one fits in `available` rows.
///
/// Starts from the first field and scrolls down only as far as needed.
pub fn visible_window(heights: &[u16], active: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);

    let mut start = 0;
    while start < active && heights[start..=active].iter().sum::<u16>() > available {
        start += 1;
    }

    let mut end = start;
    let mut used = 0u16;
    while end < heights.len() && (end <= active || used + heights[end] <= available) {
        used = used.saturating_add(heights[end]);
        end += 1;
    }

    start..end
}
