//! Completion screen shown after submission

use super::components::{render_shortcut_button, BUTTON_HEIGHT};
use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(6),
            Constraint::Length(BUTTON_HEIGHT),
            Constraint::Min(0),
        ])
        .split(inner);

    let platform = app
        .state
        .snapshot
        .as_ref()
        .and_then(|s| s.non_empty("platform_name"))
        .unwrap_or("your platform");

    let text = vec![
        Line::from(Span::styled(
            "Strategy captured!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Thanks for sharing the story behind {platform}.")),
        Line::from("Download your brand strategy brief as a PDF."),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[1],
    );

    let button_width = 26.min(inner.width);
    let button_area = Rect {
        x: inner.x + (inner.width - button_width) / 2,
        width: button_width,
        ..chunks[2]
    };
    render_shortcut_button(frame, button_area, "d", "Download Brief", true, true);
}
