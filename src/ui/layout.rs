//! Layout components (header, status bar)

use crate::app::App;
use crate::state::{AppState, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Header height: title row plus bordered progress gauge
pub const HEADER_HEIGHT: u16 = 4;

/// Split the screen into header, content and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Title + progress
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the title and the progress gauge
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(3)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Brand Discovery ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Shape the strategy behind your platform",
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(title, chunks[0]);

    let view = app.state.step_view();
    let (ratio, label) = match app.state.current_view() {
        View::Wizard => (
            view.progress_percent / 100.0,
            format!(
                "Step {} of {}  ({:.0}%)",
                view.visible_step, view.total_steps, view.progress_percent
            ),
        ),
        View::Completion => (1.0, "Complete".to_string()),
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Yellow).bg(Color::Black))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, chunks[1]);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    if let Some(warning) = &app.state.warning {
        spans.push(Span::styled(
            format!("⚠ {}", warning.message),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    } else if let Some(msg) = &app.state.status_message {
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    } else {
        spans.push(Span::styled(
            get_view_hints(&app.state),
            Style::default().fg(Color::Gray),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(quit_hint.len() as u16),
        y: area.y,
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(state: &AppState) -> String {
    match state.current_view() {
        View::Wizard if state.session.is_last_step() => {
            "Tab:field  ←/→:option  Space:select  ^P:back  ^S:submit".to_string()
        }
        View::Wizard => "Tab:field  ←/→:option  Space:select  ^P:back  ^N:next".to_string(),
        View::Completion => "d:download brief  q:quit".to_string(),
    }
}
