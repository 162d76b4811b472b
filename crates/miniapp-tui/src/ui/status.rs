//! Status bar
//!
//! Displays the latest status message, or key hints for the current screen,
//! followed by the host mode and storage identity.

use miniapp_app::{App, Screen};
use miniapp_core::storage_key;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Render the status bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let message = match app.status_message() {
        Some(message) if message.starts_with("Error") => {
            Span::styled(message.to_string(), Style::default().fg(Color::Red))
        },
        Some(message) => Span::styled(
            message.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        None => Span::raw(hint(app.screen())),
    };

    let mode = if app.host_available() { "host" } else { "dev mode" };
    let context = format!(" | {mode} | {}", storage_key(&app.user_key()));

    let status_line = Line::from(vec![
        Span::raw(" "),
        message,
        Span::styled(context, Style::default().fg(Color::Gray)),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "Home",
        Screen::Profile => "Tab move  Enter add/next  Ctrl-S save  Esc back",
    }
}
