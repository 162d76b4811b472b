//! Home screen
//!
//! Identity glance plus whatever launch data is available: the decoded
//! session token, the host's environment details, or placeholder data when
//! running standalone.

use miniapp_app::{App, HomeView};
use miniapp_core::SessionUser;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Render the home screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Mini App ");
    let paragraph = Paragraph::new(lines(app)).block(block).wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Home screen content.
pub fn lines(app: &App) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = vec![identity(app.user()), Line::default()];

    let view = app.home();
    match view {
        HomeView::Pending => lines.push(Line::styled("Loading...", dim)),
        HomeView::Session { raw, .. } => {
            lines.push(heading("Launch data"));
            lines.push(Line::from(vec![Span::styled("initData ", label), Span::raw(raw.clone())]));
            lines.push(Line::default());
            lines.push(heading("Fields"));
        },
        HomeView::HostInfo { .. } => lines.push(heading("Host environment")),
        HomeView::Simulated { .. } => lines.push(heading("Simulated data")),
    }

    for (key, value) in view.fields() {
        lines.push(Line::from(vec![
            Span::styled(format!("{key}: "), label),
            Span::raw(value.clone()),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::styled("p/Enter profile  q/Esc quit", dim));
    lines
}

fn identity(user: Option<&SessionUser>) -> Line<'static> {
    let Some(user) = user else {
        return Line::from("Guest (no session)");
    };

    let mut spans = vec![
        Span::raw("Signed in as "),
        Span::styled(display_name(user), Style::default().add_modifier(Modifier::BOLD)),
    ];
    if let Some(username) = &user.username {
        spans.push(Span::raw(format!(" (@{username})")));
    }
    spans.push(Span::raw(format!(" - ID {}", user.id)));
    Line::from(spans)
}

/// First and last name, or the numeric id when both are missing.
pub fn display_name(user: &SessionUser) -> String {
    let name = [user.first_name.as_deref(), user.last_name.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() { format!("user {}", user.id) } else { name }
}

fn heading(text: &'static str) -> Line<'static> {
    Line::styled(text, Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
}
