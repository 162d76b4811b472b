//! Profile screen
//!
//! Avatar initials and account line on top, then one row per form field and
//! the Save button. The terminal cursor is placed in the focused input.

use miniapp_app::{App, FormField};
use miniapp_core::{MAX_TAGS, ProfileRecord};
use ratatui::{
    Frame,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Width of the focus marker column.
const MARKER_WIDTH: usize = 2;

/// Width of the label column.
const LABEL_WIDTH: usize = 12;

/// Line index of the first form row inside the block.
pub const FORM_TOP: usize = 3;

/// Render the profile screen.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Profile ");
    let inner = block.inner(area);

    frame.render_widget(Paragraph::new(lines(app)).block(block), area);

    if let Some(position) = cursor(app, inner) {
        frame.set_cursor_position(position);
    }
}

/// Profile screen content.
pub fn lines(app: &App) -> Vec<Line<'static>> {
    let record = app.form().to_record();

    let mut lines = header(app, &record);
    lines.push(Line::default());
    lines.extend(FormField::ALL.into_iter().map(|field| row(app, field)));
    lines
}

fn header(app: &App, record: &ProfileRecord) -> Vec<Line<'static>> {
    let name = [record.first_name.as_str(), record.last_name.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let name = if name.is_empty() { "Your name".to_string() } else { name };

    let avatar = Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD);
    let title = Line::from(vec![
        Span::styled(format!(" {} ", record.initials()), avatar),
        Span::raw(" "),
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
    ]);

    let account = match app.user() {
        Some(user) => {
            let mut text = format!("ID {}", user.id);
            if let Some(username) = &user.username {
                text.push_str(&format!(" @{username}"));
            }
            text
        },
        None => "Guest profile".to_string(),
    };

    vec![title, Line::styled(account, Style::default().fg(Color::DarkGray))]
}

fn row(app: &App, field: FormField) -> Line<'static> {
    let form = app.form();
    let focused = form.focus() == field;
    let marker = if focused { "> " } else { "  " };
    let dim = Style::default().fg(Color::DarkGray);

    if field == FormField::Save {
        let button = if app.is_saved() {
            Span::styled("[ ✓ Saved! ]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else if focused {
            Span::styled("[ Save ]", Style::default().add_modifier(Modifier::REVERSED))
        } else {
            Span::styled("[ Save ]", Style::default().add_modifier(Modifier::BOLD))
        };
        return Line::from(vec![Span::raw(marker), button]);
    }

    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let mut spans = vec![
        Span::raw(marker),
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
    ];

    let tags = form.tags(field);
    for tag in tags.into_iter().flat_map(|tags| tags.iter()) {
        spans.push(Span::styled(format!("[{tag}]"), Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" "));
    }

    match form.input(field) {
        Some(input) if !input.is_empty() => spans.push(Span::raw(input.as_str().to_string())),
        _ if tags.is_some_and(|tags| !tags.is_empty()) => {},
        _ => spans.push(Span::styled(field.placeholder(), dim)),
    }

    if let Some(tags) = tags {
        spans.push(Span::styled(format!(" {}/{MAX_TAGS}", tags.len()), dim));
    }

    Line::from(spans)
}

/// Cursor position inside the focused input, if it is visible.
fn cursor(app: &App, inner: Rect) -> Option<Position> {
    let form = app.form();
    let field = form.focus();
    let input = form.input(field)?;

    let row = FORM_TOP + FormField::ALL.iter().position(|f| *f == field)?;
    let tags_width: usize = form
        .tags(field)
        .map_or(0, |tags| tags.iter().map(|tag| tag.chars().count() + 3).sum());
    let col = MARKER_WIDTH + LABEL_WIDTH + tags_width + input.cursor();

    let (row, col) = (u16::try_from(row).ok()?, u16::try_from(col).ok()?);
    (row < inner.height && col < inner.width).then(|| Position::new(inner.x + col, inner.y + row))
}
