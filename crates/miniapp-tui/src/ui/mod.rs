//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.
//!
//! Safe-area insets arrive in CSS pixels and are mapped to whole terminal
//! cells, rounding up, before anything is laid out.

pub mod home;
pub mod profile;
mod status;

use miniapp_app::Screen;
use miniapp_core::SafeArea;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::App;

/// Pixels per terminal row. The minimum top inset maps to one row.
pub const PX_PER_ROW: f64 = 44.0;

/// Pixels per terminal column.
pub const PX_PER_COL: f64 = 16.0;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 1;
    const STATUS_HEIGHT: u16 = 1;

    let area = safe_rect(frame.area(), &app.safe_area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
        .split(area);

    let [main_area, status_area] = chunks.as_ref() else {
        return;
    };

    match app.screen() {
        Screen::Home => home::render(frame, app, *main_area),
        Screen::Profile => profile::render(frame, app, *main_area),
    }
    status::render(frame, app, *status_area);
}

/// Shrink `area` by the safe-area insets, keeping at least one cell.
pub fn safe_rect(area: Rect, safe: &SafeArea) -> Rect {
    let top = cells(safe.layout_top, PX_PER_ROW).min(area.height.saturating_sub(1));
    let bottom =
        cells(safe.insets.bottom, PX_PER_ROW).min(area.height.saturating_sub(top.saturating_add(1)));
    let left = cells(safe.insets.left, PX_PER_COL).min(area.width.saturating_sub(1));
    let right =
        cells(safe.insets.right, PX_PER_COL).min(area.width.saturating_sub(left.saturating_add(1)));

    Rect {
        x: area.x + left,
        y: area.y + top,
        width: area.width.saturating_sub(left + right),
        height: area.height.saturating_sub(top + bottom),
    }
}

fn cells(px: f64, px_per_cell: f64) -> u16 {
    if px.is_finite() && px > 0.0 {
        (px / px_per_cell).ceil().min(f64::from(u16::MAX)) as u16
    } else {
        0
    }
}
