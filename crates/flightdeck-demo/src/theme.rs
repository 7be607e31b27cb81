//! Shared styles for the demo chrome and rows.

use flightdeck_render::style::{Color, Style};

/// Title segment of the tab bar.
#[must_use]
pub fn title() -> Style {
    Style::new().fg(Color::Cyan).bold()
}

/// Inactive strategy tab.
#[must_use]
pub fn tab() -> Style {
    Style::new().fg(Color::Gray)
}

/// Active strategy tab.
#[must_use]
pub fn tab_active() -> Style {
    Style::new().fg(Color::Black).bg(Color::Cyan).bold()
}

/// Ordinary flight row.
#[must_use]
pub fn row() -> Style {
    Style::new()
}

/// Selected flight row.
#[must_use]
pub fn row_selected() -> Style {
    Style::new().reversed()
}

/// Secondary text (indices, ids, hints).
#[must_use]
pub fn muted() -> Style {
    Style::new().fg(Color::DarkGray)
}

/// Status bar.
#[must_use]
pub fn status() -> Style {
    Style::new().fg(Color::Gray).bg(Color::Black)
}

/// In-flight load indicator.
#[must_use]
pub fn loading() -> Style {
    Style::new().fg(Color::Yellow).bold()
}

/// Table header row.
#[must_use]
pub fn table_header() -> Style {
    Style::new().fg(Color::Cyan).bold()
}
