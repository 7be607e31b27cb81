//! Vertical scrollbar.

use flightdeck_core::geometry::Rect;
use flightdeck_render::cell::Cell;
use flightdeck_render::frame::Frame;
use flightdeck_render::style::Style;

use crate::StatefulWidget;

/// Position of a scrollbar within its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollbarState {
    /// Total number of items.
    pub total: usize,
    /// Index of the first visible item.
    pub position: usize,
    /// Number of visible items.
    pub viewport: usize,
}

impl ScrollbarState {
    /// Create a state snapshot for this frame.
    #[must_use]
    pub const fn new(total: usize, position: usize, viewport: usize) -> Self {
        Self {
            total,
            position,
            viewport,
        }
    }

    /// True when everything fits and no bar is needed.
    #[must_use]
    pub const fn content_fits(&self) -> bool {
        self.total <= self.viewport
    }
}

/// A vertical track/thumb scrollbar one column wide.
#[derive(Debug, Clone)]
pub struct Scrollbar {
    track_style: Style,
    thumb_style: Style,
}

impl Default for Scrollbar {
    fn default() -> Self {
        Self::new()
    }
}

impl Scrollbar {
    /// A scrollbar with default styles.
    #[must_use]
    pub fn new() -> Self {
        Self {
            track_style: Style::new().dim(),
            thumb_style: Style::new(),
        }
    }

    /// Style of the track glyphs.
    #[must_use]
    pub fn track_style(mut self, style: Style) -> Self {
        self.track_style = style;
        self
    }

    /// Style of the thumb glyphs.
    #[must_use]
    pub fn thumb_style(mut self, style: Style) -> Self {
        self.thumb_style = style;
        self
    }
}

impl StatefulWidget for Scrollbar {
    type State = ScrollbarState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut ScrollbarState) {
        if area.is_empty() || state.content_fits() {
            return;
        }
        let track = area.height as usize;
        // Thumb length proportional to visible share, at least one cell.
        let thumb_len = ((state.viewport * track) / state.total).max(1).min(track);
        let scrollable = state.total - state.viewport;
        let max_thumb_top = track - thumb_len;
        let thumb_top = if scrollable == 0 {
            0
        } else {
            (state.position.min(scrollable) * max_thumb_top + scrollable / 2) / scrollable
        };

        let x = area.x;
        for row in 0..track {
            let y = area.y + row as u16;
            let in_thumb = row >= thumb_top && row < thumb_top + thumb_len;
            let cell = if in_thumb {
                Cell::styled('█', self.thumb_style)
            } else {
                Cell::styled('░', self.track_style)
            };
            frame.buffer.set(x, y, cell);
        }
    }
}
