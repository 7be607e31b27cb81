//! Bordered container with an optional title.

use bitflags::bitflags;
use flightdeck_core::geometry::Rect;
use flightdeck_render::cell::Cell;
use flightdeck_render::frame::Frame;
use flightdeck_render::style::Style;

use crate::Widget;

bitflags! {
    /// Which edges of a [`Block`] get a border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Borders: u8 {
        /// Top edge.
        const TOP = 0b0001;
        /// Bottom edge.
        const BOTTOM = 0b0010;
        /// Left edge.
        const LEFT = 0b0100;
        /// Right edge.
        const RIGHT = 0b1000;
        /// All four edges.
        const ALL = Self::TOP.bits() | Self::BOTTOM.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// A box drawn around content, light box-drawing glyphs only.
#[derive(Debug, Clone, Default)]
pub struct Block {
    title: Option<String>,
    borders: Borders,
    style: Style,
}

impl Default for Borders {
    fn default() -> Self {
        Self::empty()
    }
}

impl Block {
    /// An empty block with no borders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border edges.
    #[must_use]
    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    /// Set the title, drawn in the top border.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the border/title style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The content area remaining inside the borders.
    #[must_use]
    pub fn inner(&self, area: Rect) -> Rect {
        let mut inner = area;
        if self.borders.contains(Borders::LEFT) {
            inner.x = inner.x.saturating_add(1);
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::RIGHT) {
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::TOP) {
            inner.y = inner.y.saturating_add(1);
            inner.height = inner.height.saturating_sub(1);
        }
        if self.borders.contains(Borders::BOTTOM) {
            inner.height = inner.height.saturating_sub(1);
        }
        inner
    }
}

impl Widget for Block {
    fn render(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let buf = &mut frame.buffer;
        let right = area.right().saturating_sub(1);
        let bottom = area.bottom().saturating_sub(1);

        if self.borders.contains(Borders::TOP) {
            for x in area.x..=right {
                buf.set(x, area.y, Cell::styled('─', self.style));
            }
        }
        if self.borders.contains(Borders::BOTTOM) {
            for x in area.x..=right {
                buf.set(x, bottom, Cell::styled('─', self.style));
            }
        }
        if self.borders.contains(Borders::LEFT) {
            for y in area.y..=bottom {
                buf.set(area.x, y, Cell::styled('│', self.style));
            }
        }
        if self.borders.contains(Borders::RIGHT) {
            for y in area.y..=bottom {
                buf.set(right, y, Cell::styled('│', self.style));
            }
        }
        if self.borders.contains(Borders::TOP | Borders::LEFT) {
            buf.set(area.x, area.y, Cell::styled('┌', self.style));
        }
        if self.borders.contains(Borders::TOP | Borders::RIGHT) {
            buf.set(right, area.y, Cell::styled('┐', self.style));
        }
        if self.borders.contains(Borders::BOTTOM | Borders::LEFT) {
            buf.set(area.x, bottom, Cell::styled('└', self.style));
        }
        if self.borders.contains(Borders::BOTTOM | Borders::RIGHT) {
            buf.set(right, bottom, Cell::styled('┘', self.style));
        }

        if let Some(title) = &self.title {
            if self.borders.contains(Borders::TOP) && area.width > 4 {
                let label = format!(" {title} ");
                buf.set_string(area.x + 1, area.y, &label, self.style);
            }
        }
    }
}
