//! Native virtualized list: one row per record, selection, scrollbar.
//!
//! No duplicate-load guard: whenever the last record is inside the window
//! the app re-requests the next page, pending or not.

use std::ops::Range;

use flightdeck_core::event::{KeyCode, KeyEvent, ScrollDirection};
use flightdeck_core::geometry::Rect;
use flightdeck_data::Flight;
use flightdeck_render::frame::Frame;
use flightdeck_widgets::{Scrollbar, ScrollbarState, StatefulWidget, VirtualizedListState};

use super::{route_label, Strategy, StrategyId};
use crate::theme;

/// The native list strategy.
#[derive(Debug, Default)]
pub struct ListStrategy {
    state: VirtualizedListState,
}

impl ListStrategy {
    /// A fresh, idle list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for ListStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::List
    }

    fn handle_key(&mut self, key: KeyEvent, total: usize) {
        match key.code {
            KeyCode::Up => self.state.select_previous(total),
            KeyCode::Down => self.state.select_next(total),
            KeyCode::PageUp => self.state.page_up(total),
            KeyCode::PageDown => self.state.page_down(total),
            KeyCode::Home => self.state.scroll_to_top(),
            _ => {}
        }
    }

    fn handle_scroll(&mut self, direction: ScrollDirection, total: usize) {
        match direction {
            ScrollDirection::Up => self.state.scroll(-3, total),
            ScrollDirection::Down => self.state.scroll(3, total),
        }
    }

    fn visible_range(&self, total: usize, viewport_height: u16) -> Range<usize> {
        self.state.visible_range(total, viewport_height)
    }

    fn near_end(&self, total: usize) -> bool {
        total > 0 && self.state.is_at_bottom(total)
    }

    fn scroll_to_end(&mut self, total: usize) {
        self.state.scroll_to_bottom(total);
    }

    fn selected(&self) -> Option<usize> {
        self.state.selected
    }

    fn after_change(&mut self, total: usize) {
        self.state.clamp_selection(total);
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn render(&self, area: Rect, frame: &mut Frame, flights: &[Flight]) {
        if area.is_empty() {
            return;
        }
        let bar_width = u16::from(area.width > 10);
        let rows = Rect::new(area.x, area.y, area.width - bar_width, area.height);
        let range = self.state.visible_range(flights.len(), rows.height);

        for (slot, idx) in range.clone().enumerate() {
            let y = rows.y + slot as u16;
            let flight = &flights[idx];
            let selected = self.state.selected == Some(idx);
            let style = if selected {
                theme::row_selected()
            } else {
                theme::row()
            };
            let end = frame
                .buffer
                .set_string(rows.x, y, &format!("{idx:>7}  ", idx = idx), theme::muted().merge(style));
            let end = frame.buffer.set_string(end, y, &route_label(flight), style);
            frame
                .buffer
                .set_string(end + 2, y, &flight.id.to_string(), theme::muted().merge(style));
            if selected {
                frame
                    .buffer
                    .set_style_area(Rect::new(rows.x, y, rows.width, 1), theme::row_selected());
            }
        }

        if bar_width > 0 {
            let mut bar = ScrollbarState::new(
                flights.len(),
                self.state.scroll_offset(),
                range.len(),
            );
            Scrollbar::new().render(
                Rect::new(rows.right(), area.y, 1, area.height),
                frame,
                &mut bar,
            );
        }
    }
}
