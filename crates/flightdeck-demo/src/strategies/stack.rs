//! Manual scroll stack: every record is a bordered three-row card.
//!
//! Scrolling is hand-rolled offset math rather than selection-driven, and
//! like the list there is no duplicate-load guard.

use std::ops::Range;

use flightdeck_core::event::{KeyCode, KeyEvent, ScrollDirection};
use flightdeck_core::geometry::Rect;
use flightdeck_data::Flight;
use flightdeck_render::frame::Frame;
use flightdeck_widgets::{Block, Borders, VirtualizedListState, Widget};

use super::{route_label, Strategy, StrategyId};
use crate::theme;

const CARD_HEIGHT: u16 = 3;

/// The manual scroll stack strategy.
#[derive(Debug)]
pub struct StackStrategy {
    state: VirtualizedListState,
}

impl Default for StackStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl StackStrategy {
    /// A fresh stack scrolled to the top.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: VirtualizedListState::new().with_row_height(CARD_HEIGHT),
        }
    }
}

impl Strategy for StackStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::Stack
    }

    fn handle_key(&mut self, key: KeyEvent, total: usize) {
        match key.code {
            KeyCode::Up => self.state.scroll(-1, total),
            KeyCode::Down => self.state.scroll(1, total),
            KeyCode::PageUp => self.state.page_up(total),
            KeyCode::PageDown => self.state.page_down(total),
            KeyCode::Home => self.state.scroll_to_top(),
            _ => {}
        }
    }

    fn handle_scroll(&mut self, direction: ScrollDirection, total: usize) {
        match direction {
            ScrollDirection::Up => self.state.scroll(-1, total),
            ScrollDirection::Down => self.state.scroll(1, total),
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

    fn after_change(&mut self, _total: usize) {}

    fn reset(&mut self) {
        self.state.reset();
    }

    fn render(&self, area: Rect, frame: &mut Frame, flights: &[Flight]) {
        if area.is_empty() {
            return;
        }
        let range = self.state.visible_range(flights.len(), area.height);
        for (slot, idx) in range.enumerate() {
            let y = area.y + slot as u16 * CARD_HEIGHT;
            let card = Rect::new(area.x, y, area.width, CARD_HEIGHT.min(area.bottom() - y));
            let flight = &flights[idx];
            let block = Block::new()
                .borders(Borders::ALL)
                .title(flight.id.to_string())
                .style(theme::muted());
            let inner = block.inner(card);
            block.render(card, frame);
            if !inner.is_empty() {
                let end = frame
                    .buffer
                    .set_string(inner.x + 1, inner.y, &route_label(flight), theme::row());
                frame.buffer.set_string(
                    end + 2,
                    inner.y,
                    &format!("row {idx}"),
                    theme::muted(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use flightdeck_data::generate_page;
    use flightdeck_render::headless::Snapshot;

    use super::*;

    fn rendered(strategy: &StackStrategy, flights: &[Flight], height: u16) -> Snapshot {
        let mut frame = Frame::new(40, height);
        strategy.render(frame.area(), &mut frame, flights);
        Snapshot::of(&frame)
    }

    #[test]
    fn three_rows_per_card() {
        let flights = generate_page(10);
        let strategy = StackStrategy::new();
        assert_eq!(strategy.visible_range(10, 9), 0..3);
        let snap = rendered(&strategy, &flights, 9);
        assert!(snap.contains("row 0"));
        assert!(snap.contains("row 2"));
        assert!(!snap.contains("row 3"));
    }

    #[test]
    fn arrow_keys_move_one_card() {
        let mut strategy = StackStrategy::new();
        let _ = strategy.visible_range(10, 9);
        strategy.handle_key(KeyEvent::new(KeyCode::Down), 10);
        assert_eq!(strategy.visible_range(10, 9), 1..4);
        strategy.handle_key(KeyEvent::new(KeyCode::Up), 10);
        assert_eq!(strategy.visible_range(10, 9), 0..3);
    }

    #[test]
    fn no_selection_and_no_guard() {
        let mut strategy = StackStrategy::new();
        assert_eq!(strategy.selected(), None);
        assert!(!strategy.guards_duplicate_loads());
        assert!(strategy.begin_load().is_none());
    }

    #[test]
    fn scroll_to_end_reaches_last_card() {
        let mut strategy = StackStrategy::new();
        let _ = strategy.visible_range(10, 9);
        strategy.scroll_to_end(10);
        let _ = strategy.visible_range(10, 9);
        assert!(strategy.near_end(10));
    }
}
