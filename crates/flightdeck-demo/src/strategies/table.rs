//! Cell-reuse table: an imperative row pool bridged into the render pass.
//!
//! Rows are drawn from a pool of reusable cells keyed by the flight id they
//! were last bound to; a cell bound to the same id is reused without
//! reformatting. This is also the only strategy that guards pagination: a
//! pending flag is raised before `load_more` is issued on its behalf and
//! cleared by the completion callback, so at most one page is ever in
//! flight for the table.

use std::cell::{Cell as StdCell, RefCell};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use flightdeck_core::event::{KeyCode, KeyEvent, ScrollDirection};
use flightdeck_core::geometry::Rect;
use flightdeck_data::{Flight, FlightId, LoadMoreCallback};
use flightdeck_render::frame::Frame;
use flightdeck_widgets::VirtualizedListState;

use super::{Strategy, StrategyId};
use crate::theme;

/// One reusable row slot.
#[derive(Debug, Default)]
struct RowCell {
    /// Flight this cell's text was last formatted for.
    bound: Option<FlightId>,
    text: String,
}

impl RowCell {
    fn bind(&mut self, idx: usize, flight: &Flight) {
        self.text = format!(
            "{idx:>7}  {from:<4}  {to:<4}  {id}",
            from = flight.from,
            to = flight.to,
            id = flight.id,
        );
        self.bound = Some(flight.id);
    }
}

/// The cell-reuse table strategy.
#[derive(Debug)]
pub struct TableStrategy {
    state: VirtualizedListState,
    pool: RefCell<Vec<RowCell>>,
    reused: StdCell<u64>,
    bound: StdCell<u64>,
    pending: Arc<AtomicBool>,
}

impl Default for TableStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStrategy {
    /// A fresh table with an empty cell pool and no pending load.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: VirtualizedListState::new(),
            pool: RefCell::new(Vec::new()),
            reused: StdCell::new(0),
            bound: StdCell::new(0),
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    /// (reused, bound) counters since the last reset.
    #[must_use]
    pub fn reuse_stats(&self) -> (u64, u64) {
        (self.reused.get(), self.bound.get())
    }
}

impl Strategy for TableStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::Table
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
        // One viewport row is the header.
        self.state
            .visible_range(total, viewport_height.saturating_sub(1))
    }

    fn near_end(&self, total: usize) -> bool {
        total > 0 && self.state.is_at_bottom(total)
    }

    fn guards_duplicate_loads(&self) -> bool {
        true
    }

    fn load_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    fn begin_load(&mut self) -> Option<LoadMoreCallback> {
        if self.pending.swap(true, Ordering::SeqCst) {
            return None; // already in flight
        }
        let pending = Arc::clone(&self.pending);
        Some(Box::new(move || pending.store(false, Ordering::SeqCst)))
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
        // The pending flag is cleared by the in-flight completion callback,
        // never here; resetting it early would let a second load slip in.
        self.state.reset();
        self.pool.borrow_mut().clear();
        self.reused.set(0);
        self.bound.set(0);
    }

    fn render(&self, area: Rect, frame: &mut Frame, flights: &[Flight]) {
        if area.is_empty() {
            return;
        }
        frame.buffer.set_string(
            area.x,
            area.y,
            "  index  from  to    id",
            theme::table_header(),
        );
        let body = Rect::new(
            area.x,
            area.y + 1,
            area.width,
            area.height.saturating_sub(1),
        );
        let range = self.state.visible_range(flights.len(), body.height);

        let mut pool = self.pool.borrow_mut();
        if pool.len() < range.len() {
            pool.resize_with(range.len(), RowCell::default);
        }
        for (slot, idx) in range.enumerate() {
            let flight = &flights[idx];
            let cell = &mut pool[slot];
            if cell.bound == Some(flight.id) {
                self.reused.set(self.reused.get() + 1);
            } else {
                cell.bind(idx, flight);
                self.bound.set(self.bound.get() + 1);
            }
            let y = body.y + slot as u16;
            let style = if self.state.selected == Some(idx) {
                theme::row_selected()
            } else {
                theme::row()
            };
            frame.buffer.set_string(body.x, y, &cell.text, style);
            if self.state.selected == Some(idx) {
                frame
                    .buffer
                    .set_style_area(Rect::new(body.x, y, body.width, 1), theme::row_selected());
            }
        }
    }

    fn status_note(&self) -> String {
        format!("cells {} reused / {} bound", self.reused.get(), self.bound.get())
    }
}

#[cfg(test)]
mod tests {
    use flightdeck_data::generate_page;
    use flightdeck_render::headless::Snapshot;

    use super::*;

    fn rendered(strategy: &TableStrategy, flights: &[Flight]) -> Snapshot {
        let mut frame = Frame::new(40, 7);
        strategy.render(frame.area(), &mut frame, flights);
        Snapshot::of(&frame)
    }

    #[test]
    fn header_plus_body_rows() {
        let flights = generate_page(100);
        let strategy = TableStrategy::new();
        let snap = rendered(&strategy, &flights);
        assert!(snap.row(0).contains("index"));
        assert!(snap.contains("      0"));
        assert!(snap.contains("      5"));
        assert!(!snap.contains("      6")); // 6 body rows under the header
    }

    #[test]
    fn unmoved_rerender_reuses_every_cell() {
        let flights = generate_page(100);
        let strategy = TableStrategy::new();
        let _ = rendered(&strategy, &flights);
        let (_, bound_first) = strategy.reuse_stats();
        assert_eq!(bound_first, 6);

        let _ = rendered(&strategy, &flights);
        let (reused, bound) = strategy.reuse_stats();
        assert_eq!(reused, 6);
        assert_eq!(bound, bound_first); // nothing re-formatted
    }

    #[test]
    fn scrolling_rebinds_the_pool() {
        let flights = generate_page(100);
        let mut strategy = TableStrategy::new();
        let _ = rendered(&strategy, &flights);
        strategy.handle_scroll(ScrollDirection::Down, 100);
        let _ = rendered(&strategy, &flights);
        let (reused, bound) = strategy.reuse_stats();
        assert_eq!(reused, 0); // shifted by 3, every slot sees a new flight
        assert_eq!(bound, 12);
    }

    #[test]
    fn guard_allows_one_load_at_a_time() {
        let mut strategy = TableStrategy::new();
        assert!(strategy.guards_duplicate_loads());
        assert!(!strategy.load_pending());

        let on_complete = strategy.begin_load().expect("first load starts");
        assert!(strategy.load_pending());
        assert!(strategy.begin_load().is_none()); // duplicate refused

        on_complete();
        assert!(!strategy.load_pending());
        assert!(strategy.begin_load().is_some());
    }

    #[test]
    fn reset_clears_pool_but_not_pending_flag() {
        let mut strategy = TableStrategy::new();
        let _ = rendered(&strategy, &generate_page(10));
        let _cb = strategy.begin_load();
        strategy.reset();
        assert_eq!(strategy.reuse_stats(), (0, 0));
        assert!(strategy.load_pending()); // cleared only by the callback
    }

    #[test]
    fn deleted_row_rebinds_its_successors() {
        let mut flights = generate_page(100);
        let strategy = TableStrategy::new();
        let _ = rendered(&strategy, &flights);
        flights.remove(2);
        let _ = rendered(&strategy, &flights);
        let (reused, bound) = strategy.reuse_stats();
        assert_eq!(reused, 2); // rows 0 and 1 kept their flights
        assert_eq!(bound, 6 + 4);
    }
}
