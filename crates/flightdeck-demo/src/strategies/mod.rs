//! The three list-rendering strategies and their shared contract.
//!
//! Every strategy consumes the same data source snapshot and implements the
//! same adapter contract: render the current window, report when the last
//! record has been rendered (so the app can request the next page), honor a
//! scroll-to-end command, and expose its selection for deletion.
//!
//! The strategies deliberately differ in how they guard pagination. The
//! table strategy keeps a pending flag and never has two loads in flight;
//! the list and stack strategies re-request whenever the last record is
//! visible, which can race — that asymmetry is part of what the demo exists
//! to show, so it is expressed per strategy instead of being unified.

use std::ops::Range;

use flightdeck_core::event::{KeyEvent, ScrollDirection};
use flightdeck_core::geometry::Rect;
use flightdeck_data::{Flight, LoadMoreCallback};
use flightdeck_render::frame::Frame;

pub mod list;
pub mod stack;
pub mod table;

pub use list::ListStrategy;
pub use stack::StackStrategy;
pub use table::TableStrategy;

/// Which strategy is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyId {
    /// Native virtualized list.
    List,
    /// Manually scrolled stack of bordered rows.
    Stack,
    /// Cell-reuse table bridged into the render pass.
    Table,
}

impl StrategyId {
    /// All strategies in tab order.
    pub const ALL: &'static [StrategyId] = &[Self::List, Self::Stack, Self::Table];

    /// Title for the tab bar.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Stack => "Stack",
            Self::Table => "Table",
        }
    }

    /// Key that activates this strategy.
    #[must_use]
    pub const fn hotkey(self) -> char {
        match self {
            Self::List => 'l',
            Self::Stack => 's',
            Self::Table => 't',
        }
    }
}

/// The shared adapter contract.
pub trait Strategy {
    /// Identity, for the tab bar and tests.
    fn id(&self) -> StrategyId;

    /// Handle a navigation key over `total` records.
    fn handle_key(&mut self, key: KeyEvent, total: usize);

    /// Handle a mouse wheel step.
    fn handle_scroll(&mut self, direction: ScrollDirection, total: usize);

    /// The window of records the strategy would render right now.
    fn visible_range(&self, total: usize, viewport_height: u16) -> Range<usize>;

    /// True when the last record currently sits inside the rendered window.
    /// Meaningful only after at least one render pass sized the window.
    fn near_end(&self, total: usize) -> bool;

    /// Whether this strategy gates `load_more` behind a pending flag.
    fn guards_duplicate_loads(&self) -> bool {
        false
    }

    /// True while this strategy believes a page it requested is in flight.
    /// Always false for unguarded strategies.
    fn load_pending(&self) -> bool {
        false
    }

    /// Called right before the app issues `load_more` on this strategy's
    /// behalf. Guarded strategies set their pending flag here and return the
    /// completion callback that clears it.
    fn begin_load(&mut self) -> Option<LoadMoreCallback> {
        None
    }

    /// Move the viewport so the last record is visible (the one-shot
    /// scroll-to-end command; the app guarantees `total > 0`).
    fn scroll_to_end(&mut self, total: usize);

    /// Selected record index, if this strategy supports selection.
    fn selected(&self) -> Option<usize> {
        None
    }

    /// React to the collection having changed (clamp selection etc.).
    fn after_change(&mut self, total: usize);

    /// Return to the idle state (strategy switch / reload).
    fn reset(&mut self);

    /// Render the snapshot into `area`.
    fn render(&self, area: Rect, frame: &mut Frame, flights: &[Flight]);

    /// Extra status-bar text (e.g. reuse counters). Empty when none.
    fn status_note(&self) -> String {
        String::new()
    }
}

/// One formatted route, shared by all three strategies.
#[must_use]
pub fn route_label(flight: &Flight) -> String {
    format!("{:<4} ✈  {:<4}", flight.from, flight.to)
}
