#![forbid(unsafe_code)]

//! Widget library: the pieces the demo's render strategies are built from.
//!
//! Widgets are plain values that draw into a [`Frame`] region when rendered;
//! stateful widgets additionally thread a mutable state struct owned by the
//! caller across frames (scroll offsets, selection).

use flightdeck_core::geometry::Rect;
use flightdeck_render::frame::Frame;

pub mod block;
pub mod scrollbar;
pub mod virtualized;

pub use block::{Block, Borders};
pub use scrollbar::{Scrollbar, ScrollbarState};
pub use virtualized::VirtualizedListState;

/// A stateless widget.
pub trait Widget {
    /// Draw into `area` of `frame`.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A widget whose appearance depends on caller-owned state.
pub trait StatefulWidget {
    /// Persistent state threaded across frames.
    type State;

    /// Draw into `area` of `frame`, reading and updating `state`.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}
