#![forbid(unsafe_code)]

//! Render kernel: styles, cells, the buffer grid, and frames.
//!
//! # Role in flightdeck
//! Everything here is deterministic and free of terminal I/O. The runtime
//! presents a finished [`frame::Frame`] to the terminal; tests snapshot the
//! same frame through [`headless`] without a terminal at all.

pub mod buffer;
pub mod cell;
pub mod frame;
pub mod headless;
pub mod style;

pub use buffer::Buffer;
pub use cell::Cell;
pub use frame::Frame;
pub use style::{Color, Style};
