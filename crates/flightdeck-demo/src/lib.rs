#![forbid(unsafe_code)]

//! Flightdeck demo: one paginated data source, three rendering strategies.
//!
//! The app renders a lazily growing list of synthetic flights and lets the
//! user flip between three list implementations at runtime to compare their
//! behavior: a native virtualized list, a manually scrolled stack of bordered
//! rows, and an imperative cell-reuse table bridged into the declarative
//! render pass. Switching strategies resets the data source, so each starts
//! from a fresh first page.

pub mod app;
pub mod cli;
pub mod strategies;
pub mod theme;
