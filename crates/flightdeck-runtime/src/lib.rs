#![forbid(unsafe_code)]

//! Elm-style runtime: models, commands, the terminal program loop, and a
//! headless pump for tests.
//!
//! # Role in flightdeck
//! The runtime owns the single observer context of the whole system: the
//! thread running [`Program::run`] (or driving a [`pump::Pump`] in tests) is
//! where every model mutation and every render happens. Side effects leave
//! that thread only as [`program::Cmd::Task`] worker threads whose results
//! come back as ordinary messages.

pub mod program;
pub mod pump;

pub use program::{Cmd, Model, Program, ProgramConfig};
pub use pump::Pump;
