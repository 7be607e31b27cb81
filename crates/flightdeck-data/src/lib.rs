#![forbid(unsafe_code)]

//! Domain core: synthetic flight records and the paginated data source.
//!
//! # Role in flightdeck
//! This crate owns the data-flow contract the three render strategies consume:
//! a lazily growing, ordered collection of [`flight::Flight`] records. Page
//! generation runs on worker threads; results come back over a single update
//! channel and are applied on whichever thread owns the [`source::FlightSource`]
//! (the observer context). Nothing here touches a terminal.
//!
//! Generation and mutation cannot fail: no I/O, no validation, no external
//! resources. The only sharp edge is deliberate — concurrent loads race, and
//! callers that care must gate them (see [`source::FlightSource::load_more`]).

pub mod flight;
pub mod source;

pub use flight::{generate_page, generate_page_from, Flight, FlightId, AIRPORT_CODES, PAGE_SIZE};
pub use source::{FlightSource, LoadMoreCallback, PumpSummary};
