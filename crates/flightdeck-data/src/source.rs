//! The paginated data source.
//!
//! [`FlightSource`] owns the growing, ordered collection of flights. Loads
//! run on spawned worker threads and hand their pages back across a single
//! mpsc update channel; the thread that owns the source applies them by
//! calling [`FlightSource::pump`] (or [`FlightSource::wait`] in tests). That
//! thread is the observer context: all mutation and all observation happen
//! there, so no locking is needed anywhere.
//!
//! # What is deliberately loose
//!
//! - Concurrent [`load_first`](FlightSource::load_first) calls race; the last
//!   update applied wins.
//! - Concurrent [`load_more`](FlightSource::load_more) calls have no ordering
//!   guarantee relative to each other. Callers that need at most one load in
//!   flight must gate calls themselves (the table strategy in the demo does;
//!   the other two do not, on purpose).
//! - There is no cancellation. Resetting or switching strategies while a load
//!   is pending does not stop it; its page still arrives and is applied as a
//!   normal completion.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::flight::{generate_page, Flight, FlightId, PAGE_SIZE};

/// Completion callback for [`FlightSource::load_more`].
pub type LoadMoreCallback = Box<dyn FnOnce() + Send>;

enum Update {
    Replace {
        page: Vec<Flight>,
        on_complete: Box<dyn FnOnce(&[Flight]) + Send>,
    },
    Append {
        page: Vec<Flight>,
        on_complete: Option<LoadMoreCallback>,
    },
}

/// What one [`FlightSource::pump`] call applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpSummary {
    /// A first-page load replaced the collection.
    pub replaced: bool,
    /// Number of appended pages.
    pub appended: usize,
}

impl PumpSummary {
    /// True when anything was applied.
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.replaced || self.appended > 0
    }

    fn absorb(&mut self, other: Self) {
        self.replaced |= other.replaced;
        self.appended += other.appended;
    }
}

/// Paginated data source for [`Flight`] records.
pub struct FlightSource {
    flights: Vec<Flight>,
    revision: u64,
    page_size: usize,
    tx: Sender<Update>,
    rx: Receiver<Update>,
}

impl FlightSource {
    /// Create an empty source with the default [`PAGE_SIZE`].
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            flights: Vec::new(),
            revision: 0,
            page_size: PAGE_SIZE,
            tx,
            rx,
        }
    }

    /// Override the page size (tests and the `--page-size` flag).
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Records per page for this source.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current snapshot, in display order.
    #[must_use]
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// True when no records are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// The last record, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Flight> {
        self.flights.last()
    }

    /// Monotonic change counter; bumps on every observable mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Clear the collection. No-op if already empty.
    pub fn reset(&mut self) {
        if self.flights.is_empty() {
            return;
        }
        debug!(dropped = self.flights.len(), "source reset");
        self.flights.clear();
        self.revision += 1;
    }

    /// Asynchronously generate one page and, once applied, replace the
    /// collection with it. `on_complete` runs on the observer context with
    /// the new snapshot.
    ///
    /// Safe to call while another load is pending; the results race and the
    /// last one applied wins.
    pub fn load_first<F>(&self, on_complete: F)
    where
        F: FnOnce(&[Flight]) + Send + 'static,
    {
        let tx = self.tx.clone();
        let count = self.page_size;
        thread::spawn(move || {
            let started = Instant::now();
            let page = generate_page(count);
            debug!(
                count,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "first page generated"
            );
            let _ = tx.send(Update::Replace {
                page,
                on_complete: Box::new(on_complete),
            });
        });
    }

    /// Asynchronously generate one page and, once applied, append it to the
    /// collection. The optional `on_complete` runs on the observer context
    /// after the append.
    ///
    /// No ordering guarantee across concurrent calls, and no built-in guard
    /// against issuing several at once.
    pub fn load_more(&self, on_complete: Option<LoadMoreCallback>) {
        let tx = self.tx.clone();
        let count = self.page_size;
        thread::spawn(move || {
            let started = Instant::now();
            let page = generate_page(count);
            debug!(
                count,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "next page generated"
            );
            let _ = tx.send(Update::Append { page, on_complete });
        });
    }

    /// Synchronously remove every record with the given identity, preserving
    /// the relative order of the rest. Absent identities are a silent no-op.
    pub fn delete(&mut self, id: FlightId) {
        let before = self.flights.len();
        self.flights.retain(|flight| flight.id != id);
        if self.flights.len() != before {
            debug!(%id, remaining = self.flights.len(), "record deleted");
            self.revision += 1;
        }
    }

    /// Apply every pending load result without blocking.
    ///
    /// Must be called from the thread that owns the source. Each update is
    /// applied atomically with respect to observers on that thread: the
    /// mutation, the revision bump, and the completion callback happen before
    /// the next update is examined.
    pub fn pump(&mut self) -> PumpSummary {
        let mut summary = PumpSummary::default();
        while let Ok(update) = self.rx.try_recv() {
            summary.absorb(self.apply(update));
        }
        summary
    }

    /// Block up to `timeout` for one load result, then drain the rest.
    ///
    /// Returns the default (unchanged) summary on timeout. Intended for tests
    /// that await loads one at a time; production consumers use [`pump`]
    /// (via the runtime's tick) instead.
    ///
    /// [`pump`]: FlightSource::pump
    pub fn wait(&mut self, timeout: Duration) -> PumpSummary {
        let mut summary = PumpSummary::default();
        match self.rx.recv_timeout(timeout) {
            Ok(update) => summary.absorb(self.apply(update)),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return summary,
        }
        summary.absorb(self.pump());
        summary
    }

    fn apply(&mut self, update: Update) -> PumpSummary {
        match update {
            Update::Replace { page, on_complete } => {
                trace!(len = page.len(), "applying replace");
                self.flights = page;
                self.revision += 1;
                on_complete(&self.flights);
                PumpSummary {
                    replaced: true,
                    appended: 0,
                }
            }
            Update::Append { page, on_complete } => {
                trace!(len = page.len(), total = self.flights.len(), "applying append");
                self.flights.extend(page);
                self.revision += 1;
                if let Some(callback) = on_complete {
                    callback();
                }
                PumpSummary {
                    replaced: false,
                    appended: 1,
                }
            }
        }
    }
}

impl Default for FlightSource {
    fn default() -> Self {
        Self::new()
    }
}
