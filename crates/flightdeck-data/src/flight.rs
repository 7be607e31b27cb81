//! Flight records and the synthetic page generator.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::seq::IndexedRandom;

/// The fixed vocabulary of location codes.
pub const AIRPORT_CODES: [&str; 15] = [
    "PAO", "SJC", "RHV", "SQL", "SFO", "HAF", "MRY", "SNS", "LVK", "STS", "APC", "SBA", "JFK",
    "LHR", "BWI",
];

/// Records per generated page. Deliberately large: the point of the demo is
/// to stress rendering, not to model realistic pagination.
pub const PAGE_SIZE: usize = 10_000;

/// Opaque, unique, immutable identity of a [`Flight`].
///
/// Drawn from a process-wide monotonic counter; never reused within a
/// process. The monotonicity is an implementation detail, not a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlightId(u64);

impl FlightId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for FlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single synthetic flight. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flight {
    /// Unique identity, assigned at creation.
    pub id: FlightId,
    /// Origin code.
    pub from: String,
    /// Destination code.
    pub to: String,
}

impl Flight {
    /// A random flight over [`AIRPORT_CODES`].
    #[must_use]
    pub fn random() -> Self {
        Self::random_from(&AIRPORT_CODES)
    }

    /// A random flight over `vocab`. Origin and destination are drawn
    /// independently with replacement; origin == destination is allowed.
    #[must_use]
    pub fn random_from(vocab: &[&str]) -> Self {
        let mut rng = rand::rng();
        Self {
            id: FlightId::next(),
            from: vocab.choose(&mut rng).copied().unwrap_or("").to_string(),
            to: vocab.choose(&mut rng).copied().unwrap_or("").to_string(),
        }
    }
}

/// Generate one page of `count` random flights over [`AIRPORT_CODES`].
///
/// Pure with respect to caller state, non-deterministic in content. Always
/// succeeds; no side effects beyond allocation.
#[must_use]
pub fn generate_page(count: usize) -> Vec<Flight> {
    generate_page_from(count, &AIRPORT_CODES)
}

/// Generate one page of `count` random flights over a custom vocabulary.
#[must_use]
pub fn generate_page_from(count: usize, vocab: &[&str]) -> Vec<Flight> {
    (0..count).map(|_| Flight::random_from(vocab)).collect()
}
