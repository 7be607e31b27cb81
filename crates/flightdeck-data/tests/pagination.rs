#![forbid(unsafe_code)]

//! End-to-end pagination scenarios through the public API.

use std::time::Duration;

use flightdeck_data::{FlightSource, PAGE_SIZE};

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn n_awaited_pages_grow_linearly_and_keep_page_order() {
    let mut source = FlightSource::new().with_page_size(10);
    source.load_first(|_| {});
    assert!(source.wait(WAIT).replaced);

    let mut page_boundaries = vec![source.flights().to_vec()];
    for n in 2..=4 {
        source.load_more(None);
        assert_eq!(source.wait(WAIT).appended, 1);
        assert_eq!(source.len(), 10 * n);
        page_boundaries.push(source.flights()[10 * (n - 1)..].to_vec());
    }

    // Earlier pages sit wholly before later ones.
    let mut offset = 0;
    for page in &page_boundaries {
        assert_eq!(&source.flights()[offset..offset + page.len()], &page[..]);
        offset += page.len();
    }
}

#[test]
fn delete_at_index_fifteen_scenario() {
    let mut source = FlightSource::new().with_page_size(10);
    source.load_first(|_| {});
    source.wait(WAIT);
    for _ in 0..2 {
        source.load_more(None);
        source.wait(WAIT);
    }
    assert_eq!(source.len(), 30);

    let before = source.flights().to_vec();
    source.delete(before[15].id);

    assert_eq!(source.len(), 29);
    assert_eq!(source.flights()[..15], before[..15]);
    assert_eq!(source.flights()[15], before[16]);
}

#[test]
fn default_page_size_is_the_stress_constant() {
    assert_eq!(FlightSource::new().page_size(), PAGE_SIZE);
    assert_eq!(PAGE_SIZE, 10_000);
}

#[test]
fn full_size_first_page_loads() {
    // One real 10k generation, to keep the default path honest.
    let mut source = FlightSource::new();
    source.load_first(|_| {});
    assert!(source.wait(Duration::from_secs(30)).replaced);
    assert_eq!(source.len(), PAGE_SIZE);
}
