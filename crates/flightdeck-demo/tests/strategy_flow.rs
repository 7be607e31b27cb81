//! End-to-end flows through the app model: pagination triggering, the
//! per-strategy duplicate-load asymmetry, strategy switching, and the
//! queued scroll-to-end command.

use std::time::Duration;

use flightdeck_core::event::{Event, KeyCode, KeyEvent, MouseEvent, ScrollDirection};
use flightdeck_data::FlightSource;
use flightdeck_demo::app::App;
use flightdeck_demo::strategies::StrategyId;
use flightdeck_runtime::Pump;

const WAIT: Duration = Duration::from_secs(5);
const PAGE: usize = 10;

fn started(initial: StrategyId) -> Pump<App> {
    let source = FlightSource::new().with_page_size(PAGE);
    let mut pump = Pump::new(App::new(source, initial));
    pump.init();
    assert!(pump.model_mut().source_mut().wait(WAIT).replaced);
    pump.tick();
    pump
}

fn key(pump: &mut Pump<App>, code: KeyCode) {
    pump.event(Event::Key(KeyEvent::new(code)));
}

fn wheel(pump: &mut Pump<App>, direction: ScrollDirection) {
    pump.event(Event::Mouse(MouseEvent {
        direction,
        column: 0,
        row: 0,
    }));
}

/// Scroll the strategy to the end and size its window: after this the last
/// record is visible but the pagination trigger has not fired yet. The frame
/// is shorter than a page so scrolling away from the end is possible.
fn park_at_end(pump: &mut Pump<App>) {
    let _ = pump.render(40, 8);
    key(pump, KeyCode::End);
    let _ = pump.render(40, 8);
}

#[test]
fn first_page_lands_and_cadence_relaxes() {
    let pump = started(StrategyId::List);
    assert_eq!(pump.model().source().len(), PAGE);
    assert_eq!(pump.model().in_flight(), 0);
    assert!(pump.tick_rate().is_some());
}

#[test]
fn reaching_the_end_loads_the_next_page() {
    let mut pump = started(StrategyId::List);
    park_at_end(&mut pump);
    pump.tick();
    assert_eq!(pump.model().in_flight(), 1);

    assert_eq!(pump.model_mut().source_mut().wait(WAIT).appended, 1);
    assert_eq!(pump.model().source().len(), 2 * PAGE);
    assert_eq!(pump.model().in_flight(), 0);
}

#[test]
fn unguarded_list_can_have_two_loads_in_flight() {
    let mut pump = started(StrategyId::List);
    park_at_end(&mut pump);

    // Each wheel-down at the bottom re-arms and fires the trigger; nothing
    // pumps in between, so both requests are outstanding at once.
    wheel(&mut pump, ScrollDirection::Down);
    wheel(&mut pump, ScrollDirection::Up);
    wheel(&mut pump, ScrollDirection::Down);
    assert_eq!(pump.model().in_flight(), 2);

    // Both pages still land.
    while pump.model().in_flight() > 0 {
        assert!(
            pump.model_mut().source_mut().wait(WAIT).changed(),
            "timed out waiting for appends"
        );
    }
    assert_eq!(pump.model().source().len(), 3 * PAGE);
}

#[test]
fn guarded_table_never_doubles_a_load() {
    let mut pump = started(StrategyId::Table);
    park_at_end(&mut pump);

    wheel(&mut pump, ScrollDirection::Down);
    let after_first = pump.model().loads_started();
    wheel(&mut pump, ScrollDirection::Up);
    wheel(&mut pump, ScrollDirection::Down); // trigger re-fires, guard refuses
    assert_eq!(pump.model().loads_started(), after_first);
    assert_eq!(pump.model().in_flight(), 1);

    // Completion clears the guard, so the next visit to the end loads again.
    assert_eq!(pump.model_mut().source_mut().wait(WAIT).appended, 1);
    pump.tick();
    park_at_end(&mut pump);
    wheel(&mut pump, ScrollDirection::Down);
    assert_eq!(pump.model().loads_started(), after_first + 1);
}

#[test]
fn switching_strategies_starts_from_a_fresh_first_page() {
    let mut pump = started(StrategyId::List);
    let old_ids: Vec<_> = pump
        .model()
        .source()
        .flights()
        .iter()
        .map(|f| f.id)
        .collect();

    key(&mut pump, KeyCode::Char('s'));
    assert_eq!(pump.model().active(), StrategyId::Stack);
    assert!(pump.model().source().is_empty());

    assert!(pump.model_mut().source_mut().wait(WAIT).replaced);
    assert_eq!(pump.model().source().len(), PAGE);
    let fresh = pump.model().source().flights();
    assert!(fresh.iter().all(|f| !old_ids.contains(&f.id)));
}

#[test]
fn switching_mid_load_does_not_cancel_the_old_load() {
    let source = FlightSource::new().with_page_size(PAGE);
    let mut pump = Pump::new(App::new(source, StrategyId::List));
    pump.init(); // first page in flight

    key(&mut pump, KeyCode::Char('t')); // reset is a no-op on the empty source
    assert_eq!(pump.model().in_flight(), 2);

    while pump.model().in_flight() > 0 {
        assert!(
            pump.model_mut().source_mut().wait(WAIT).changed(),
            "timed out waiting for replaces"
        );
    }
    // Both first pages were applied as replaces; the later one won.
    assert_eq!(pump.model().source().len(), PAGE);
    assert_eq!(pump.model().source().revision(), 2);
}

#[test]
fn scroll_to_end_waits_for_data_then_fires_once() {
    let source = FlightSource::new().with_page_size(PAGE);
    let mut pump = Pump::new(App::new(source, StrategyId::Stack));
    pump.init();

    key(&mut pump, KeyCode::End);
    assert!(pump.model().scroll_to_end_pending()); // nothing to scroll to yet

    assert!(pump.model_mut().source_mut().wait(WAIT).replaced);
    pump.tick();
    assert!(!pump.model().scroll_to_end_pending());
}

#[test]
fn deleting_from_the_table_keeps_neighbors_in_order() {
    let mut pump = started(StrategyId::Table);
    let _ = pump.render(40, 12);
    key(&mut pump, KeyCode::Down);
    key(&mut pump, KeyCode::Down); // select index 1
    let before: Vec<_> = pump.model().source().flights().to_vec();

    key(&mut pump, KeyCode::Char('d'));
    let after = pump.model().source().flights();
    assert_eq!(after.len(), PAGE - 1);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], before[2]);
}
