//! The demo application model.
//!
//! One [`FlightSource`] feeds whichever strategy is active. Loads are
//! requested here (edge-triggered when the last record enters the rendered
//! window) and applied here (the source is pumped on every runtime tick, so
//! all mutation happens on the loop thread). Switching strategies resets the
//! source and every strategy; a load already in flight is not cancelled and
//! its page lands in the fresh collection.
//!
//! # Keys
//!
//! - `l` / `s` / `t` — switch strategy
//! - `r` — reset and reload the first page
//! - `e` / `End` — scroll to the end (queued until data exists)
//! - `d` — delete the selected record
//! - `q` / `Esc` — quit

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use flightdeck_core::event::{Event, KeyCode, KeyEvent};
use flightdeck_core::geometry::Rect;
use flightdeck_data::{FlightSource, LoadMoreCallback};
use flightdeck_render::cell::Cell;
use flightdeck_render::frame::Frame;
use flightdeck_runtime::{Cmd, Model};

use crate::strategies::{ListStrategy, StackStrategy, Strategy, StrategyId, TableStrategy};
use crate::theme;

/// Tick cadence while a load is in flight.
const TICK_BUSY: Duration = Duration::from_millis(25);
/// Tick cadence when idle.
const TICK_IDLE: Duration = Duration::from_millis(100);

/// Top-level model: the data source plus the three strategies.
pub struct App {
    source: FlightSource,
    active: StrategyId,
    list: ListStrategy,
    stack: StackStrategy,
    table: TableStrategy,
    /// One-shot scroll-to-end command, queued while the collection is empty.
    scroll_to_end_requested: bool,
    /// Rising-edge detector for the pagination trigger.
    near_end_latch: bool,
    last_total: usize,
    loads_started: u64,
    loads_applied: Arc<AtomicU64>,
}

impl App {
    /// An app over `source`, starting on `initial`.
    #[must_use]
    pub fn new(source: FlightSource, initial: StrategyId) -> Self {
        Self {
            source,
            active: initial,
            list: ListStrategy::new(),
            stack: StackStrategy::new(),
            table: TableStrategy::new(),
            scroll_to_end_requested: false,
            near_end_latch: false,
            last_total: 0,
            loads_started: 0,
            loads_applied: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The data source (tests).
    #[must_use]
    pub fn source(&self) -> &FlightSource {
        &self.source
    }

    /// Mutable source access (tests drive `wait` directly).
    pub fn source_mut(&mut self) -> &mut FlightSource {
        &mut self.source
    }

    /// The active strategy id.
    #[must_use]
    pub fn active(&self) -> StrategyId {
        self.active
    }

    /// Loads issued since startup.
    #[must_use]
    pub fn loads_started(&self) -> u64 {
        self.loads_started
    }

    /// Loads issued but not yet applied.
    #[must_use]
    pub fn in_flight(&self) -> u64 {
        self.loads_started - self.loads_applied.load(Ordering::SeqCst)
    }

    /// Whether a scroll-to-end command is still queued.
    #[must_use]
    pub fn scroll_to_end_pending(&self) -> bool {
        self.scroll_to_end_requested
    }

    fn strategy(&self) -> &dyn Strategy {
        match self.active {
            StrategyId::List => &self.list,
            StrategyId::Stack => &self.stack,
            StrategyId::Table => &self.table,
        }
    }

    fn strategy_mut(&mut self) -> &mut dyn Strategy {
        match self.active {
            StrategyId::List => &mut self.list,
            StrategyId::Stack => &mut self.stack,
            StrategyId::Table => &mut self.table,
        }
    }

    fn schedule(&self) -> Cmd<Event> {
        Cmd::tick(if self.in_flight() > 0 {
            TICK_BUSY
        } else {
            TICK_IDLE
        })
    }

    fn start_first_load(&mut self) {
        self.loads_started += 1;
        let applied = Arc::clone(&self.loads_applied);
        self.source.load_first(move |flights| {
            debug!(len = flights.len(), "first page applied");
            applied.fetch_add(1, Ordering::SeqCst);
        });
    }

    fn switch_to(&mut self, id: StrategyId) {
        if self.active == id {
            return;
        }
        info!(strategy = id.title(), "switching strategy");
        self.active = id;
        self.restart();
    }

    /// Reset the source and every strategy, then load a fresh first page.
    fn restart(&mut self) {
        self.source.reset();
        self.list.reset();
        self.stack.reset();
        self.table.reset();
        self.scroll_to_end_requested = false;
        self.near_end_latch = false;
        self.last_total = 0;
        self.start_first_load();
    }

    fn request_scroll_to_end(&mut self) {
        self.scroll_to_end_requested = true;
        self.apply_scroll_to_end();
    }

    /// Consume the queued scroll-to-end once there is anything to scroll to.
    fn apply_scroll_to_end(&mut self) {
        let total = self.source.len();
        if self.scroll_to_end_requested && total > 0 {
            self.strategy_mut().scroll_to_end(total);
            self.scroll_to_end_requested = false;
        }
    }

    fn delete_selected(&mut self) {
        let Some(idx) = self.strategy().selected() else {
            return;
        };
        let Some(flight) = self.source.flights().get(idx) else {
            return;
        };
        let id = flight.id;
        self.source.delete(id);
        let total = self.source.len();
        self.strategy_mut().after_change(total);
    }

    /// Issue `load_more` when the last record has just become visible, or
    /// when an append landed while the window is still pinned to the end.
    /// The trigger is edge-detected so an unchanged viewport does not spam
    /// requests every tick; scrolling away and back re-arms it, which is how
    /// the unguarded strategies end up with duplicate loads in flight.
    fn maybe_load_more(&mut self) {
        let total = self.source.len();
        if total == 0 {
            self.near_end_latch = false;
            self.last_total = 0;
            return;
        }
        let near = self.strategy().near_end(total);
        let rising = near && !self.near_end_latch;
        let grew = near && total > self.last_total;
        self.near_end_latch = near;
        self.last_total = total;
        if !rising && !grew {
            return;
        }
        if self.strategy().load_pending() {
            return; // table: one page in flight at a time
        }
        let strategy_callback = self.strategy_mut().begin_load();

        self.loads_started += 1;
        let applied = Arc::clone(&self.loads_applied);
        let on_complete: LoadMoreCallback = Box::new(move || {
            applied.fetch_add(1, Ordering::SeqCst);
            if let Some(callback) = strategy_callback {
                callback();
            }
        });
        debug!(total, "requesting next page");
        self.source.load_more(Some(on_complete));
    }

    fn on_key(&mut self, key: KeyEvent) -> Cmd<Event> {
        if !key.is_press() {
            return Cmd::none();
        }
        if key.is_char('q') || key.code == KeyCode::Esc {
            return Cmd::quit();
        }
        for id in StrategyId::ALL {
            if key.is_char(id.hotkey()) {
                self.switch_to(*id);
                return self.schedule();
            }
        }
        if key.is_char('r') {
            self.restart();
            return self.schedule();
        }
        if key.is_char('e') || key.code == KeyCode::End {
            self.request_scroll_to_end();
            return Cmd::none();
        }
        if key.is_char('d') {
            self.delete_selected();
            return Cmd::none();
        }
        let total = self.source.len();
        self.strategy_mut().handle_key(key, total);
        self.maybe_load_more();
        Cmd::none()
    }

    fn on_tick(&mut self) -> Cmd<Event> {
        let summary = self.source.pump();
        if summary.changed() {
            let total = self.source.len();
            self.strategy_mut().after_change(total);
        }
        self.apply_scroll_to_end();
        self.maybe_load_more();
        self.schedule()
    }

    fn render_tabs(&self, area: Rect, frame: &mut Frame) {
        let mut x = frame
            .buffer
            .set_string(area.x, area.y, " flightdeck ", theme::title());
        for id in StrategyId::ALL {
            let style = if *id == self.active {
                theme::tab_active()
            } else {
                theme::tab()
            };
            let label = format!(" {} [{}] ", id.title(), id.hotkey());
            x = frame.buffer.set_string(x + 1, area.y, &label, style);
        }
    }

    fn render_status(&self, area: Rect, frame: &mut Frame) {
        frame.buffer.fill(area, Cell::styled(' ', theme::status()));
        let mut text = format!(
            " {total} flights · rev {rev}",
            total = self.source.len(),
            rev = self.source.revision(),
        );
        let note = self.strategy().status_note();
        if !note.is_empty() {
            text.push_str(" · ");
            text.push_str(&note);
        }
        text.push_str(" · q quit · l/s/t strategy · r reload · e end · d delete");
        let x = frame.buffer.set_string(area.x, area.y, &text, theme::status());
        if self.in_flight() > 0 {
            frame
                .buffer
                .set_string(x + 1, area.y, "· loading…", theme::loading());
        }
    }
}

impl Model for App {
    type Message = Event;

    fn init(&mut self) -> Cmd<Event> {
        self.start_first_load();
        self.schedule()
    }

    fn update(&mut self, msg: Event) -> Cmd<Event> {
        match msg {
            Event::Key(key) => self.on_key(key),
            Event::Mouse(mouse) => {
                let total = self.source.len();
                self.strategy_mut().handle_scroll(mouse.direction, total);
                self.maybe_load_more();
                Cmd::none()
            }
            Event::Tick => self.on_tick(),
            Event::Resize { .. } => Cmd::none(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 3 {
            return;
        }
        self.render_tabs(Rect::new(0, 0, area.width, 1), frame);
        let body = Rect::new(0, 1, area.width, area.height - 2);
        self.strategy()
            .render(body, frame, self.source.flights());
        self.render_status(Rect::new(0, area.height - 1, area.width, 1), frame);
    }
}

#[cfg(test)]
mod tests {
    use flightdeck_runtime::Pump;

    use super::*;

    fn app(page_size: usize) -> App {
        App::new(
            FlightSource::new().with_page_size(page_size),
            StrategyId::List,
        )
    }

    const WAIT: Duration = Duration::from_secs(5);

    fn settle(pump: &mut Pump<App>) {
        let model = pump.model_mut();
        assert!(model.source_mut().wait(WAIT).changed());
        model.on_tick(); // clamp + queued scroll + pagination trigger
    }

    #[test]
    fn init_requests_first_page_and_a_tick() {
        let mut pump = Pump::new(app(10));
        pump.init();
        assert_eq!(pump.model().in_flight(), 1);
        assert_eq!(pump.tick_rate(), Some(TICK_BUSY));
        settle(&mut pump);
        assert_eq!(pump.model().source().len(), 10);
        assert_eq!(pump.model().in_flight(), 0);
    }

    #[test]
    fn tick_cadence_relaxes_once_loads_settle() {
        let mut pump = Pump::new(app(10));
        pump.init();
        settle(&mut pump);
        pump.tick();
        assert_eq!(pump.tick_rate(), Some(TICK_IDLE));
    }

    #[test]
    fn hotkeys_switch_strategy_and_restart_the_source() {
        let mut pump = Pump::new(app(10));
        pump.init();
        settle(&mut pump);
        let first_revision = pump.model().source().revision();

        pump.event(Event::Key(KeyEvent::new(KeyCode::Char('t'))));
        assert_eq!(pump.model().active(), StrategyId::Table);
        assert!(pump.model().source().is_empty()); // reset took effect
        assert!(pump.model().source().revision() > first_revision);
        assert_eq!(pump.model().in_flight(), 1); // fresh first page requested
    }

    #[test]
    fn switching_to_the_active_strategy_is_a_noop() {
        let mut pump = Pump::new(app(10));
        pump.init();
        settle(&mut pump);
        let revision = pump.model().source().revision();
        pump.event(Event::Key(KeyEvent::new(KeyCode::Char('l'))));
        assert_eq!(pump.model().source().revision(), revision);
        assert_eq!(pump.model().source().len(), 10);
    }

    #[test]
    fn scroll_to_end_queues_until_data_arrives() {
        let mut pump = Pump::new(app(10));
        pump.init();
        // Requested before the first page has landed.
        pump.event(Event::Key(KeyEvent::new(KeyCode::End)));
        assert!(pump.model().scroll_to_end_pending());

        settle(&mut pump);
        assert!(!pump.model().scroll_to_end_pending()); // consumed exactly once
    }

    #[test]
    fn delete_removes_the_selected_record() {
        let mut pump = Pump::new(app(10));
        pump.init();
        settle(&mut pump);
        let _ = pump.render(40, 10); // size the window so selection works
        pump.event(Event::Key(KeyEvent::new(KeyCode::Down)));
        let doomed = pump.model().source().flights()[0].id;

        pump.event(Event::Key(KeyEvent::new(KeyCode::Char('d'))));
        assert_eq!(pump.model().source().len(), 9);
        assert!(pump.model().source().flights().iter().all(|f| f.id != doomed));
    }

    #[test]
    fn delete_without_selection_is_a_noop() {
        let mut pump = Pump::new(app(10));
        pump.init();
        settle(&mut pump);
        let revision = pump.model().source().revision();
        pump.event(Event::Key(KeyEvent::new(KeyCode::Char('d'))));
        assert_eq!(pump.model().source().revision(), revision);
    }

    #[test]
    fn quit_keys_quit() {
        let mut pump = Pump::new(app(10));
        pump.event(Event::Key(KeyEvent::new(KeyCode::Char('q'))));
        assert!(pump.is_quit());
        let mut pump = Pump::new(app(10));
        pump.event(Event::Key(KeyEvent::new(KeyCode::Esc)));
        assert!(pump.is_quit());
    }

    #[test]
    fn reaching_the_end_requests_the_next_page_once() {
        let mut pump = Pump::new(app(10));
        pump.init();
        settle(&mut pump);
        let _ = pump.render(40, 10);

        pump.event(Event::Key(KeyEvent::new(KeyCode::End)));
        let _ = pump.render(40, 10);
        pump.tick(); // rising edge: request
        assert_eq!(pump.model().in_flight(), 1);

        // Once the page lands the window is no longer at the end, so the
        // trigger must not re-fire.
        assert!(pump.model_mut().source_mut().wait(WAIT).changed());
        pump.tick();
        assert_eq!(pump.model().in_flight(), 0);
        assert_eq!(pump.model().source().len(), 20);
    }

    #[test]
    fn view_has_tabs_body_and_status() {
        let mut pump = Pump::new(app(10));
        pump.init();
        settle(&mut pump);
        let frame = pump.render(80, 12);
        let top = frame.buffer.row_text(0);
        assert!(top.contains("flightdeck"));
        assert!(top.contains("List [l]"));
        assert!(frame.buffer.row_text(11).contains("10 flights"));
    }
}
