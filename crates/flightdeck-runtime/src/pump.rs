//! Headless command pump for driving models in tests.
//!
//! [`Pump`] executes the same command vocabulary as [`Program`](crate::Program)
//! but without a terminal: events are injected, frames are rendered on
//! demand, and background task results can be awaited deterministically.
//!
//! ```
//! use flightdeck_core::event::Event;
//! use flightdeck_render::Frame;
//! use flightdeck_runtime::{Cmd, Model, Pump};
//!
//! struct Tally(u32);
//! struct Msg;
//! impl From<Event> for Msg {
//!     fn from(_: Event) -> Self {
//!         Msg
//!     }
//! }
//! impl Model for Tally {
//!     type Message = Msg;
//!     fn update(&mut self, _: Msg) -> Cmd<Msg> {
//!         self.0 += 1;
//!         Cmd::none()
//!     }
//!     fn view(&self, _: &mut Frame) {}
//! }
//!
//! let mut pump = Pump::new(Tally(0));
//! pump.event(Event::Tick);
//! assert_eq!(pump.model().0, 1);
//! ```

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use flightdeck_core::event::Event;
use flightdeck_render::frame::Frame;

use crate::program::{Cmd, Model};

/// Headless driver for a [`Model`].
pub struct Pump<M: Model> {
    model: M,
    quit: bool,
    tick_rate: Option<Duration>,
    task_tx: Sender<M::Message>,
    task_rx: Receiver<M::Message>,
}

impl<M: Model> Pump<M> {
    /// Wrap a model without running `init`.
    #[must_use]
    pub fn new(model: M) -> Self {
        let (task_tx, task_rx) = channel();
        Self {
            model,
            quit: false,
            tick_rate: None,
            task_tx,
            task_rx,
        }
    }

    /// Run the model's `init` commands.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute(cmd);
    }

    /// Inject a canonical event.
    pub fn event(&mut self, event: Event) {
        self.message(M::Message::from(event));
    }

    /// Inject a message directly.
    pub fn message(&mut self, msg: M::Message) {
        let cmd = self.model.update(msg);
        self.execute(cmd);
    }

    /// Deliver one tick, as the program loop would.
    pub fn tick(&mut self) {
        self.event(Event::Tick);
    }

    /// Apply any already-completed background task results.
    pub fn drain_tasks(&mut self) {
        while let Ok(msg) = self.task_rx.try_recv() {
            self.message(msg);
        }
    }

    /// Block up to `timeout` for one task result, apply it (plus any others
    /// already queued), and report whether anything arrived.
    pub fn wait_task(&mut self, timeout: Duration) -> bool {
        match self.task_rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.message(msg);
                self.drain_tasks();
                true
            }
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Render into a fresh frame of the given size.
    #[must_use]
    pub fn render(&self, width: u16, height: u16) -> Frame {
        let mut frame = Frame::new(width, height);
        self.model.view(&mut frame);
        frame
    }

    /// The wrapped model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the wrapped model.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// True once a `Cmd::Quit` has been executed.
    #[must_use]
    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Currently requested tick cadence, if any.
    #[must_use]
    pub fn tick_rate(&self) -> Option<Duration> {
        self.tick_rate
    }

    fn execute(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.quit = true,
            Cmd::Msg(m) => self.message(m),
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute(c);
                }
            }
            Cmd::Tick(period) => self.tick_rate = Some(period),
            Cmd::Task(f) => {
                let sender = self.task_tx.clone();
                std::thread::spawn(move || {
                    let msg = f();
                    let _ = sender.send(msg);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use flightdeck_render::Style;

    #[derive(Default)]
    struct Counter {
        events: u32,
        loaded: Option<u64>,
        quit_on_next: bool,
    }

    enum Msg {
        Input,
        Loaded(u64),
    }

    impl From<Event> for Msg {
        fn from(_: Event) -> Self {
            Self::Input
        }
    }

    impl Model for Counter {
        type Message = Msg;

        fn init(&mut self) -> Cmd<Msg> {
            Cmd::batch(vec![
                Cmd::tick(Duration::from_millis(10)),
                Cmd::task(|| Msg::Loaded(41 + 1)),
            ])
        }

        fn update(&mut self, msg: Msg) -> Cmd<Msg> {
            match msg {
                Msg::Input => {
                    self.events += 1;
                    if self.quit_on_next {
                        Cmd::quit()
                    } else {
                        Cmd::none()
                    }
                }
                Msg::Loaded(value) => {
                    self.loaded = Some(value);
                    Cmd::none()
                }
            }
        }

        fn view(&self, frame: &mut Frame) {
            let text = format!("events={}", self.events);
            frame.buffer.set_string(0, 0, &text, Style::new());
        }
    }

    #[test]
    fn init_schedules_tick_and_spawns_task() {
        let mut pump = Pump::new(Counter::default());
        pump.init();
        assert_eq!(pump.tick_rate(), Some(Duration::from_millis(10)));
        assert!(pump.wait_task(Duration::from_secs(5)));
        assert_eq!(pump.model().loaded, Some(42));
    }

    #[test]
    fn events_flow_through_update_and_view() {
        let mut pump = Pump::new(Counter::default());
        pump.tick();
        pump.tick();
        let frame = pump.render(12, 1);
        assert_eq!(frame.buffer.row_text(0), "events=2");
    }

    #[test]
    fn quit_command_is_observable() {
        let mut pump = Pump::new(Counter::default());
        pump.model_mut().quit_on_next = true;
        pump.tick();
        assert!(pump.is_quit());
    }

    #[test]
    fn wait_task_times_out_without_pending_work() {
        let mut pump = Pump::new(Counter::default());
        assert!(!pump.wait_task(Duration::from_millis(20)));
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<u8>,
    }

    enum Rec {
        Noop,
        Value(u8),
    }

    impl From<Event> for Rec {
        fn from(_: Event) -> Self {
            Self::Noop
        }
    }

    impl Model for Recorder {
        type Message = Rec;

        fn update(&mut self, msg: Rec) -> Cmd<Rec> {
            if let Rec::Value(v) = msg {
                self.seen.push(v);
            }
            Cmd::none()
        }

        fn view(&self, _: &mut Frame) {}
    }

    proptest! {
        // Batches execute sequentially, so messages land in submission order
        // no matter how the batch was nested or sized.
        #[test]
        fn batch_applies_messages_in_order(values in prop::collection::vec(any::<u8>(), 0..32)) {
            let mut pump = Pump::new(Recorder::default());
            let cmds = values.iter().map(|&v| Cmd::msg(Rec::Value(v))).collect();
            pump.execute(Cmd::batch(cmds));
            prop_assert_eq!(&pump.model().seen, &values);
        }

        #[test]
        fn latest_tick_in_a_batch_wins(periods in prop::collection::vec(1u64..5_000, 1..8)) {
            let mut pump = Pump::new(Recorder::default());
            let cmds = periods
                .iter()
                .map(|&ms| Cmd::tick(Duration::from_millis(ms)))
                .collect();
            pump.execute(Cmd::batch(cmds));
            let last = *periods.last().unwrap();
            prop_assert_eq!(pump.tick_rate(), Some(Duration::from_millis(last)));
        }
    }
}
