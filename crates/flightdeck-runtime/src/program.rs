//! The update/view loop and its command vocabulary.
//!
//! The program runtime separates state ([`Model`]) from rendering and
//! provides a command pattern for side effects. Background work runs on
//! spawned threads via [`Cmd::Task`]; results return through an mpsc channel
//! and are applied on the loop thread, never concurrently with an update.
//!
//! # Example
//!
//! ```ignore
//! use flightdeck_core::event::Event;
//! use flightdeck_render::Frame;
//! use flightdeck_runtime::{Cmd, Model, Program};
//!
//! struct Counter { count: i64 }
//!
//! enum Msg { Bump, Quit, Noop }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             Event::Key(k) if k.is_char('+') => Msg::Bump,
//!             _ => Msg::Noop,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Bump => { self.count += 1; Cmd::none() }
//!             Msg::Quit => Cmd::quit(),
//!             Msg::Noop => Cmd::none(),
//!         }
//!     }
//!     fn view(&self, frame: &mut Frame) { /* draw */ }
//! }
//! ```

use std::io::{self, Stdout, Write};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant};

use crossterm::{cursor, event as ct_event, execute, queue, style, terminal};
use tracing::{debug, trace};

use flightdeck_core::event::Event;
use flightdeck_render::buffer::Buffer;
use flightdeck_render::frame::Frame;
use flightdeck_render::style::{Color, Style};

/// Application state and behavior.
pub trait Model: Sized {
    /// Message type driving state transitions. Must be convertible from
    /// canonical events so the runtime can feed input straight to `update`.
    type Message: From<Event> + Send + 'static;

    /// Startup commands. Called once before the first render.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// The core state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state.
    fn view(&self, frame: &mut Frame);
}

/// Side effects returned from `init()` and `update()`.
#[derive(Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Quit the program.
    Quit,
    /// Execute several commands (sequentially).
    Batch(Vec<Cmd<M>>),
    /// Feed a message back into `update`.
    Msg(M),
    /// Deliver `Event::Tick` repeatedly at this cadence until rescheduled.
    Tick(Duration),
    /// Run a blocking closure on a background thread; its return value is
    /// delivered back to `update` on the loop thread.
    Task(Box<dyn FnOnce() -> M + Send>),
}

impl<M: std::fmt::Debug> std::fmt::Debug for Cmd<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Quit => write!(f, "Quit"),
            Self::Batch(cmds) => f.debug_tuple("Batch").field(cmds).finish(),
            Self::Msg(m) => f.debug_tuple("Msg").field(m).finish(),
            Self::Tick(d) => f.debug_tuple("Tick").field(d).finish(),
            Self::Task(_) => write!(f, "Task(..)"),
        }
    }
}

impl<M> Cmd<M> {
    /// No-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Quit command.
    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Message command.
    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    /// Batch of commands; flattens the trivial cases.
    pub fn batch(cmds: Vec<Self>) -> Self {
        if cmds.is_empty() {
            Self::None
        } else if cmds.len() == 1 {
            cmds.into_iter().next().unwrap()
        } else {
            Self::Batch(cmds)
        }
    }

    /// Recurring tick command.
    #[inline]
    pub fn tick(period: Duration) -> Self {
        Self::Tick(period)
    }

    /// Background task command.
    pub fn task<F>(f: F) -> Self
    where
        F: FnOnce() -> M + Send + 'static,
    {
        Self::Task(Box::new(f))
    }
}

/// Program runtime configuration.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Use the alternate screen.
    pub alt_screen: bool,
    /// Capture mouse input.
    pub mouse: bool,
    /// Input poll timeout when no tick is due sooner.
    pub poll_timeout: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            alt_screen: true,
            mouse: false,
            poll_timeout: Duration::from_millis(100),
        }
    }
}

impl ProgramConfig {
    /// Enable mouse capture.
    #[must_use]
    pub fn with_mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }
}

/// The program runtime: owns the terminal for its whole lifetime.
pub struct Program<M: Model> {
    model: M,
    config: ProgramConfig,
    stdout: Stdout,
    running: bool,
    dirty: bool,
    width: u16,
    height: u16,
    tick_rate: Option<Duration>,
    last_tick: Instant,
    /// Last presented buffer; `None` forces a full repaint.
    presented: Option<Buffer>,
    task_tx: Sender<M::Message>,
    task_rx: Receiver<M::Message>,
    task_handles: Vec<std::thread::JoinHandle<()>>,
}

impl<M: Model> Program<M> {
    /// Create a program with default configuration.
    pub fn new(model: M) -> io::Result<Self> {
        Self::with_config(model, ProgramConfig::default())
    }

    /// Create a program, entering raw mode (and the alt screen) immediately.
    pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if config.alt_screen {
            execute!(stdout, terminal::EnterAlternateScreen)?;
        }
        if config.mouse {
            execute!(stdout, ct_event::EnableMouseCapture)?;
        }
        execute!(stdout, cursor::Hide)?;

        let (width, height) = terminal::size().unwrap_or((80, 24));
        let (task_tx, task_rx) = channel();
        Ok(Self {
            model,
            config,
            stdout,
            running: true,
            dirty: true,
            width: width.max(1),
            height: height.max(1),
            tick_rate: None,
            last_tick: Instant::now(),
            presented: None,
            task_tx,
            task_rx,
            task_handles: Vec::new(),
        })
    }

    /// Run the main event loop until a `Cmd::Quit`.
    pub fn run(&mut self) -> io::Result<()> {
        let cmd = self.model.init();
        self.execute_cmd(cmd);
        self.render_frame()?;

        while self.running {
            let timeout = self.effective_timeout();
            if ct_event::poll(timeout)? {
                // Drain everything pending before rendering once.
                loop {
                    let raw = ct_event::read()?;
                    if let Some(event) = Event::from_crossterm(raw) {
                        self.handle_event(event);
                    }
                    if !ct_event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }

            self.process_task_results();
            self.reap_finished_tasks();

            if self.tick_due() {
                self.handle_event(Event::Tick);
            }

            if self.dirty && self.running {
                self.render_frame()?;
            }
        }
        Ok(())
    }

    /// The model, for inspection after `run` returns.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Resize { width, height } = event {
            debug!(width, height, "terminal resized");
            self.width = width.max(1);
            self.height = height.max(1);
            // Stale diff base would paint garbage at the new size.
            self.presented = None;
        }
        let cmd = self.model.update(M::Message::from(event));
        self.dirty = true;
        self.execute_cmd(cmd);
    }

    fn process_task_results(&mut self) {
        while let Ok(msg) = self.task_rx.try_recv() {
            let cmd = self.model.update(msg);
            self.dirty = true;
            self.execute_cmd(cmd);
        }
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => {
                let next = self.model.update(m);
                self.dirty = true;
                self.execute_cmd(next);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Tick(period) => {
                self.tick_rate = Some(period);
                self.last_tick = Instant::now();
            }
            Cmd::Task(f) => {
                let sender = self.task_tx.clone();
                let handle = std::thread::spawn(move || {
                    let msg = f();
                    let _ = sender.send(msg);
                });
                self.task_handles.push(handle);
            }
        }
    }

    fn reap_finished_tasks(&mut self) {
        if self.task_handles.is_empty() {
            return;
        }
        let mut remaining = Vec::with_capacity(self.task_handles.len());
        for handle in self.task_handles.drain(..) {
            if handle.is_finished() {
                let _ = handle.join();
            } else {
                remaining.push(handle);
            }
        }
        self.task_handles = remaining;
    }

    fn effective_timeout(&self) -> Duration {
        match self.tick_rate {
            Some(rate) => rate
                .saturating_sub(self.last_tick.elapsed())
                .min(self.config.poll_timeout),
            None => self.config.poll_timeout,
        }
    }

    fn tick_due(&mut self) -> bool {
        match self.tick_rate {
            Some(rate) if self.last_tick.elapsed() >= rate => {
                self.last_tick = Instant::now();
                true
            }
            _ => false,
        }
    }

    fn render_frame(&mut self) -> io::Result<()> {
        let mut frame = Frame::new(self.width, self.height);
        self.model.view(&mut frame);
        self.present(&frame)?;
        self.dirty = false;
        Ok(())
    }

    /// Write the frame to the terminal, diffed against the previous one.
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        let changes = match &self.presented {
            Some(previous) => frame.buffer.diff(previous),
            None => {
                queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
                frame.buffer.diff(&Buffer::new(frame.width(), frame.height()))
            }
        };
        trace!(changed = changes.len(), "presenting frame");

        let mut last_style: Option<Style> = None;
        for (x, y, cell) in changes {
            queue!(self.stdout, cursor::MoveTo(x, y))?;
            if last_style != Some(cell.style) {
                apply_style(&mut self.stdout, cell.style)?;
                last_style = Some(cell.style);
            }
            queue!(self.stdout, style::Print(cell.symbol))?;
        }
        queue!(self.stdout, style::ResetColor)?;
        queue!(
            self.stdout,
            style::SetAttribute(style::Attribute::Reset)
        )?;
        self.stdout.flush()?;
        self.presented = Some(frame.buffer.clone());
        Ok(())
    }
}

impl<M: Model> Drop for Program<M> {
    fn drop(&mut self) {
        // Restore the terminal even on panic-driven unwinds.
        if self.config.mouse {
            let _ = execute!(self.stdout, ct_event::DisableMouseCapture);
        }
        let _ = execute!(self.stdout, cursor::Show);
        if self.config.alt_screen {
            let _ = execute!(self.stdout, terminal::LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}

fn apply_style(out: &mut Stdout, s: Style) -> io::Result<()> {
    queue!(out, style::ResetColor, style::SetAttribute(style::Attribute::Reset))?;
    if let Some(fg) = s.fg {
        queue!(out, style::SetForegroundColor(to_crossterm(fg)))?;
    }
    if let Some(bg) = s.bg {
        queue!(out, style::SetBackgroundColor(to_crossterm(bg)))?;
    }
    if s.bold {
        queue!(out, style::SetAttribute(style::Attribute::Bold))?;
    }
    if s.dim {
        queue!(out, style::SetAttribute(style::Attribute::Dim))?;
    }
    if s.reversed {
        queue!(out, style::SetAttribute(style::Attribute::Reverse))?;
    }
    Ok(())
}

fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Reset => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Yellow => style::Color::Yellow,
        Color::Blue => style::Color::Blue,
        Color::Magenta => style::Color::Magenta,
        Color::Cyan => style::Color::Cyan,
        Color::Gray => style::Color::Grey,
        Color::DarkGray => style::Color::DarkGrey,
        Color::White => style::Color::White,
        Color::Indexed(i) => style::Color::AnsiValue(i),
        Color::Rgb(r, g, b) => style::Color::Rgb { r, g, b },
    }
}
