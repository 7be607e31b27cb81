//! Canonical input events consumed by the runtime.
//!
//! Events are normalized away from any particular backend so models and
//! widgets can be driven headlessly in tests. With the `crossterm` feature
//! enabled, [`Event::from_crossterm`] converts backend input into this
//! vocabulary.

use bitflags::bitflags;

bitflags! {
    /// Keyboard modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT = 0b0000_0001;
        /// Control key.
        const CTRL = 0b0000_0010;
        /// Alt/Option key.
        const ALT = 0b0000_0100;
    }
}

/// Key identity, independent of modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Enter / Return.
    Enter,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Delete forward.
    Delete,
}

/// Press/repeat/release phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Initial press.
    #[default]
    Press,
    /// Auto-repeat while held.
    Repeat,
    /// Release.
    Release,
}

/// A single key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Which key.
    pub code: KeyCode,
    /// Held modifiers.
    pub modifiers: Modifiers,
    /// Press/repeat/release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A plain press of `code` with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    /// True for a press or repeat (the phases keybindings act on).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }

    /// True when this is a press of the given character without Ctrl/Alt.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.is_press()
            && self.code == KeyCode::Char(c)
            && !self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Mouse wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Wheel up (toward older rows).
    Up,
    /// Wheel down (toward newer rows).
    Down,
}

/// A mouse event. Only wheel scrolling is normalized; everything else a
/// backend reports is dropped at conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// Scroll direction.
    pub direction: ScrollDirection,
    /// Column under the cursor.
    pub column: u16,
    /// Row under the cursor.
    pub row: u16,
}

/// A canonical input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input.
    Key(KeyEvent),
    /// Mouse wheel input.
    Mouse(MouseEvent),
    /// Terminal resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },
    /// Periodic tick requested via `Cmd::tick`.
    Tick,
}

#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
impl Event {
    /// Convert a crossterm event, dropping anything without a canonical form.
    #[must_use]
    pub fn from_crossterm(event: crossterm::event::Event) -> Option<Self> {
        use crossterm::event as ct;

        match event {
            ct::Event::Key(key) => {
                let code = match key.code {
                    ct::KeyCode::Char(c) => KeyCode::Char(c),
                    ct::KeyCode::Enter => KeyCode::Enter,
                    ct::KeyCode::Esc => KeyCode::Esc,
                    ct::KeyCode::Backspace => KeyCode::Backspace,
                    ct::KeyCode::Tab => KeyCode::Tab,
                    ct::KeyCode::Up => KeyCode::Up,
                    ct::KeyCode::Down => KeyCode::Down,
                    ct::KeyCode::Left => KeyCode::Left,
                    ct::KeyCode::Right => KeyCode::Right,
                    ct::KeyCode::Home => KeyCode::Home,
                    ct::KeyCode::End => KeyCode::End,
                    ct::KeyCode::PageUp => KeyCode::PageUp,
                    ct::KeyCode::PageDown => KeyCode::PageDown,
                    ct::KeyCode::Delete => KeyCode::Delete,
                    _ => return None,
                };
                let mut modifiers = Modifiers::empty();
                if key.modifiers.contains(ct::KeyModifiers::SHIFT) {
                    modifiers |= Modifiers::SHIFT;
                }
                if key.modifiers.contains(ct::KeyModifiers::CONTROL) {
                    modifiers |= Modifiers::CTRL;
                }
                if key.modifiers.contains(ct::KeyModifiers::ALT) {
                    modifiers |= Modifiers::ALT;
                }
                let kind = match key.kind {
                    ct::KeyEventKind::Press => KeyEventKind::Press,
                    ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
                    ct::KeyEventKind::Release => KeyEventKind::Release,
                };
                Some(Self::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                }))
            }
            ct::Event::Mouse(mouse) => {
                let direction = match mouse.kind {
                    ct::MouseEventKind::ScrollUp => ScrollDirection::Up,
                    ct::MouseEventKind::ScrollDown => ScrollDirection::Down,
                    _ => return None,
                };
                Some(Self::Mouse(MouseEvent {
                    direction,
                    column: mouse.column,
                    row: mouse.row,
                }))
            }
            ct::Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}
