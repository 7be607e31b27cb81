//! Styles with inherit-by-default semantics.

/// A terminal color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Terminal default.
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    White,
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit color.
    Rgb(u8, u8, u8),
}

/// Visual style for a run of cells.
///
/// `None` fields inherit whatever is already in the target cell, so styles
/// compose by patching: a selection highlight can set only `bg` and leave the
/// row's foreground intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    /// Foreground color.
    pub fg: Option<Color>,
    /// Background color.
    pub bg: Option<Color>,
    /// Bold / increased intensity.
    pub bold: bool,
    /// Dim / decreased intensity.
    pub dim: bool,
    /// Reverse video.
    pub reversed: bool,
}

impl Style {
    /// An empty style (everything inherits).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            dim: false,
            reversed: false,
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Enable bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Enable dim.
    #[must_use]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Enable reverse video.
    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    /// Overlay `patch` on top of `self`; set fields win, unset inherit.
    #[must_use]
    pub fn merge(self, patch: Self) -> Self {
        Self {
            fg: patch.fg.or(self.fg),
            bg: patch.bg.or(self.bg),
            bold: self.bold || patch.bold,
            dim: self.dim || patch.dim,
            reversed: self.reversed || patch.reversed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_patch_colors() {
        let base = Style::new().fg(Color::White).bg(Color::Black);
        let patch = Style::new().bg(Color::Blue).bold();
        let merged = base.merge(patch);
        assert_eq!(merged.fg, Some(Color::White));
        assert_eq!(merged.bg, Some(Color::Blue));
        assert!(merged.bold);
    }

    #[test]
    fn default_is_fully_inheriting() {
        let s = Style::default();
        assert_eq!(s.fg, None);
        assert_eq!(s.bg, None);
        assert!(!s.bold && !s.dim && !s.reversed);
    }
}
