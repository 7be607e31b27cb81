//! A single terminal cell.

use crate::style::Style;

/// One cell of the grid: a scalar plus its style.
///
/// Multi-column glyphs occupy one `Cell` for the glyph and blank trailing
/// cells for the remainder of their width; the buffer's string writer takes
/// care of that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The displayed scalar.
    pub symbol: char,
    /// Style applied to the scalar.
    pub style: Style,
}

impl Cell {
    /// A blank, unstyled cell.
    pub const EMPTY: Self = Self {
        symbol: ' ',
        style: Style::new(),
    };

    /// Cell displaying `symbol` with `style`.
    #[must_use]
    pub const fn styled(symbol: char, style: Style) -> Self {
        Self { symbol, style }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}
