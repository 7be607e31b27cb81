//! The cell grid widgets draw into.

use flightdeck_core::geometry::Rect;
use flightdeck_core::text_width::char_width;

use crate::cell::Cell;
use crate::style::Style;

/// A width × height grid of [`Cell`]s with clipped writes.
///
/// All drawing APIs clip to the grid: out-of-bounds writes are silently
/// dropped so widgets never need their own bounds checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is 0.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0, "width must be > 0");
        assert!(height > 0, "height must be > 0");
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; size],
        }
    }

    /// Grid width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Full-grid rectangle.
    #[must_use]
    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Cell at (x, y), if in bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Overwrite the cell at (x, y); out of bounds is a no-op.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Write a string starting at (x, y), clipped to the row.
    ///
    /// Wide glyphs consume extra columns; a wide glyph that would straddle
    /// the right edge is dropped. Returns the column after the last cell
    /// written.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) -> u16 {
        if y >= self.height {
            return x;
        }
        let mut col = x;
        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if col >= self.width || col + w > self.width {
                break;
            }
            self.set(col, y, Cell::styled(ch, style));
            // Blank the continuation columns of wide glyphs.
            for extra in 1..w {
                self.set(col + extra, y, Cell::styled(' ', style));
            }
            col += w;
        }
        col
    }

    /// Merge `style` onto every cell in `rect` (clipped).
    pub fn set_style_area(&mut self, rect: Rect, style: Style) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize);
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize);
        if rect.x as usize >= x_end || rect.y as usize >= y_end {
            return;
        }
        for y in rect.y as usize..y_end {
            let row = y * self.width as usize;
            for i in row + rect.x as usize..row + x_end {
                let cell = &mut self.cells[i];
                cell.style = cell.style.merge(style);
            }
        }
    }

    /// Fill `rect` with copies of `cell` (clipped).
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize);
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize);
        if rect.x as usize >= x_end || rect.y as usize >= y_end {
            return;
        }
        for y in rect.y as usize..y_end {
            let row = y * self.width as usize;
            self.cells[row + rect.x as usize..row + x_end].fill(cell);
        }
    }

    /// Cells that differ from `other`, as (x, y, cell) triples.
    ///
    /// Used by the presenter to emit minimal terminal writes. Buffers of
    /// different sizes are entirely different.
    #[must_use]
    pub fn diff<'a>(&'a self, other: &Buffer) -> Vec<(u16, u16, &'a Cell)> {
        if self.width != other.width || self.height != other.height {
            return self
                .cells
                .iter()
                .enumerate()
                .map(|(i, cell)| self.coords_of(i, cell))
                .collect();
        }
        self.cells
            .iter()
            .zip(&other.cells)
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, (cell, _))| self.coords_of(i, cell))
            .collect()
    }

    #[inline]
    fn coords_of<'a>(&self, i: usize, cell: &'a Cell) -> (u16, u16, &'a Cell) {
        let x = (i % self.width as usize) as u16;
        let y = (i / self.width as usize) as u16;
        (x, y, cell)
    }

    /// Text of one row, trailing blanks trimmed. Empty for out-of-bounds rows.
    #[must_use]
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let row = y as usize * self.width as usize;
        let text: String = self.cells[row..row + self.width as usize]
            .iter()
            .map(|c| c.symbol)
            .collect();
        text.trim_end().to_string()
    }
}
