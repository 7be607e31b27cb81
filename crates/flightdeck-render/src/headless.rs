//! Headless frame snapshots for CI testing.
//!
//! Wraps a [`Frame`] with assertion helpers so widget and strategy tests can
//! verify rendered output without a terminal or PTY:
//!
//! ```
//! use flightdeck_render::headless::Snapshot;
//! use flightdeck_render::{Frame, Style};
//!
//! let mut frame = Frame::new(20, 2);
//! frame.buffer.set_string(0, 0, "PAO -> JFK", Style::new());
//! let snap = Snapshot::of(&frame);
//! assert_eq!(snap.row(0), "PAO -> JFK");
//! snap.assert_matches(&["PAO -> JFK", ""]);
//! ```

use crate::frame::Frame;

/// A plain-text capture of a rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    rows: Vec<String>,
}

impl Snapshot {
    /// Capture every row of `frame`, trailing blanks trimmed.
    #[must_use]
    pub fn of(frame: &Frame) -> Self {
        let rows = (0..frame.height())
            .map(|y| frame.buffer.row_text(y))
            .collect();
        Self { rows }
    }

    /// Number of captured rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Text of one row; empty for out-of-bounds rows.
    #[must_use]
    pub fn row(&self, y: usize) -> &str {
        self.rows.get(y).map_or("", String::as_str)
    }

    /// All rows joined by newlines.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.rows.join("\n")
    }

    /// True when some row contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.rows.iter().any(|row| row.contains(needle))
    }

    /// Index of the first row containing `needle`.
    #[must_use]
    pub fn find_row(&self, needle: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.contains(needle))
    }

    /// Assert the snapshot matches `expected` row for row.
    ///
    /// # Panics
    ///
    /// Panics with a two-column diff when any row differs.
    pub fn assert_matches(&self, expected: &[&str]) {
        if self.rows.len() == expected.len()
            && self.rows.iter().zip(expected).all(|(a, b)| a == b)
        {
            return;
        }
        let mut report = String::from("snapshot mismatch:\n");
        let height = self.rows.len().max(expected.len());
        for y in 0..height {
            let got = self.rows.get(y).map_or("", String::as_str);
            let want = expected.get(y).copied().unwrap_or("");
            let marker = if got == want { ' ' } else { '!' };
            report.push_str(&format!("{marker} {y:>3} |{got}| expected |{want}|\n"));
        }
        panic!("{report}");
    }
}
