#![forbid(unsafe_code)]

//! Core: normalized input events, geometry, and logging.
//!
//! # Role in flightdeck
//! `flightdeck-core` is the input layer. It owns the canonical event types the
//! runtime consumes and the small shared vocabulary (rectangles, display
//! widths, tracing setup) every other crate builds on.
//!
//! The render kernel (`flightdeck-render`) is independent of input, so this
//! crate is the clean bridge between terminal I/O and the deterministic
//! render pipeline.

pub mod event;
pub mod geometry;
pub mod logging;

pub mod text_width {
    //! Shared display width helpers for layout and rendering.

    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    /// Fast-path width for pure printable ASCII.
    #[inline]
    #[must_use]
    pub fn ascii_width(text: &str) -> Option<usize> {
        if text.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
            Some(text.len())
        } else {
            None
        }
    }

    /// Width of a single Unicode scalar in terminal cells.
    #[inline]
    #[must_use]
    pub fn char_width(ch: char) -> usize {
        if ch.is_ascii() {
            return match ch {
                ' '..='~' => 1,
                _ => 0,
            };
        }
        ch.width().unwrap_or(0)
    }

    /// Width of a string in terminal cells.
    #[inline]
    #[must_use]
    pub fn display_width(text: &str) -> usize {
        if let Some(width) = ascii_width(text) {
            return width;
        }
        text.width()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn ascii_fast_path() {
            assert_eq!(ascii_width("PAO -> JFK"), Some(10));
            assert_eq!(ascii_width("café"), None);
        }

        #[test]
        fn wide_glyphs_count_double() {
            assert_eq!(display_width("空港"), 4);
        }

        #[test]
        fn control_chars_are_zero_width() {
            assert_eq!(char_width('\u{0007}'), 0);
        }
    }
}
