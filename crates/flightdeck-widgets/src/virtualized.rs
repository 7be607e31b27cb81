//! Virtualization state for efficient rendering of large lists.
//!
//! The demo's collections reach hundreds of thousands of rows; only the
//! visible window may ever be formatted or drawn. [`VirtualizedListState`]
//! owns the scroll/selection math for that window. The items themselves stay
//! wherever they live (the data source); the state only works with lengths
//! and indices, so it cannot hold a stale reference to a row.

use std::cell::Cell as StdCell;
use std::ops::Range;

/// Scroll and selection state for a fixed-row-height virtualized list.
#[derive(Debug, Clone)]
pub struct VirtualizedListState {
    /// Selected item index, if any.
    pub selected: Option<usize>,
    scroll_offset: usize,
    /// Rows per item.
    row_height: u16,
    /// Items visible in the last computed window (cached from render).
    visible_count: StdCell<usize>,
}

impl Default for VirtualizedListState {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualizedListState {
    /// State with one row per item, scrolled to the top, nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            row_height: 1,
            visible_count: StdCell::new(0),
        }
    }

    /// Use `rows` rows per item (e.g. bordered rows).
    #[must_use]
    pub fn with_row_height(mut self, rows: u16) -> Self {
        self.row_height = rows.max(1);
        self
    }

    /// Index of the first visible item.
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Items visible in the last computed window.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible_count.get()
    }

    /// Rows per item.
    #[must_use]
    pub const fn row_height(&self) -> u16 {
        self.row_height
    }

    /// Compute the visible item window for a viewport of `viewport_height`
    /// rows over `total` items, caching the visible count for paging.
    #[must_use]
    pub fn visible_range(&self, total: usize, viewport_height: u16) -> Range<usize> {
        if total == 0 || viewport_height == 0 {
            self.visible_count.set(0);
            return 0..0;
        }
        let per_screen = (viewport_height / self.row_height).max(1) as usize;
        let start = self.scroll_offset.min(total - 1);
        let end = (start + per_screen).min(total);
        self.visible_count.set(end - start);
        start..end
    }

    /// Scroll by `delta` items (positive = toward the end), clamped.
    pub fn scroll(&mut self, delta: i64, total: usize) {
        if total == 0 {
            return;
        }
        let visible = self.visible_count.get();
        let max_offset = if visible > 0 {
            total.saturating_sub(visible)
        } else {
            total - 1
        };
        let next = (self.scroll_offset as i64 + delta)
            .max(0)
            .min(max_offset as i64);
        self.scroll_offset = next as usize;
    }

    /// Scroll so the item at `idx` is the first visible one (clamped).
    pub fn scroll_to(&mut self, idx: usize, total: usize) {
        self.scroll_offset = idx.min(total.saturating_sub(1));
    }

    /// Scroll to the top.
    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll so the last item is visible.
    pub fn scroll_to_bottom(&mut self, total: usize) {
        let visible = self.visible_count.get();
        if total > visible && visible > 0 {
            self.scroll_offset = total - visible;
        } else {
            self.scroll_offset = 0;
        }
    }

    /// Scroll one viewport toward the top.
    pub fn page_up(&mut self, total: usize) {
        let visible = self.visible_count.get();
        if visible > 0 {
            self.scroll(-(visible as i64), total);
        }
    }

    /// Scroll one viewport toward the end.
    pub fn page_down(&mut self, total: usize) {
        let visible = self.visible_count.get();
        if visible > 0 {
            self.scroll(visible as i64, total);
        }
    }

    /// True when the last item is inside the visible window.
    #[must_use]
    pub fn is_at_bottom(&self, total: usize) -> bool {
        let visible = self.visible_count.get();
        total <= visible || self.scroll_offset >= total - visible
    }

    /// Move the selection down one item, clamped to the end.
    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        });
        self.scroll_selected_into_view(total);
    }

    /// Move the selection up one item, clamped to the start.
    pub fn select_previous(&mut self, total: usize) {
        if total == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => i.saturating_sub(1),
            None => 0,
        });
        self.scroll_selected_into_view(total);
    }

    /// Clamp the selection after the collection shrank.
    pub fn clamp_selection(&mut self, total: usize) {
        match (self.selected, total) {
            (_, 0) => self.selected = None,
            (Some(i), _) if i >= total => self.selected = Some(total - 1),
            _ => {}
        }
    }

    /// Drop selection and scroll back to the top (strategy reset).
    pub fn reset(&mut self) {
        self.selected = None;
        self.scroll_offset = 0;
        self.visible_count.set(0);
    }

    fn scroll_selected_into_view(&mut self, total: usize) {
        let Some(idx) = self.selected else { return };
        let visible = self.visible_count.get();
        if visible == 0 {
            return;
        }
        if idx < self.scroll_offset {
            self.scroll_offset = idx;
        } else if idx >= self.scroll_offset + visible {
            self.scroll_offset = (idx + 1 - visible).min(total.saturating_sub(1));
        }
    }
}
