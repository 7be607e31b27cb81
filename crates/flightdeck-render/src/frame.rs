//! The render target for one pass.

use flightdeck_core::geometry::Rect;

use crate::buffer::Buffer;

/// The render target `Model::view()` writes into.
///
/// Frames are ephemeral: the runtime creates one per render pass, hands it to
/// the model, then diffs it against the previously presented frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,
}

impl Frame {
    /// Create a blank frame.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
        }
    }

    /// Frame width in columns.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Full-frame rectangle.
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.buffer.area()
    }
}
