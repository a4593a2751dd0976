//! The drawing surface the renderer paints on.
//!
//! Coordinates are pixels with the origin at the top-left corner and `y`
//! growing downward.

use std::io;

use super::theme::Rgb;

/// An axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height - 1
    }
}

/// Primitive drawing operations needed by the renderer.
///
/// Every primitive uses the colour from the most recent `set_color`.
pub trait Surface {
    fn set_color(&mut self, color: Rgb);

    /// Discard the previous frame and fill with the current colour.
    fn clear(&mut self);

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);

    /// Outline of `rect`.
    fn draw_rect(&mut self, rect: PixelRect);

    /// Draw `text` with its top-left corner at `(x, y)`; returns its size in pixels.
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> (i32, i32);

    /// Show the completed frame.
    fn present(&mut self) -> io::Result<()>;
}
