//! Element geometry.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Position and size of a positioned element, in page pixels.
///
/// Width and height are not clamped: a resize gesture may drive them to zero
/// or below, and the frame records that as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Top-left corner.
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    /// Create a new frame.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
        }
    }

    /// Create a frame from a top-left corner and a size.
    pub fn from_origin_size(position: Point, size: Size) -> Self {
        Self::new(position, size.width, size.height)
    }

    /// Move the top-left corner to `position`, keeping the size.
    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }

    /// Set the size so the bottom-right corner lands on `corner`,
    /// measured from `anchor`.
    pub fn resize_from(&mut self, anchor: Point, corner: Point) {
        self.width = corner.x - anchor.x;
        self.height = corner.y - anchor.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_keeps_size() {
        let mut frame = Frame::from_origin_size(Point::new(10.0, 20.0), Size::new(100.0, 50.0));
        frame.move_to(Point::new(-5.0, 40.0));
        assert_eq!(frame.position, Point::new(-5.0, 40.0));
        assert_eq!((frame.width, frame.height), (100.0, 50.0));
    }

    #[test]
    fn test_resize_allows_negative() {
        let mut frame = Frame::new(Point::new(100.0, 100.0), 50.0, 50.0);
        frame.resize_from(frame.position, Point::new(60.0, 90.0));
        assert_eq!(frame.width, -40.0);
        assert_eq!(frame.height, -10.0);
    }
}
