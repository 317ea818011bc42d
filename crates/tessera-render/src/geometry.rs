//! Points and frames, in points relative to the parent view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A frame at the origin.
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Same size, at the origin.
    pub fn bounds(&self) -> Frame {
        Frame::sized(self.width, self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }

    /// Removes `amount` from the top edge.
    pub fn inset_top(&self, amount: f32) -> Frame {
        let amount = amount.min(self.height);
        Frame::new(self.x, self.y + amount, self.width, self.height - amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_top_clamps() {
        let frame = Frame::sized(375.0, 667.0).inset_top(64.0);
        assert_eq!(frame, Frame::new(0.0, 64.0, 375.0, 603.0));
        assert_eq!(Frame::sized(10.0, 10.0).inset_top(20.0).height, 0.0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let frame = Frame::new(10.0, 10.0, 5.0, 5.0);
        assert!(frame.contains(Point { x: 10.0, y: 14.9 }));
        assert!(!frame.contains(Point { x: 15.0, y: 12.0 }));
    }
}
