use serde::{Deserialize, Serialize};

/// A pointer position in screen pixels (origin at the top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns `(dx, dy)` such that `previous.offset_by(dx, dy) == self`.
    pub fn delta_from(self, previous: Point) -> (i32, i32) {
        (
            self.x.saturating_sub(previous.x),
            self.y.saturating_sub(previous.y),
        )
    }

    /// Returns this point moved by `(dx, dy)`, saturating at the `i32` range.
    pub fn offset_by(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}
