//! Integer pixel geometry shared by the popup components.

use serde::{Deserialize, Serialize};

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Pointer offset relative to the start of a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Requested content size. `None` (or a negative value) means "auto":
/// a fraction of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentSize {
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl ContentSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
        }
    }

    pub const fn auto() -> Self {
        Self {
            width: None,
            height: None,
        }
    }
}

impl From<Size> for ContentSize {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Requested top/left offset; missing components are centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub top: Option<i32>,
    pub left: Option<i32>,
}

impl Placement {
    pub const fn centered() -> Self {
        Self {
            top: None,
            left: None,
        }
    }

    pub const fn at(top: i32, left: i32) -> Self {
        Self {
            top: Some(top),
            left: Some(left),
        }
    }
}

/// Absolute placement of the full window chrome, shadow ring included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OuterBounds {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

impl OuterBounds {
    pub const fn new(top: i32, left: i32, width: i32, height: i32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Check if the point (x, y) in viewport coordinates is inside the bounds
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_edges() {
        let b = OuterBounds::new(50, 40, 300, 200);
        assert_eq!(b.right(), 340);
        assert_eq!(b.bottom(), 250);
        assert!(b.contains(40, 50));
        assert!(!b.contains(340, 50));
        assert!(!b.contains(39, 100));
    }

    #[test]
    fn test_point_sub() {
        assert_eq!(Point::new(5, -3) - Point::new(2, 4), Point::new(3, -7));
    }
}
