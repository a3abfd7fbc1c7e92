//! Basic geometry types for layout and hit testing.
//!
//! All coordinates are logical pixels in the window's coordinate space, with
//! the y axis growing downward.

use serde::{Deserialize, Serialize};

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin point (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// A size in 2D space (width and height).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Check if the size has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A rectangle defined by origin and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Create a rectangle from an origin point and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Empty rectangle at origin.
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Check if the rectangle is empty (zero or negative size).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a point is inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom exclusive.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Convert to an AccessKit rectangle.
    pub fn to_accesskit(self) -> accesskit::Rect {
        accesskit::Rect {
            x0: self.left() as f64,
            y0: self.top() as f64,
            x1: self.right() as f64,
            y1: self.bottom() as f64,
        }
    }
}
