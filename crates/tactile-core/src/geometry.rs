//! Geometric primitives: `Point`, `Vector`, `Rect`, `Transform2D`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Calculate Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the line from `self` to `other`, in radians.
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> f32 {
        (self.y - other.y).atan2(self.x - other.x)
    }

    /// Linear interpolation between two points.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Self;

    fn add(self, rhs: Vector) -> Self::Output {
        Self::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

/// A 2D displacement or velocity with dx and dy components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// X component
    pub dx: f32,
    /// Y component
    pub dy: f32,
}

impl Vector {
    /// Zero vector
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    /// Create a new vector.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Displacement from one point to another.
    #[must_use]
    pub fn between(from: Point, to: Point) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    /// Vector from a direction angle in degrees (0 = straight up,
    /// increasing clockwise) and a magnitude.
    #[must_use]
    pub fn from_angle(degrees: f32, magnitude: f32) -> Self {
        let radians = (degrees - 90.0) * 2.0 * std::f32::consts::PI / 360.0;
        Self::new(radians.cos() * magnitude, -radians.sin() * magnitude)
    }

    /// Length of the vector.
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    ///
    /// Returning `None` instead of dividing by a zero magnitude keeps NaN
    /// out of downstream impulse math.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude > 0.0 {
            Some(Self::new(self.dx / magnitude, self.dy / magnitude))
        } else {
            None
        }
    }

    /// Scale both components by a factor.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.dx * factor, self.dy * factor)
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position of the lower-left corner
    pub x: f32,
    /// Y position of the lower-left corner
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the origin point.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Get center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point is inside the rectangle (inclusive).
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Check if this rectangle intersects another.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Calculate union with another rectangle.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let top = (self.y + self.height).max(other.y + other.height);

        Self::new(x, y, right - x, top - y)
    }

    /// Create a copy shifted by the given amounts.
    #[must_use]
    pub fn offset_by(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Placement of a node within its parent frame: translation, rotation
/// (radians, counterclockwise), and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Position of the node's origin in the parent frame.
    pub translation: Point,
    /// Rotation in radians.
    pub rotation: f32,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Transform2D {
    /// Identity transform.
    pub const IDENTITY: Self = Self {
        translation: Point::ORIGIN,
        rotation: 0.0,
        scale: 1.0,
    };

    /// Create a pure translation.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            translation: Point::new(x, y),
            rotation: 0.0,
            scale: 1.0,
        }
    }

    /// Convert a point from this node's local frame into the parent frame.
    #[must_use]
    pub fn to_parent(&self, point: Point) -> Point {
        let (sin, cos) = self.rotation.sin_cos();
        let x = (point.x * cos - point.y * sin) * self.scale;
        let y = (point.x * sin + point.y * cos) * self.scale;
        Point::new(x + self.translation.x, y + self.translation.y)
    }

    /// Convert a point from the parent frame into this node's local frame.
    ///
    /// A zero scale cannot be inverted; the translated point is returned
    /// unscaled in that case.
    #[must_use]
    pub fn to_local(&self, point: Point) -> Point {
        let x = point.x - self.translation.x;
        let y = point.y - self.translation.y;
        let (sin, cos) = (-self.rotation).sin_cos();
        let local = Point::new(x * cos - y * sin, x * sin + y * cos);
        if self.scale == 0.0 {
            local
        } else {
            Point::new(local.x / self.scale, local.y / self.scale)
        }
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}
