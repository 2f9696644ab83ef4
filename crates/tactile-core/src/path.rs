//! Closed polygon paths used for hit-testing and collider construction.

use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error constructing a [`PolygonPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// A closed polygon needs at least three vertices.
    TooFewVertices(usize),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewVertices(n) => {
                write!(f, "polygon needs at least 3 vertices, got {n}")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// A closed polygon in a shape's local coordinate space.
///
/// Vertices are normalized on construction so the polygon's bounding box
/// has its lower-left corner at the local origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPath {
    points: Vec<Point>,
    bounds: Rect,
}

impl PolygonPath {
    /// Create a path from a vertex list. The final edge back to the first
    /// vertex is implicit.
    pub fn new(points: Vec<Point>) -> Result<Self, PathError> {
        if points.len() < 3 {
            return Err(PathError::TooFewVertices(points.len()));
        }

        let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let points: Vec<Point> = points
            .into_iter()
            .map(|p| Point::new(p.x - min_x, p.y - min_y))
            .collect();

        let max_x = points.iter().map(|p| p.x).fold(0.0f32, f32::max);
        let max_y = points.iter().map(|p| p.y).fold(0.0f32, f32::max);

        Ok(Self {
            points,
            bounds: Rect::new(0.0, 0.0, max_x, max_y),
        })
    }

    /// An axis-aligned rectangle path.
    pub fn rect(width: f32, height: f32) -> Result<Self, PathError> {
        Self::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, height),
            Point::new(width, height),
            Point::new(width, 0.0),
        ])
    }

    /// A polygon approximation of an ellipse with the given extents.
    pub fn ellipse(width: f32, height: f32) -> Result<Self, PathError> {
        const SEGMENTS: usize = 32;

        let rx = width / 2.0;
        let ry = height / 2.0;
        let points = (0..SEGMENTS)
            .map(|i| {
                let theta = (i as f32 / SEGMENTS as f32) * 2.0 * std::f32::consts::PI;
                Point::new(rx + rx * theta.cos(), ry + ry * theta.sin())
            })
            .collect();

        Self::new(points)
    }

    /// The normalized vertices.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Bounding rectangle in local space (lower-left corner at the origin).
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        self.bounds
    }

    /// Even-odd point containment test.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        if !self.bounds.contains_point(&point) {
            return false;
        }

        let mut inside = false;
        let mut j = self.points.len() - 1;
        for i in 0..self.points.len() {
            let a = self.points[i];
            let b = self.points[j];
            let crosses = (a.y > point.y) != (b.y > point.y);
            if crosses && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}
