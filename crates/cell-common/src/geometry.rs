//! Points and cells in pixel space.

use serde::{Deserialize, Serialize};

/// A pixel coordinate. Valid input is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The tabular end-of-cell marker `(0, 0)`.
    pub fn is_origin(&self) -> bool {
        self.x == 0 && self.y == 0
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One segmented cell: an ordered boundary point sequence.
///
/// `id` is the 1-based input position. Point order is the outline
/// traversal order and is never rearranged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub id: usize,
    pub points: Vec<Point>,
}

impl Cell {
    pub fn new(id: usize, points: Vec<Point>) -> Self {
        Self { id, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// At least two points are needed to draw an outline.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// A cell paired with its scaled scalar value.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedCell {
    pub cell: Cell,
    pub value: f64,
}

impl AnnotatedCell {
    pub fn new(cell: Cell, value: f64) -> Self {
        Self { cell, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawable_needs_two_points() {
        assert!(!Cell::new(1, vec![]).is_drawable());
        assert!(!Cell::new(1, vec![Point::new(3, 4)]).is_drawable());
        assert!(Cell::new(1, vec![Point::new(3, 4), Point::new(5, 4)]).is_drawable());
    }

    #[test]
    fn test_origin_marker() {
        assert!(Point::new(0, 0).is_origin());
        assert!(!Point::new(0, 7).is_origin());
        assert!(!Point::from((7, 0)).is_origin());
    }
}
