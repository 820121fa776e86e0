//! Bounding extent of parsed cells.

use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, Point};

/// Maximum x and y observed across a set of cells.
///
/// Minimums are fixed at 0. An extent is computed once from the full
/// input and then only read; filtering never changes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingExtent {
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingExtent {
    pub const MIN_X: i32 = 0;
    pub const MIN_Y: i32 = 0;

    pub fn new(max_x: i32, max_y: i32) -> Self {
        Self { max_x, max_y }
    }

    /// Extent covering `self` and `point`.
    pub fn including(self, point: Point) -> Self {
        Self {
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
        }
    }

    /// Extent of a point stream, starting from the zero extent.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        points
            .into_iter()
            .fold(Self::default(), |extent, p| extent.including(p))
    }

    /// Extent of every point of every cell.
    pub fn from_cells(cells: &[Cell]) -> Self {
        Self::from_points(cells.iter().flat_map(|c| c.points.iter().copied()))
    }

    /// Whether `point` lies on one of the four extent edges.
    pub fn touches(&self, point: Point) -> bool {
        point.x == Self::MIN_X
            || point.x == self.max_x
            || point.y == Self::MIN_Y
            || point.y == self.max_y
    }

    /// Whether any point of `cell` lies on an extent edge.
    pub fn clips(&self, cell: &Cell) -> bool {
        cell.points.iter().any(|p| self.touches(*p))
    }

    /// Crop size `(width, height)` spanning `MIN..max` on each axis.
    pub fn crop_size(&self) -> (u32, u32) {
        (
            (self.max_x - Self::MIN_X).max(0) as u32,
            (self.max_y - Self::MIN_Y).max(0) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(id: usize, x0: i32, y0: i32, side: i32) -> Cell {
        Cell::new(
            id,
            vec![
                Point::new(x0, y0),
                Point::new(x0 + side, y0),
                Point::new(x0 + side, y0 + side),
                Point::new(x0, y0 + side),
            ],
        )
    }

    #[test]
    fn test_extent_from_cells() {
        let cells = vec![square(1, 2, 3, 4), square(2, 10, 1, 5)];
        let extent = BoundingExtent::from_cells(&cells);
        assert_eq!(extent, BoundingExtent::new(15, 7));
    }

    #[test]
    fn test_empty_extent_is_zero() {
        let extent = BoundingExtent::from_cells(&[]);
        assert_eq!(extent, BoundingExtent::default());
        assert_eq!(extent.crop_size(), (0, 0));
    }

    #[test]
    fn test_touches_all_four_edges() {
        let extent = BoundingExtent::new(20, 30);
        assert!(extent.touches(Point::new(0, 5)));
        assert!(extent.touches(Point::new(20, 5)));
        assert!(extent.touches(Point::new(5, 0)));
        assert!(extent.touches(Point::new(5, 30)));
        assert!(!extent.touches(Point::new(5, 5)));
    }

    #[test]
    fn test_clips_interior_cell() {
        let extent = BoundingExtent::new(20, 20);
        assert!(!extent.clips(&square(1, 5, 5, 5)));
        assert!(extent.clips(&square(2, 15, 5, 5)));
    }
}
