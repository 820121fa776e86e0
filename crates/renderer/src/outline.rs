//! Cell outline and fill rasterization.
//!
//! Outlines are open polylines: `n` points give `n - 1` segments, and a
//! closing segment is only drawn when the input repeats its first point.

use cell_common::{Cell, Point};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point as PolyPoint;
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::gradient::Color;

/// Stroke configuration for outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineStyle {
    pub color: Color,
    /// Stroke width in pixels
    pub line_width: u32,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            line_width: 3,
        }
    }
}

impl OutlineStyle {
    /// Perpendicular offsets covered by a stroke of this width.
    fn offsets(&self) -> std::ops::RangeInclusive<i32> {
        let w = self.line_width.max(1) as i32;
        -(w / 2)..=(w - 1) / 2
    }
}

/// Consecutive point pairs of a cell's outline.
pub fn outline_segments(cell: &Cell) -> Vec<(Point, Point)> {
    cell.points.windows(2).map(|w| (w[0], w[1])).collect()
}

/// Draw point markers and connecting segments of `cell`.
///
/// Thick strokes are drawn as parallel one-pixel lines shifted along the
/// segment's minor axis.
pub fn draw_outline(canvas: &mut Canvas, cell: &Cell, style: &OutlineStyle) {
    for point in &cell.points {
        canvas.put_point(*point, style.color);
    }

    let rgb = style.color.to_rgb();
    for (a, b) in outline_segments(cell) {
        let span_x = (b.x as i64 - a.x as i64).abs();
        let span_y = (b.y as i64 - a.y as i64).abs();
        let mostly_horizontal = span_x >= span_y;
        for offset in style.offsets() {
            let (dx, dy) = if mostly_horizontal {
                (0, offset)
            } else {
                (offset, 0)
            };
            draw_line_segment_mut(
                canvas.image_mut(),
                shifted(a, dx, dy),
                shifted(b, dx, dy),
                rgb,
            );
        }
    }
}

/// `point + (dx, dy)` as line endpoint coordinates. Widened so points at
/// the edge of the `i32` range never overflow.
fn shifted(point: Point, dx: i32, dy: i32) -> (f32, f32) {
    (
        (point.x as i64 + dx as i64) as f32,
        (point.y as i64 + dy as i64) as f32,
    )
}

/// Polygon vertices suitable for filling, or `None` if the cell encloses
/// no area.
///
/// Repeated consecutive points and a closing copy of the first point are
/// removed.
pub fn fill_vertices(cell: &Cell) -> Option<Vec<Point>> {
    let mut vertices = cell.points.clone();
    vertices.dedup();
    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    if vertices.len() < 3 {
        return None;
    }
    Some(vertices)
}

/// Fill the polygon bounded by `cell` with `color`.
///
/// Cells with fewer than three distinct vertices are skipped.
pub fn fill_polygon(canvas: &mut Canvas, cell: &Cell, color: Color) {
    let vertices = match fill_vertices(cell) {
        Some(v) => v,
        None => {
            tracing::warn!(cell = cell.id, points = cell.len(), "Skipping fill of degenerate polygon");
            return;
        }
    };

    let poly: Vec<PolyPoint<i32>> = vertices.iter().map(|p| PolyPoint::new(p.x, p.y)).collect();
    draw_polygon_mut(canvas.image_mut(), &poly, color.to_rgb());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(pts: &[(i32, i32)]) -> Cell {
        Cell::new(1, pts.iter().map(|&p| Point::from(p)).collect())
    }

    #[test]
    fn test_segment_count_is_points_minus_one() {
        assert_eq!(outline_segments(&cell(&[(1, 1), (5, 1), (5, 5)])).len(), 2);
        assert_eq!(outline_segments(&cell(&[(1, 1), (5, 1)])).len(), 1);
        assert!(outline_segments(&cell(&[(1, 1)])).is_empty());
    }

    #[test]
    fn test_stroke_offsets() {
        let style = |w| OutlineStyle { color: Color::WHITE, line_width: w };
        assert_eq!(style(1).offsets(), 0..=0);
        assert_eq!(style(2).offsets(), -1..=0);
        assert_eq!(style(3).offsets(), -1..=1);
        assert_eq!(style(0).offsets(), 0..=0);
    }

    #[test]
    fn test_no_implicit_closing_segment() {
        let mut canvas = Canvas::new(20, 20, Color::BLACK).unwrap();
        let style = OutlineStyle { color: Color::WHITE, line_width: 1 };
        // Open "L": closing segment would pass through (7, 7).
        draw_outline(&mut canvas, &cell(&[(2, 12), (2, 2), (12, 2)]), &style);
        assert_eq!(canvas.pixel(2, 7), Some(Color::WHITE));
        assert_eq!(canvas.pixel(7, 2), Some(Color::WHITE));
        assert_eq!(canvas.pixel(7, 7), Some(Color::BLACK));
    }

    #[test]
    fn test_thick_vertical_stroke() {
        let mut canvas = Canvas::new(20, 20, Color::BLACK).unwrap();
        draw_outline(&mut canvas, &cell(&[(10, 2), (10, 12)]), &OutlineStyle::default());
        for x in 9..=11 {
            assert_eq!(canvas.pixel(x, 6), Some(Color::WHITE), "x = {x}");
        }
        assert_eq!(canvas.pixel(8, 6), Some(Color::BLACK));
        assert_eq!(canvas.pixel(12, 6), Some(Color::BLACK));
    }

    #[test]
    fn test_points_at_coordinate_limit_are_clipped() {
        let mut canvas = Canvas::new(20, 20, Color::BLACK).unwrap();
        let style = OutlineStyle::default();
        draw_outline(&mut canvas, &cell(&[(i32::MAX, 5), (i32::MAX, 10)]), &style);
        draw_outline(&mut canvas, &cell(&[(3, i32::MAX), (8, i32::MAX)]), &style);
        draw_outline(&mut canvas, &cell(&[(2, 4), (6, 4)]), &style);
        assert_eq!(canvas.pixel(10, 5), Some(Color::BLACK));
        assert_eq!(canvas.count_color(Color::WHITE), 15);
    }

    #[test]
    fn test_fill_vertices_drop_closing_point() {
        let closed = cell(&[(1, 1), (5, 1), (5, 5), (1, 1)]);
        assert_eq!(fill_vertices(&closed).map(|v| v.len()), Some(3));
        assert!(fill_vertices(&cell(&[(1, 1), (5, 1), (1, 1)])).is_none());
        assert!(fill_vertices(&cell(&[(1, 1), (1, 1), (5, 5)])).is_none());
    }

    #[test]
    fn test_fill_covers_interior() {
        let mut canvas = Canvas::new(20, 20, Color::BLACK).unwrap();
        let red = Color::new(255, 0, 0);
        fill_polygon(&mut canvas, &cell(&[(5, 5), (5, 15), (15, 15), (15, 5)]), red);
        assert_eq!(canvas.pixel(10, 10), Some(red));
        assert_eq!(canvas.pixel(7, 7), Some(red));
        assert_eq!(canvas.pixel(3, 10), Some(Color::BLACK));
    }

    #[test]
    fn test_degenerate_fill_is_skipped() {
        let mut canvas = Canvas::new(10, 10, Color::BLACK).unwrap();
        fill_polygon(&mut canvas, &cell(&[(1, 1), (8, 8)]), Color::WHITE);
        assert_eq!(canvas.count_color(Color::WHITE), 0);
    }

    #[test]
    fn test_points_outside_canvas_are_clipped() {
        let mut canvas = Canvas::new(10, 10, Color::BLACK).unwrap();
        let style = OutlineStyle { color: Color::WHITE, line_width: 1 };
        draw_outline(&mut canvas, &cell(&[(5, 5), (25, 5)]), &style);
        assert_eq!(canvas.pixel(9, 5), Some(Color::WHITE));
        fill_polygon(&mut canvas, &cell(&[(-5, -5), (30, -5), (30, 30)]), Color::WHITE);
    }
}
