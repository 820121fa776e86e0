//! Centroid-centered cell labels.

use std::path::Path;

use cell_common::{Cell, CellError, CellResult, Point};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};

use crate::canvas::Canvas;
use crate::gradient::Color;

/// Something that can measure and draw a text string.
pub trait LabelFont {
    /// Rendered `(width, height)` of `text` in pixels.
    fn text_size(&self, text: &str) -> (i32, i32);

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&self, canvas: &mut Canvas, x: i32, y: i32, color: Color, text: &str);
}

/// A TrueType font at a fixed pixel size.
pub struct TrueTypeFont {
    font: Font<'static>,
    scale: Scale,
}

impl TrueTypeFont {
    pub fn from_bytes(data: Vec<u8>, size: f32) -> CellResult<Self> {
        if size.is_nan() || size <= 0.0 {
            return Err(CellError::Config(format!("font size must be positive, got {}", size)));
        }
        let font = Font::try_from_vec(data)
            .ok_or_else(|| CellError::Resource("font data is not a valid TrueType font".to_string()))?;
        Ok(Self {
            font,
            scale: Scale::uniform(size),
        })
    }

    pub fn from_file(path: impl AsRef<Path>, size: f32) -> CellResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| CellError::Resource(format!("font {}: {}", path.display(), e)))?;
        let font = Self::from_bytes(data, size)?;
        tracing::debug!(path = %path.display(), size, "Loaded label font");
        Ok(font)
    }
}

impl LabelFont for TrueTypeFont {
    fn text_size(&self, text: &str) -> (i32, i32) {
        text_size(self.scale, &self.font, text)
    }

    fn draw_text(&self, canvas: &mut Canvas, x: i32, y: i32, color: Color, text: &str) {
        draw_text_mut(
            canvas.image_mut(),
            color.to_rgb(),
            x,
            y,
            self.scale,
            &self.font,
            text,
        );
    }
}

/// Arithmetic mean of the cell's points, floored. `None` for an empty cell.
pub fn centroid(cell: &Cell) -> Option<Point> {
    if cell.is_empty() {
        return None;
    }
    let n = cell.len() as i64;
    let (sx, sy) = cell
        .points
        .iter()
        .fold((0i64, 0i64), |(sx, sy), p| (sx + p.x as i64, sy + p.y as i64));
    Some(Point::new(sx.div_euclid(n) as i32, sy.div_euclid(n) as i32))
}

/// Top-left corner that centers a `(width, height)` box on `center`.
pub fn label_origin(center: Point, (width, height): (i32, i32)) -> Point {
    Point::new(center.x - width / 2, center.y - height / 2)
}

/// Draw the decimal `id` centered on the cell's centroid.
///
/// Fails for a cell without points.
pub fn place_label<F: LabelFont + ?Sized>(
    canvas: &mut Canvas,
    cell: &Cell,
    id: usize,
    font: &F,
    color: Color,
) -> CellResult<()> {
    let center = centroid(cell)
        .ok_or_else(|| CellError::data_format(id, "cannot label a cell with no points"))?;
    let text = id.to_string();
    let origin = label_origin(center, font.text_size(&text));
    font.draw_text(canvas, origin.x, origin.y, color, &text);
    Ok(())
}
