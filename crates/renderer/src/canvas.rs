//! Pixel canvas owned by a single render pass.

use cell_common::{BoundingExtent, CellError, CellResult, Point};
use image::{imageops, ImageBuffer, RgbImage};

use crate::gradient::Color;

/// Fixed-size RGB canvas.
///
/// Writes outside the canvas are dropped silently.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    /// New canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> CellResult<Self> {
        if width == 0 || height == 0 {
            return Err(CellError::Config(format!(
                "canvas dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            image: ImageBuffer::from_pixel(width, height, background.to_rgb()),
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image.get_pixel_checked(x, y).map(|p| Color::from(*p))
    }

    /// Set one pixel. Returns false when the point was clipped.
    pub fn put_point(&mut self, point: Point, color: Color) -> bool {
        if !self.contains(point.x as i64, point.y as i64) {
            return false;
        }
        self.image
            .put_pixel(point.x as u32, point.y as u32, color.to_rgb());
        true
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width as i64).min(self.width() as i64);
        let y1 = (y + height as i64).min(self.height() as i64);
        let rgb = color.to_rgb();
        for py in y0..y1 {
            for px in x0..x1 {
                self.image.put_pixel(px as u32, py as u32, rgb);
            }
        }
    }

    /// Number of pixels equal to `color`.
    pub fn count_color(&self, color: Color) -> usize {
        let rgb = color.to_rgb();
        self.image.pixels().filter(|p| **p == rgb).count()
    }

    /// Crop to `(0, 0, max_x, max_y)`, clamped to the canvas.
    ///
    /// A degenerate box leaves the canvas as it is.
    pub fn crop(self, extent: &BoundingExtent) -> Self {
        let (crop_w, crop_h) = extent.crop_size();
        let width = crop_w.min(self.width());
        let height = crop_h.min(self.height());

        if width == 0 || height == 0 {
            tracing::warn!(
                max_x = extent.max_x,
                max_y = extent.max_y,
                "Degenerate crop box, keeping full canvas"
            );
            return self;
        }

        let x = BoundingExtent::MIN_X as u32;
        let y = BoundingExtent::MIN_Y as u32;
        let image = imageops::crop_imm(&self.image, x, y, width, height).to_image();
        Self { image }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }
}
