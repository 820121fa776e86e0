//! Horizontal color-bar legend.

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::gradient::ColorRamp;

/// Legend configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LegendConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Gap between the bar's bottom edge and the canvas bottom.
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: u32,
}

fn default_enabled() -> bool {
    true
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    65
}

fn default_bottom_margin() -> u32 {
    200
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            width: default_width(),
            height: default_height(),
            bottom_margin: default_bottom_margin(),
        }
    }
}

impl LegendConfig {
    /// Top-left corner of the bar on a `canvas_w x canvas_h` canvas.
    ///
    /// Horizontally centered with floor division; may be negative on
    /// small canvases.
    pub fn origin(&self, canvas_w: u32, canvas_h: u32) -> (i64, i64) {
        let x = (canvas_w as i64 - self.width as i64).div_euclid(2);
        let y = canvas_h as i64 - self.height as i64 - self.bottom_margin as i64;
        (x, y)
    }
}

/// Paint the ramp as a bar, one ramp entry per column band.
///
/// Column `c` takes ramp entry `floor(c * steps / width)`.
pub fn draw_legend(canvas: &mut Canvas, ramp: &ColorRamp, config: &LegendConfig) {
    if !config.enabled || config.width == 0 || config.height == 0 || ramp.is_empty() {
        return;
    }

    let (x0, y0) = config.origin(canvas.width(), canvas.height());
    let steps = ramp.len() as u64;
    for col in 0..config.width {
        let index = (col as u64 * steps / config.width as u64) as usize;
        if let Some(color) = ramp.get(index) {
            canvas.fill_rect(x0 + col as i64, y0, 1, config.height, color);
        }
    }

    tracing::debug!(x = x0, y = y0, width = config.width, height = config.height, "Drew legend");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradient::{build_ramp, Color};

    #[test]
    fn test_origin_reference_layout() {
        let config = LegendConfig::default();
        assert_eq!(config.origin(2075, 2200), (537, 1935));
        assert_eq!(config.origin(999, 300), (-1, 35));
    }

    #[test]
    fn test_bar_spans_ramp() {
        let ramp = build_ramp("Blues", 10).unwrap();
        let config = LegendConfig {
            enabled: true,
            width: 20,
            height: 2,
            bottom_margin: 1,
        };
        let mut canvas = Canvas::new(40, 10, Color::BLACK).unwrap();
        draw_legend(&mut canvas, &ramp, &config);

        // x0 = 10, y0 = 7
        assert_eq!(canvas.pixel(10, 7), ramp.get(0));
        assert_eq!(canvas.pixel(29, 8), ramp.get(9));
        assert_eq!(canvas.pixel(9, 7), Some(Color::BLACK));
        assert_eq!(canvas.pixel(10, 9), Some(Color::BLACK));
    }

    #[test]
    fn test_disabled_draws_nothing() {
        let ramp = build_ramp("Blues", 10).unwrap();
        let config = LegendConfig {
            enabled: false,
            ..LegendConfig::default()
        };
        let mut canvas = Canvas::new(1200, 400, Color::BLACK).unwrap();
        draw_legend(&mut canvas, &ramp, &config);
        assert_eq!(canvas.count_color(Color::BLACK), 1200 * 400);
    }
}
