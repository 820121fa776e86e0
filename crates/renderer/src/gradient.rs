//! Discrete color ramps sampled from a continuous colormap.

use cell_common::{CellError, CellResult};
use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::colormap::{Colormap, ColormapConfig};

/// Default number of discrete ramp colors.
pub const DEFAULT_RAMP_STEPS: usize = 50;

/// Color value in RGB format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert floating-point channels in [0, 1] to bytes, rounding each.
    pub fn from_unit(rgb: [f64; 3]) -> Self {
        let to_byte = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_byte(rgb[0]), to_byte(rgb[1]), to_byte(rgb[2]))
    }

    /// Relative luminance (Rec. 601 weights), 0..255.
    pub fn luminance(&self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

impl From<Rgb<u8>> for Color {
    fn from(Rgb([r, g, b]): Rgb<u8>) -> Self {
        Self::new(r, g, b)
    }
}

/// Ordered colors spanning a colormap uniformly over [0, 1].
///
/// Entry `k` of an `n`-step ramp is the colormap at `k / (n - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    name: String,
    colors: Vec<Color>,
}

impl ColorRamp {
    pub fn from_colormap(colormap: &Colormap, steps: usize) -> CellResult<Self> {
        if steps == 0 {
            return Err(CellError::Config("ramp needs at least one step".to_string()));
        }
        let denom = (steps - 1).max(1) as f64;
        let colors = (0..steps)
            .map(|k| Color::from_unit(colormap.sample(k as f64 / denom)))
            .collect();

        tracing::debug!(colormap = colormap.name(), steps, "Built color ramp");

        Ok(Self {
            name: colormap.name().to_string(),
            colors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Ramp index of `value`: `floor(value * (steps - 1))`.
    ///
    /// Values outside [0, 1] (and NaN) are rejected, never clamped.
    pub fn index_for(&self, value: f64) -> CellResult<usize> {
        if !(0.0..=1.0).contains(&value) {
            return Err(CellError::Range { value });
        }
        let last = self.colors.len().saturating_sub(1);
        let index = (value * last as f64).floor() as usize;
        Ok(index.min(last))
    }

    pub fn interpolate(&self, value: f64) -> CellResult<Color> {
        let index = self.index_for(value)?;
        Ok(self.colors[index])
    }
}

/// Build a ramp from a built-in colormap.
pub fn build_ramp(name: &str, steps: usize) -> CellResult<ColorRamp> {
    build_ramp_with(name, steps, None)
}

/// Build a ramp, looking `name` up in `custom` before the built-ins.
pub fn build_ramp_with(
    name: &str,
    steps: usize,
    custom: Option<&ColormapConfig>,
) -> CellResult<ColorRamp> {
    let colormap = Colormap::resolve(name, custom)?;
    ColorRamp::from_colormap(&colormap, steps)
}

/// Color of `value` on `ramp`.
pub fn interpolate(ramp: &ColorRamp, value: f64) -> CellResult<Color> {
    ramp.interpolate(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_unit_rounds() {
        assert_eq!(Color::from_unit([0.5, 0.0, 1.0]), Color::new(128, 0, 255));
        assert_eq!(Color::from_unit([0.499 / 255.0, 0.0, 0.0]), Color::new(0, 0, 0));
    }

    #[test]
    fn test_index_for_floor() {
        let ramp = build_ramp("Blues", 50).unwrap();
        assert_eq!(ramp.index_for(0.0).unwrap(), 0);
        assert_eq!(ramp.index_for(0.5).unwrap(), 24);
        assert_eq!(ramp.index_for(0.999).unwrap(), 48);
        assert_eq!(ramp.index_for(1.0).unwrap(), 49);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let ramp = build_ramp("Blues", 10).unwrap();
        for bad in [-0.01, 1.01, f64::NAN] {
            assert!(matches!(ramp.index_for(bad), Err(CellError::Range { .. })));
        }
    }

    #[test]
    fn test_single_step_ramp() {
        let ramp = build_ramp("Greys", 1).unwrap();
        assert_eq!(ramp.len(), 1);
        assert_eq!(ramp.interpolate(1.0).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_zero_steps_is_config_error() {
        assert!(matches!(build_ramp("Blues", 0), Err(CellError::Config(_))));
    }

    #[test]
    fn test_color_serde_as_array() {
        let json = serde_json::to_string(&Color::new(1, 2, 3)).unwrap();
        assert_eq!(json, "[1,2,3]");
        let back: Color = serde_json::from_str("[255,0,7]").unwrap();
        assert_eq!(back, Color::new(255, 0, 7));
    }
}
