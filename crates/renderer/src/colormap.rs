//! Continuous colormaps over [0, 1].
//!
//! Built-in maps are the ColorBrewer sequential schemes plus viridis.
//! Additional maps load from JSON. A `_r` suffix reverses any map.

use std::collections::HashMap;
use std::path::Path;

use cell_common::{CellError, CellResult};
use serde::{Deserialize, Serialize};

/// Colormap file loaded from JSON
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ColormapConfig {
    pub colormaps: HashMap<String, ColormapDefinition>,
}

/// A single colormap definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColormapDefinition {
    pub description: Option<String>,
    pub stops: Vec<ColorStop>,
}

/// Color stop for a colormap
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ColorStop {
    pub value: f64,
    pub color: String,
}

impl ColormapConfig {
    /// Load colormaps from a JSON string
    pub fn from_json(json_str: &str) -> CellResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load colormaps from a file
    pub fn from_file(path: impl AsRef<Path>) -> CellResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CellError::Resource(format!("colormap file {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn get(&self, name: &str) -> Option<&ColormapDefinition> {
        self.colormaps.get(name)
    }
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

type Rgb8 = [u8; 3];

const BLUES: &[Rgb8] = &[
    [0xf7, 0xfb, 0xff],
    [0xde, 0xeb, 0xf7],
    [0xc6, 0xdb, 0xef],
    [0x9e, 0xca, 0xe1],
    [0x6b, 0xae, 0xd6],
    [0x42, 0x92, 0xc6],
    [0x21, 0x71, 0xb5],
    [0x08, 0x51, 0x9c],
    [0x08, 0x30, 0x6b],
];

const GREENS: &[Rgb8] = &[
    [0xf7, 0xfc, 0xf5],
    [0xe5, 0xf5, 0xe0],
    [0xc7, 0xe9, 0xc0],
    [0xa1, 0xd9, 0x9b],
    [0x74, 0xc4, 0x76],
    [0x41, 0xab, 0x5d],
    [0x23, 0x8b, 0x45],
    [0x00, 0x6d, 0x2c],
    [0x00, 0x44, 0x1b],
];

const GREYS: &[Rgb8] = &[
    [0xff, 0xff, 0xff],
    [0xf0, 0xf0, 0xf0],
    [0xd9, 0xd9, 0xd9],
    [0xbd, 0xbd, 0xbd],
    [0x96, 0x96, 0x96],
    [0x73, 0x73, 0x73],
    [0x52, 0x52, 0x52],
    [0x25, 0x25, 0x25],
    [0x00, 0x00, 0x00],
];

const ORANGES: &[Rgb8] = &[
    [0xff, 0xf5, 0xeb],
    [0xfe, 0xe6, 0xce],
    [0xfd, 0xd0, 0xa2],
    [0xfd, 0xae, 0x6b],
    [0xfd, 0x8d, 0x3c],
    [0xf1, 0x69, 0x13],
    [0xd9, 0x48, 0x01],
    [0xa6, 0x36, 0x03],
    [0x7f, 0x27, 0x04],
];

const PURPLES: &[Rgb8] = &[
    [0xfc, 0xfb, 0xfd],
    [0xef, 0xed, 0xf5],
    [0xda, 0xda, 0xeb],
    [0xbc, 0xbd, 0xdc],
    [0x9e, 0x9a, 0xc8],
    [0x80, 0x7d, 0xba],
    [0x6a, 0x51, 0xa3],
    [0x54, 0x27, 0x8f],
    [0x3f, 0x00, 0x7d],
];

const REDS: &[Rgb8] = &[
    [0xff, 0xf5, 0xf0],
    [0xfe, 0xe0, 0xd2],
    [0xfc, 0xbb, 0xa1],
    [0xfc, 0x92, 0x72],
    [0xfb, 0x6a, 0x4a],
    [0xef, 0x3b, 0x2c],
    [0xcb, 0x18, 0x1d],
    [0xa5, 0x0f, 0x15],
    [0x67, 0x00, 0x0d],
];

const VIRIDIS: &[Rgb8] = &[
    [0x44, 0x01, 0x54],
    [0x48, 0x28, 0x78],
    [0x3e, 0x49, 0x89],
    [0x31, 0x68, 0x8e],
    [0x26, 0x82, 0x8e],
    [0x1f, 0x9e, 0x89],
    [0x35, 0xb7, 0x79],
    [0x6e, 0xce, 0x58],
    [0xb5, 0xde, 0x2b],
    [0xfd, 0xe7, 0x25],
];

/// Names of the built-in colormaps, without the `_r` variants.
pub const BUILTIN_COLORMAPS: &[&str] =
    &["Blues", "Greens", "Greys", "Oranges", "Purples", "Reds", "viridis"];

fn builtin_colors(name: &str) -> Option<&'static [Rgb8]> {
    match name {
        "Blues" => Some(BLUES),
        "Greens" => Some(GREENS),
        "Greys" => Some(GREYS),
        "Oranges" => Some(ORANGES),
        "Purples" => Some(PURPLES),
        "Reds" => Some(REDS),
        "viridis" => Some(VIRIDIS),
        _ => None,
    }
}

/// Piecewise-linear colormap with channels in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    stops: Vec<(f64, [f64; 3])>,
}

impl Colormap {
    /// Evenly spaced stops from byte colors.
    fn from_evenly_spaced(name: &str, colors: &[Rgb8]) -> Self {
        let last = (colors.len() - 1).max(1) as f64;
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, c)| {
                (
                    i as f64 / last,
                    [c[0] as f64 / 255.0, c[1] as f64 / 255.0, c[2] as f64 / 255.0],
                )
            })
            .collect();
        Self {
            name: name.to_string(),
            stops,
        }
    }

    /// Look up a built-in colormap, honouring the `_r` suffix.
    pub fn builtin(name: &str) -> Option<Self> {
        if let Some(colors) = builtin_colors(name) {
            return Some(Self::from_evenly_spaced(name, colors));
        }
        let base = name.strip_suffix("_r")?;
        builtin_colors(base).map(|colors| Self::from_evenly_spaced(base, colors).reversed())
    }

    /// Build a colormap from a JSON definition.
    ///
    /// Stops must be at least two, sorted by value, span [0, 1] at most,
    /// and carry `#rrggbb` colors.
    pub fn from_definition(name: &str, def: &ColormapDefinition) -> CellResult<Self> {
        if def.stops.len() < 2 {
            return Err(CellError::Resource(format!(
                "colormap '{}' needs at least two stops",
                name
            )));
        }

        let mut stops = Vec::with_capacity(def.stops.len());
        let mut prev = f64::NEG_INFINITY;
        for stop in &def.stops {
            if !(0.0..=1.0).contains(&stop.value) || stop.value < prev {
                return Err(CellError::Resource(format!(
                    "colormap '{}': stop {} is out of order or outside [0, 1]",
                    name, stop.value
                )));
            }
            let (r, g, b) = hex_to_rgb(&stop.color).ok_or_else(|| {
                CellError::Resource(format!(
                    "colormap '{}': invalid color '{}'",
                    name, stop.color
                ))
            })?;
            stops.push((
                stop.value,
                [r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0],
            ));
            prev = stop.value;
        }

        Ok(Self {
            name: name.to_string(),
            stops,
        })
    }

    /// Resolve `name` against `custom` first, then the built-ins.
    pub fn resolve(name: &str, custom: Option<&ColormapConfig>) -> CellResult<Self> {
        if let Some(config) = custom {
            if let Some(def) = config.get(name) {
                return Self::from_definition(name, def);
            }
            if let Some(base) = name.strip_suffix("_r") {
                if let Some(def) = config.get(base) {
                    return Ok(Self::from_definition(base, def)?.reversed());
                }
            }
        }
        Self::builtin(name)
            .ok_or_else(|| CellError::Resource(format!("unknown colormap '{}'", name)))
    }

    /// The same map traversed from 1 to 0.
    pub fn reversed(self) -> Self {
        let name = match self.name.strip_suffix("_r") {
            Some(base) => base.to_string(),
            None => format!("{}_r", self.name),
        };
        let stops = self
            .stops
            .into_iter()
            .rev()
            .map(|(v, c)| (1.0 - v, c))
            .collect();
        Self { name, stops }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Channels at `t`, linearly interpolated between stops.
    ///
    /// `t` is clamped to the first and last stop.
    pub fn sample(&self, t: f64) -> [f64; 3] {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return [0.0; 3],
        };
        if t <= first.0 {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }

        for pair in self.stops.windows(2) {
            let (v0, c0) = pair[0];
            let (v1, c1) = pair[1];
            if t <= v1 {
                let span = v1 - v0;
                if span <= 0.0 {
                    return c1;
                }
                let f = (t - v0) / span;
                return [
                    c0[0] + (c1[0] - c0[0]) * f,
                    c0[1] + (c1[1] - c0[1]) * f,
                    c0[2] + (c1[2] - c0[2]) * f,
                ];
            }
        }
        last.1
    }
}
