//! Render configuration.
//!
//! Loaded from YAML; every field has a default except the canvas size,
//! which callers usually pass on the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cell_common::{CellError, CellResult};
use cell_parser::{ValueColumns, DEFAULT_MAX_ROWS};
use renderer::{Color, LegendConfig, OutlineStyle, DEFAULT_RAMP_STEPS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options recognised by both pipelines.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub image_width: Option<u32>,
    #[serde(default)]
    pub image_height: Option<u32>,
    #[serde(default = "default_colormap_name")]
    pub colormap_name: String,
    /// JSON file with extra colormaps
    #[serde(default)]
    pub colormap_file: Option<PathBuf>,
    #[serde(default = "default_ramp_steps")]
    pub ramp_steps: usize,
    /// TrueType font for labels (tabular variant only)
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    #[serde(default = "default_line_width")]
    pub line_width: u32,
    #[serde(default = "default_true")]
    pub edge_crop_enabled: bool,
    /// Row threshold for unterminated tabular cells
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_foreground")]
    pub outline_color: Color,
    #[serde(default = "default_foreground")]
    pub label_color: Color,
    #[serde(default)]
    pub legend: LegendConfig,
    #[serde(default)]
    pub values: ValueColumns,
}

fn default_colormap_name() -> String {
    "Blues".to_string()
}

fn default_ramp_steps() -> usize {
    DEFAULT_RAMP_STEPS
}

fn default_font_size() -> f32 {
    15.0
}

fn default_line_width() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

fn default_max_rows() -> usize {
    DEFAULT_MAX_ROWS
}

fn default_background() -> Color {
    Color::BLACK
}

fn default_foreground() -> Color {
    Color::WHITE
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: None,
            image_height: None,
            colormap_name: default_colormap_name(),
            colormap_file: None,
            ramp_steps: default_ramp_steps(),
            font_path: None,
            font_size: default_font_size(),
            line_width: default_line_width(),
            edge_crop_enabled: default_true(),
            max_rows: default_max_rows(),
            background: default_background(),
            outline_color: default_foreground(),
            label_color: default_foreground(),
            legend: LegendConfig::default(),
            values: ValueColumns::default(),
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded render config");
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Config with an explicit canvas size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.image_width = Some(width);
        self.image_height = Some(height);
        self
    }

    /// Check option ranges.
    pub fn validate(&self) -> CellResult<()> {
        if self.image_width == Some(0) || self.image_height == Some(0) {
            return Err(CellError::Config("image dimensions must be positive".to_string()));
        }
        if self.ramp_steps == 0 {
            return Err(CellError::Config("ramp_steps must be at least 1".to_string()));
        }
        if self.line_width == 0 {
            return Err(CellError::Config("line_width must be at least 1".to_string()));
        }
        if self.font_size.is_nan() || self.font_size <= 0.0 {
            return Err(CellError::Config(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        if self.colormap_name.trim().is_empty() {
            return Err(CellError::Config("colormap_name is empty".to_string()));
        }
        Ok(())
    }

    /// Canvas size; both dimensions must be set.
    pub fn dimensions(&self) -> CellResult<(u32, u32)> {
        match (self.image_width, self.image_height) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(CellError::Config(
                "image_width and image_height are required".to_string(),
            )),
        }
    }

    pub fn outline_style(&self) -> OutlineStyle {
        OutlineStyle {
            color: self.outline_color,
            line_width: self.line_width,
        }
    }
}
