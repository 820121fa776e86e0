//! Raster rendering for segmented-cell outlines.
//!
//! Implements the drawing side of the pipeline:
//! - Canvas with silent clipping and extent cropping
//! - Colormaps and discrete color ramps
//! - Color-bar legend
//! - Outline and polygon fill rasterization
//! - Centroid-centered text labels
//! - PNG encoding

pub mod canvas;
pub mod colormap;
pub mod gradient;
pub mod labels;
pub mod legend;
pub mod outline;
pub mod png;

pub use canvas::Canvas;
pub use colormap::{Colormap, ColormapConfig};
pub use gradient::{build_ramp, interpolate, Color, ColorRamp, DEFAULT_RAMP_STEPS};
pub use labels::{centroid, label_origin, place_label, LabelFont, TrueTypeFont};
pub use legend::{draw_legend, LegendConfig};
pub use outline::{draw_outline, fill_polygon, outline_segments, OutlineStyle};
pub use png::encode_png;
