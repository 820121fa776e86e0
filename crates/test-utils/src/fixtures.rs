//! Common test fixtures for the cell-outline pipeline.

/// The reference square cell touching the origin. With edge cropping it is
/// always excluded from a text render.
pub const EDGE_SQUARE_TEXT: &str = "0,0,10,0,10,10,0,10";

/// The reference tabular cell: a 10 pixel square centered on `(10, 10)`.
pub const CENTERED_SQUARE: [(i32, i32); 4] = [(5, 5), (5, 15), (15, 15), (15, 5)];

/// [`CENTERED_SQUARE`] as a one-cell tabular source.
pub const CENTERED_SQUARE_CSV: &str = "X1,Y1\n5,5\n5,15\n15,15\n15,5\n0,0\n";

/// Value table giving cell 1 the midpoint value.
pub const MIDPOINT_VALUES_CSV: &str = "order,scaled predicted cyto\n1,0.5\n";

/// Canvas size used by the end-to-end scenarios.
pub const SCENARIO_CANVAS: (u32, u32) = (20, 20);

/// Common colormap names.
pub mod colormaps {
    pub const DEFAULT: &str = "Blues";
    pub const REVERSED: &str = "Blues_r";
    pub const VIRIDIS: &str = "viridis";
    pub const UNKNOWN: &str = "not-a-colormap";
}

/// A custom colormap file with a single black-to-red map named `heat`.
pub const HEAT_COLORMAP_JSON: &str = r##"{
  "colormaps": {
    "heat": {
      "stops": [
        { "value": 0.0, "color": "#000000" },
        { "value": 1.0, "color": "#ff0000" }
      ]
    }
  }
}"##;
