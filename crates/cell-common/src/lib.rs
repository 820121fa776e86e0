//! Common types and utilities shared across the cell-outline crates.

pub mod error;
pub mod extent;
pub mod geometry;
pub mod values;

pub use error::{CellError, CellResult};
pub use extent::BoundingExtent;
pub use geometry::{AnnotatedCell, Cell, Point};
pub use values::ValueTable;
