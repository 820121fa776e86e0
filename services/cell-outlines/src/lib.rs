//! Cell outline rendering service library.
//!
//! Wires the parser and renderer crates into the two rendering
//! pipelines (plain text outlines and value-annotated tabular cells),
//! plus configuration and output sinks for the `cell-outlines` binary.

pub mod config;
pub mod pipeline;
pub mod sink;

pub use config::RenderConfig;
pub use pipeline::{Pipeline, RenderReport, Rendered, Stage, Variant};
pub use sink::{ImageSink, MemorySink, PngFileSink};
