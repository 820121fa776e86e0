//! Render pipelines.
//!
//! Both variants walk a fixed stage sequence:
//!
//! ```text
//! Init -> Parsed -> Filtered -> [ColorPrepared] -> Rasterized -> [Labeled] -> Cropped -> Emitted
//! ```
//!
//! The bracketed stages belong to the tabular variant only. Any error
//! aborts the run and the canvas is dropped without reaching a sink.

use cell_common::{BoundingExtent, CellError, CellResult, ValueTable};
use cell_parser::{
    filter_tabular_cells, filter_text_cells, parse_tabular, parse_text, CoordinateTable,
    FilterStats,
};
use renderer::colormap::ColormapConfig;
use renderer::gradient::build_ramp_with;
use renderer::{
    draw_legend, draw_outline, fill_polygon, place_label, Canvas, Color, LabelFont, TrueTypeFont,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::sink::ImageSink;

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Init,
    Parsed,
    Filtered,
    ColorPrepared,
    Rasterized,
    Labeled,
    Cropped,
    Emitted,
}

/// Input variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Variant {
    /// Text records, plain outlines, cropped to the extent.
    Text,
    /// Tabular coordinates with value-colored fills and labels.
    Tabular,
}

impl Variant {
    /// Stages this variant visits, in order.
    pub fn stages(&self) -> &'static [Stage] {
        match self {
            Variant::Text => &[
                Stage::Init,
                Stage::Parsed,
                Stage::Filtered,
                Stage::Rasterized,
                Stage::Cropped,
                Stage::Emitted,
            ],
            Variant::Tabular => &[
                Stage::Init,
                Stage::Parsed,
                Stage::Filtered,
                Stage::ColorPrepared,
                Stage::Rasterized,
                Stage::Labeled,
                Stage::Cropped,
                Stage::Emitted,
            ],
        }
    }
}

/// Summary of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderReport {
    pub variant: Variant,
    pub stages: Vec<Stage>,
    pub cells_parsed: usize,
    pub cells_drawn: usize,
    pub filter: FilterStats,
    pub extent: BoundingExtent,
    pub width: u32,
    pub height: u32,
}

impl RenderReport {
    fn new(variant: Variant) -> Self {
        Self {
            variant,
            stages: vec![Stage::Init],
            cells_parsed: 0,
            cells_drawn: 0,
            filter: FilterStats::default(),
            extent: BoundingExtent::default(),
            width: 0,
            height: 0,
        }
    }

    fn advance(&mut self, stage: Stage) {
        debug_assert_eq!(
            self.variant.stages().get(self.stages.len()),
            Some(&stage),
            "out-of-order stage"
        );
        self.stages.push(stage);
        info!(variant = ?self.variant, stage = ?stage, "Pipeline stage reached");
    }

    pub fn stage(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Init)
    }
}

/// A finished canvas awaiting emission.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub canvas: Canvas,
    pub report: RenderReport,
}

impl Rendered {
    /// Hand the canvas to `sink`, completing the run.
    pub fn emit<S: ImageSink + ?Sized>(mut self, sink: &mut S) -> CellResult<RenderReport> {
        sink.emit(&self.canvas)?;
        self.report.advance(Stage::Emitted);
        Ok(self.report)
    }
}

/// Configured renderer for both variants.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: RenderConfig,
    colormaps: Option<ColormapConfig>,
}

impl Pipeline {
    /// Validate `config` and load its colormap file, if any.
    pub fn new(config: RenderConfig) -> CellResult<Self> {
        config.validate()?;
        let colormaps = match &config.colormap_file {
            Some(path) => Some(ColormapConfig::from_file(path)?),
            None => None,
        };
        Ok(Self { config, colormaps })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Load the configured label font.
    pub fn load_font(&self) -> CellResult<TrueTypeFont> {
        let path = self.config.font_path.as_ref().ok_or_else(|| {
            CellError::Resource("font_path is required for labels".to_string())
        })?;
        TrueTypeFont::from_file(path, self.config.font_size)
    }

    /// Render text records as plain outlines.
    pub fn render_text(&self, input: &str) -> CellResult<Rendered> {
        let mut report = RenderReport::new(Variant::Text);
        let (width, height) = self.config.dimensions()?;

        let parsed = parse_text(input)?;
        report.cells_parsed = parsed.cells.len();
        report.extent = parsed.extent;
        report.advance(Stage::Parsed);

        let filtered = filter_text_cells(parsed.cells, &parsed.extent, self.config.edge_crop_enabled);
        report.filter = filtered.stats;
        report.advance(Stage::Filtered);

        let mut canvas = Canvas::new(width, height, self.config.background)?;
        let style = self.config.outline_style();
        for cell in &filtered.cells {
            draw_outline(&mut canvas, cell, &style);
        }
        report.cells_drawn = filtered.cells.len();
        report.advance(Stage::Rasterized);

        let canvas = canvas.crop(&parsed.extent);
        (report.width, report.height) = canvas.dimensions();
        report.advance(Stage::Cropped);

        Ok(Rendered { canvas, report })
    }

    /// Render tabular cells with value-colored fills, a legend and labels.
    ///
    /// Every kept cell's color is resolved before drawing starts, so an
    /// out-of-range value fails the run on a blank canvas.
    pub fn render_tabular<F: LabelFont + ?Sized>(
        &self,
        table: &CoordinateTable,
        values: &ValueTable,
        font: &F,
    ) -> CellResult<Rendered> {
        let mut report = RenderReport::new(Variant::Tabular);
        let (width, height) = self.config.dimensions()?;

        let parsed = parse_tabular(table, self.config.max_rows)?;
        report.cells_parsed = parsed.cells.len();
        report.extent = parsed.extent;
        report.advance(Stage::Parsed);

        let filtered = filter_tabular_cells(parsed.cells, values)?;
        report.filter = filtered.stats;
        report.advance(Stage::Filtered);

        let ramp = build_ramp_with(
            &self.config.colormap_name,
            self.config.ramp_steps,
            self.colormaps.as_ref(),
        )?;
        let fills = filtered
            .cells
            .iter()
            .map(|c| ramp.interpolate(c.value))
            .collect::<CellResult<Vec<Color>>>()?;
        report.advance(Stage::ColorPrepared);

        let mut canvas = Canvas::new(width, height, self.config.background)?;
        draw_legend(&mut canvas, &ramp, &self.config.legend);
        let style = self.config.outline_style();
        for (annotated, fill) in filtered.cells.iter().zip(&fills) {
            draw_outline(&mut canvas, &annotated.cell, &style);
            fill_polygon(&mut canvas, &annotated.cell, *fill);
            debug!(cell = annotated.cell.id, value = annotated.value, "Drew cell");
        }
        report.cells_drawn = filtered.cells.len();
        report.advance(Stage::Rasterized);

        for annotated in &filtered.cells {
            place_label(
                &mut canvas,
                &annotated.cell,
                annotated.cell.id,
                font,
                self.config.label_color,
            )?;
        }
        report.advance(Stage::Labeled);

        // Fixed canvas size: nothing to crop.
        (report.width, report.height) = canvas.dimensions();
        report.advance(Stage::Cropped);

        Ok(Rendered { canvas, report })
    }

    /// Render text records and emit to `sink`.
    pub fn run_text<S: ImageSink + ?Sized>(&self, input: &str, sink: &mut S) -> CellResult<RenderReport> {
        self.render_text(input)?.emit(sink)
    }

    /// Render tabular cells and emit to `sink`.
    pub fn run_tabular<F, S>(
        &self,
        table: &CoordinateTable,
        values: &ValueTable,
        font: &F,
        sink: &mut S,
    ) -> CellResult<RenderReport>
    where
        F: LabelFont + ?Sized,
        S: ImageSink + ?Sized,
    {
        self.render_tabular(table, values, font)?.emit(sink)
    }
}
