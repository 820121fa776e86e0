//! Segmented-cell outline renderer.
//!
//! Two entry points:
//! - `text`: one cell per line, plain outlines cropped to the cell extent
//! - `tabular`: `X1,Y1,...` CSV plus a value table, cells filled by value,
//!   labeled with their identifier, with a color-bar legend

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cell_outlines::{Pipeline, PngFileSink, RenderConfig, RenderReport};
use cell_parser::{load_value_table_file, CoordinateTable};

#[derive(Parser, Debug)]
#[command(name = "cell-outlines")]
#[command(about = "Render segmented-cell outlines to PNG")]
struct Args {
    /// YAML render configuration
    #[arg(long, env = "CELL_OUTLINES_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render text records (one cell per line)
    Text {
        /// Input text file
        input: PathBuf,

        #[command(flatten)]
        common: CommonArgs,

        /// Keep cells that touch the extent edges
        #[arg(long)]
        no_edge_crop: bool,
    },
    /// Render tabular coordinates colored by a value table
    Tabular {
        /// Coordinate CSV with X1,Y1,...,XK,YK columns
        input: PathBuf,

        /// Value table CSV
        #[arg(long, env = "CELL_VALUES")]
        values: PathBuf,

        /// TrueType font for labels
        #[arg(long, env = "CELL_FONT")]
        font: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct CommonArgs {
    /// Output PNG path
    #[arg(short, long)]
    output: PathBuf,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Colormap name (e.g. Blues, viridis, Reds_r)
    #[arg(long)]
    colormap: Option<String>,

    /// Outline stroke width
    #[arg(long)]
    line_width: Option<u32>,
}

impl CommonArgs {
    fn apply(&self, config: &mut RenderConfig) {
        if let Some(w) = self.width {
            config.image_width = Some(w);
        }
        if let Some(h) = self.height {
            config.image_height = Some(h);
        }
        if let Some(name) = &self.colormap {
            config.colormap_name = name.clone();
        }
        if let Some(width) = self.line_width {
            config.line_width = width;
        }
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn log_report(report: &RenderReport) {
    info!(
        variant = ?report.variant,
        cells_parsed = report.cells_parsed,
        cells_drawn = report.cells_drawn,
        excluded = report.filter.excluded(),
        edge_clipped = report.filter.edge_clipped,
        absent = report.filter.absent,
        unterminated = report.filter.unterminated,
        missing_value = report.filter.missing_value,
        width = report.width,
        height = report.height,
        "Render complete"
    );
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };

    let report = match &args.command {
        Command::Text {
            input,
            common,
            no_edge_crop,
        } => {
            common.apply(&mut config);
            if *no_edge_crop {
                config.edge_crop_enabled = false;
            }
            let pipeline = Pipeline::new(config)?;

            let text = std::fs::read_to_string(input)
                .with_context(|| format!("Failed to read input: {}", input.display()))?;
            info!(input = %input.display(), "Rendering text outlines");

            pipeline.run_text(&text, &mut PngFileSink::new(&common.output))?
        }
        Command::Tabular {
            input,
            values,
            font,
            common,
        } => {
            common.apply(&mut config);
            if let Some(font) = font {
                config.font_path = Some(font.clone());
            }
            let pipeline = Pipeline::new(config)?;

            // Resources first, so nothing is drawn if one is missing.
            let font = pipeline.load_font()?;
            let values = load_value_table_file(values, &pipeline.config().values)?;
            let file = std::fs::File::open(input)
                .with_context(|| format!("Failed to open input: {}", input.display()))?;
            let table = CoordinateTable::from_reader(file)?;
            info!(input = %input.display(), cells = table.cell_count(), "Rendering tabular cells");

            pipeline.run_tabular(&table, &values, &font, &mut PngFileSink::new(&common.output))?
        }
    };

    log_report(&report);
    Ok(())
}
