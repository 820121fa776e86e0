//! Output sinks for finished canvases.

use std::path::{Path, PathBuf};

use cell_common::{CellError, CellResult};
use renderer::{encode_png, Canvas};
use tracing::info;

/// Receives the final canvas of a run.
pub trait ImageSink {
    fn emit(&mut self, canvas: &Canvas) -> CellResult<()>;
}

/// Writes the canvas as a PNG file, creating parent directories.
#[derive(Debug, Clone)]
pub struct PngFileSink {
    path: PathBuf,
}

impl PngFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSink for PngFileSink {
    fn emit(&mut self, canvas: &Canvas) -> CellResult<()> {
        let png = encode_png(canvas.image())?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, &png)
            .map_err(|e| CellError::Io(format!("{}: {}", self.path.display(), e)))?;

        info!(
            path = %self.path.display(),
            width = canvas.width(),
            height = canvas.height(),
            bytes = png.len(),
            "Wrote image"
        );
        Ok(())
    }
}

/// Keeps emitted canvases in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub frames: Vec<Canvas>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Canvas> {
        self.frames.last()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl ImageSink for MemorySink {
    fn emit(&mut self, canvas: &Canvas) -> CellResult<()> {
        self.frames.push(canvas.clone());
        Ok(())
    }
}
