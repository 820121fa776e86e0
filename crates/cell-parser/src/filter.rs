//! Second-pass cell filtering.
//!
//! Filters only read the extent computed by the parser. Relative order of
//! the kept cells is preserved.

use cell_common::{AnnotatedCell, BoundingExtent, Cell, CellResult, ValueTable};
use serde::Serialize;
use tracing::debug;

use crate::tabular::TabularCell;

/// Exclusion counts per reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub kept: usize,
    pub undrawable: usize,
    pub edge_clipped: usize,
    pub absent: usize,
    pub unterminated: usize,
    pub missing_value: usize,
}

impl FilterStats {
    pub fn excluded(&self) -> usize {
        self.undrawable + self.edge_clipped + self.absent + self.unterminated + self.missing_value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilteredCells<T> {
    pub cells: Vec<T>,
    pub stats: FilterStats,
}

/// Filter text-source cells.
///
/// Cells with fewer than two points are always dropped. With `edge_crop`
/// set, a cell is also dropped when any point sits on `x = 0`,
/// `x = max_x`, `y = 0` or `y = max_y` of the global extent.
pub fn filter_text_cells(
    cells: Vec<Cell>,
    extent: &BoundingExtent,
    edge_crop: bool,
) -> FilteredCells<Cell> {
    let mut stats = FilterStats::default();
    let mut kept = Vec::with_capacity(cells.len());

    for cell in cells {
        if !cell.is_drawable() {
            debug!(cell = cell.id, points = cell.len(), "Excluding undrawable cell");
            stats.undrawable += 1;
        } else if edge_crop && extent.clips(&cell) {
            debug!(cell = cell.id, "Excluding edge-clipped cell");
            stats.edge_clipped += 1;
        } else {
            kept.push(cell);
        }
    }

    stats.kept = kept.len();
    FilteredCells { cells: kept, stats }
}

/// Filter tabular-source cells and attach their values.
///
/// Absent and unterminated cells are dropped, as are cells with no entry
/// in `values`. Any other lookup failure aborts the filter.
pub fn filter_tabular_cells(
    cells: Vec<TabularCell>,
    values: &ValueTable,
) -> CellResult<FilteredCells<AnnotatedCell>> {
    let mut stats = FilterStats::default();
    let mut kept = Vec::new();

    for scanned in cells {
        let cell = match scanned {
            TabularCell::Absent(id) => {
                debug!(cell = id, "Excluding absent cell");
                stats.absent += 1;
                continue;
            }
            TabularCell::Unterminated { id, row } => {
                debug!(cell = id, row, "Excluding unterminated cell");
                stats.unterminated += 1;
                continue;
            }
            TabularCell::Complete(cell) => cell,
        };

        if !cell.is_drawable() {
            debug!(cell = cell.id, points = cell.len(), "Excluding undrawable cell");
            stats.undrawable += 1;
            continue;
        }

        match values.lookup(cell.id) {
            Ok(value) => kept.push(AnnotatedCell::new(cell, value)),
            Err(err) if !err.is_fatal() => {
                debug!(cell = cell.id, error = %err, "Excluding cell without value");
                stats.missing_value += 1;
            }
            Err(err) => return Err(err),
        }
    }

    stats.kept = kept.len();
    Ok(FilteredCells { cells: kept, stats })
}
