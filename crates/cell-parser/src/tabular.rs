//! Tabular coordinate source: CSV with `X1,Y1,...,XK,YK` columns.
//!
//! Each column pair holds one cell, one point per row. A `(0, 0)` row
//! ends the cell. A cell whose first row is `(0, 0)` is absent. A cell
//! still producing nonzero points past the row threshold is treated as
//! unterminated and dropped.

use std::collections::HashMap;
use std::io::Read;

use cell_common::{BoundingExtent, Cell, CellError, CellResult, Point};
use tracing::debug;

use crate::parse_coordinate;

/// Row threshold past which nonzero points mark a cell unterminated.
pub const DEFAULT_MAX_ROWS: usize = 400;

/// Raw coordinate table, column-major, fields kept as text.
///
/// Fields are only parsed when a cell scan reaches them, so garbage
/// after a cell's `(0, 0)` terminator is never an error.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTable {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    columns: Vec<Vec<String>>,
    rows: usize,
}

impl CoordinateTable {
    /// Read a CSV table with a header row.
    pub fn from_reader<R: Read>(reader: R) -> CellResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| CellError::data_format(0, format!("unreadable header: {}", e)))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut columns = vec![Vec::new(); headers.len()];
        let mut rows = 0;
        for (row, record) in rdr.records().enumerate() {
            let record = record
                .map_err(|e| CellError::data_format(0, format!("row {}: {}", row, e)))?;
            for (col, column) in columns.iter_mut().enumerate() {
                column.push(record.get(col).unwrap_or("").to_string());
            }
            rows += 1;
        }

        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();

        Ok(Self {
            headers,
            index,
            columns,
            rows,
        })
    }

    pub fn from_csv_str(csv: &str) -> CellResult<Self> {
        Self::from_reader(csv.as_bytes())
    }

    /// Number of cells, one per column pair. A trailing unpaired column
    /// is ignored.
    pub fn cell_count(&self) -> usize {
        self.headers.len() / 2
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    fn column(&self, name: &str, cell: usize) -> CellResult<&[String]> {
        self.index
            .get(name)
            .map(|&i| self.columns[i].as_slice())
            .ok_or_else(|| {
                CellError::data_format(cell, format!("missing expected column '{}'", name))
            })
    }

    /// Scan the column pair of cell `id` (1-based).
    pub fn scan_cell(&self, id: usize, max_rows: usize) -> CellResult<TabularCell> {
        let xs = self.column(&format!("X{}", id), id)?;
        let ys = self.column(&format!("Y{}", id), id)?;

        let point_at = |row: usize| -> CellResult<Point> {
            let x = parse_coordinate(&xs[row], id).map_err(|e| at_row(e, row))?;
            let y = parse_coordinate(&ys[row], id).map_err(|e| at_row(e, row))?;
            Ok(Point::new(x, y))
        };

        if self.rows == 0 || point_at(0)?.is_origin() {
            return Ok(TabularCell::Absent(id));
        }

        let mut points = Vec::new();
        for row in 0..self.rows {
            let point = point_at(row)?;
            if point.is_origin() {
                break;
            }
            if row > max_rows && point.x != 0 && point.y != 0 {
                return Ok(TabularCell::Unterminated { id, row });
            }
            points.push(point);
        }

        Ok(TabularCell::Complete(Cell::new(id, points)))
    }
}

fn at_row(err: CellError, row: usize) -> CellError {
    match err {
        CellError::DataFormat { cell, message } => CellError::DataFormat {
            cell,
            message: format!("row {}: {}", row, message),
        },
        other => other,
    }
}

/// Result of scanning one column pair.
#[derive(Debug, Clone, PartialEq)]
pub enum TabularCell {
    /// First row is `(0, 0)`.
    Absent(usize),
    /// Nonzero point found at `row`, past the threshold.
    Unterminated { id: usize, row: usize },
    /// Points up to the terminator (or the end of the table).
    Complete(Cell),
}

/// All scanned cells of a table, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedTable {
    pub cells: Vec<TabularCell>,
    pub extent: BoundingExtent,
}

/// Scan every cell of `table`.
///
/// The extent covers complete cells only.
pub fn parse_tabular(table: &CoordinateTable, max_rows: usize) -> CellResult<ParsedTable> {
    let cells = (1..=table.cell_count())
        .map(|id| table.scan_cell(id, max_rows))
        .collect::<CellResult<Vec<_>>>()?;

    let extent = BoundingExtent::from_points(cells.iter().flat_map(|c| match c {
        TabularCell::Complete(cell) => cell.points.clone(),
        _ => Vec::new(),
    }));

    debug!(
        cells = cells.len(),
        rows = table.row_count(),
        max_x = extent.max_x,
        max_y = extent.max_y,
        "Parsed tabular coordinates"
    );

    Ok(ParsedTable { cells, extent })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_stops_at_terminator() {
        let table = CoordinateTable::from_csv_str("X1,Y1\n5,5\n5,15\n0,0\n99,99\n").unwrap();
        let cell = table.scan_cell(1, DEFAULT_MAX_ROWS).unwrap();
        assert_eq!(
            cell,
            TabularCell::Complete(Cell::new(1, vec![Point::new(5, 5), Point::new(5, 15)]))
        );
    }

    #[test]
    fn test_garbage_after_terminator_is_ignored() {
        let table = CoordinateTable::from_csv_str("X1,Y1\n5,5\n0,0\nabc,\n").unwrap();
        assert!(matches!(
            table.scan_cell(1, DEFAULT_MAX_ROWS).unwrap(),
            TabularCell::Complete(_)
        ));
    }

    #[test]
    fn test_missing_column_names_cell() {
        let table = CoordinateTable::from_csv_str("X1,Y1,X2,Z2\n1,1,2,2\n").unwrap();
        let err = table.scan_cell(2, DEFAULT_MAX_ROWS).unwrap_err();
        match err {
            CellError::DataFormat { cell, message } => {
                assert_eq!(cell, 2);
                assert!(message.contains("Y2"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_bad_token_reports_row() {
        let table = CoordinateTable::from_csv_str("X1,Y1\n5,5\n5,x\n0,0\n").unwrap();
        let err = table.scan_cell(1, DEFAULT_MAX_ROWS).unwrap_err();
        assert!(err.to_string().contains("row 1"), "{err}");
    }

    #[test]
    fn test_empty_table_cells_are_absent() {
        let table = CoordinateTable::from_csv_str("X1,Y1\n").unwrap();
        assert_eq!(
            table.scan_cell(1, DEFAULT_MAX_ROWS).unwrap(),
            TabularCell::Absent(1)
        );
    }
}
