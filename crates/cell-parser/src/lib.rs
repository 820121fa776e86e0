//! Coordinate parsing and cell filtering for segmented-cell outlines.
//!
//! Two input layouts are supported:
//! - Text: one cell per line, a flat `x,y,x,y,...` list
//! - Tabular: CSV with `X1,Y1,...,XK,YK` columns, one point per row,
//!   terminated by a `(0, 0)` row
//!
//! Parsing produces cells plus a frozen [`BoundingExtent`]; filtering is a
//! second pass that only reads that extent.

pub mod filter;
pub mod tabular;
pub mod text;
pub mod values;

pub use filter::{filter_tabular_cells, filter_text_cells, FilterStats, FilteredCells};
pub use tabular::{parse_tabular, CoordinateTable, ParsedTable, TabularCell, DEFAULT_MAX_ROWS};
pub use text::{parse_text, parse_text_record};
pub use values::{load_value_table, load_value_table_file, ValueColumns};

use cell_common::{BoundingExtent, Cell, CellError, CellResult};

/// Cells parsed from a text source, with the extent of all of them.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCells {
    pub cells: Vec<Cell>,
    pub extent: BoundingExtent,
}

/// Parse one coordinate token.
///
/// Integers are accepted as-is. Spreadsheet exports write whole numbers as
/// `12.0`, so a float with no fractional part is accepted too. Pixel
/// coordinates are never negative.
pub(crate) fn parse_coordinate(token: &str, cell: usize) -> CellResult<i32> {
    let token = token.trim();
    if token.is_empty() {
        return Err(CellError::data_format(cell, "empty coordinate field"));
    }
    let value = match token.parse::<i32>() {
        Ok(v) => v,
        Err(_) => match token.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() <= i32::MAX as f64 => v as i32,
            _ => {
                return Err(CellError::data_format(
                    cell,
                    format!("'{}' is not an integer coordinate", token),
                ))
            }
        },
    };
    if value < 0 {
        return Err(CellError::data_format(
            cell,
            format!("negative coordinate {}", value),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate_forms() {
        assert_eq!(parse_coordinate("42", 1).unwrap(), 42);
        assert_eq!(parse_coordinate(" 7 ", 1).unwrap(), 7);
        assert_eq!(parse_coordinate("12.0", 1).unwrap(), 12);
        assert_eq!(parse_coordinate("2147483647", 1).unwrap(), i32::MAX);
        assert_eq!(parse_coordinate("-0", 1).unwrap(), 0);
    }

    #[test]
    fn test_negative_coordinates_are_rejected() {
        for bad in ["-1", "-12.0", "-2147483648"] {
            let err = parse_coordinate(bad, 4).unwrap_err();
            assert!(err.to_string().contains("negative"), "{bad}: {err}");
        }
    }

    #[test]
    fn test_parse_coordinate_rejects_garbage() {
        for bad in ["", "abc", "1.5", "NaN", "1e40"] {
            let err = parse_coordinate(bad, 9).unwrap_err();
            assert!(matches!(err, CellError::DataFormat { cell: 9, .. }), "{bad}");
        }
    }
}
