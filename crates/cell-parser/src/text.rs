//! Text coordinate source: one cell per line.

use cell_common::{BoundingExtent, Cell, CellError, CellResult, Point};
use tracing::debug;

use crate::{parse_coordinate, ParsedCells};

/// Parse a single `x,y,x,y,...` record into cell `id`.
pub fn parse_text_record(id: usize, record: &str) -> CellResult<Cell> {
    let record = record.trim();
    if record.is_empty() {
        return Err(CellError::data_format(id, "empty record"));
    }

    let tokens: Vec<&str> = record.split(',').collect();
    if tokens.len() % 2 != 0 {
        return Err(CellError::data_format(
            id,
            format!("odd coordinate count ({})", tokens.len()),
        ));
    }

    let points = tokens
        .chunks_exact(2)
        .map(|pair| {
            Ok(Point::new(
                parse_coordinate(pair[0], id)?,
                parse_coordinate(pair[1], id)?,
            ))
        })
        .collect::<CellResult<Vec<_>>>()?;

    Ok(Cell::new(id, points))
}

/// Parse a whole text source.
///
/// Cells are numbered from 1 by line. The extent covers every parsed
/// cell and is final once this returns.
pub fn parse_text(input: &str) -> CellResult<ParsedCells> {
    let content = input.trim();
    if content.is_empty() {
        return Err(CellError::data_format(0, "input contains no cell records"));
    }

    let cells = content
        .lines()
        .enumerate()
        .map(|(i, line)| parse_text_record(i + 1, line))
        .collect::<CellResult<Vec<_>>>()?;

    let extent = BoundingExtent::from_cells(&cells);

    debug!(
        cells = cells.len(),
        max_x = extent.max_x,
        max_y = extent.max_y,
        "Parsed text coordinates"
    );

    Ok(ParsedCells { cells, extent })
}
