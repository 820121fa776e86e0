//! Value-table loader.
//!
//! Reads a CSV of per-cell measurements into a [`ValueTable`]. The scaled
//! column is used when present; otherwise the raw column is min-max
//! scaled into [0, 1].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use cell_common::{CellError, CellResult, ValueTable};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Column names of the value table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueColumns {
    #[serde(default = "default_order_column")]
    pub order_column: String,
    #[serde(default = "default_value_column")]
    pub value_column: String,
    /// Unscaled column to fall back on when `value_column` is absent.
    #[serde(default = "default_raw_column")]
    pub raw_column: Option<String>,
}

fn default_order_column() -> String {
    "order".to_string()
}

fn default_value_column() -> String {
    "scaled predicted cyto".to_string()
}

fn default_raw_column() -> Option<String> {
    Some("predicted cyto".to_string())
}

impl Default for ValueColumns {
    fn default() -> Self {
        Self {
            order_column: default_order_column(),
            value_column: default_value_column(),
            raw_column: default_raw_column(),
        }
    }
}

enum Source {
    Scaled(usize),
    Raw(usize),
}

/// Load a value table from CSV.
///
/// Header names are trimmed before matching. Blank rows and rows with an
/// empty value field are skipped. A repeated identifier keeps the last
/// row's value.
pub fn load_value_table<R: Read>(reader: R, columns: &ValueColumns) -> CellResult<ValueTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| CellError::data_format(0, format!("unreadable value table header: {}", e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let position = |name: &str| headers.iter().position(|h| h == name.trim());

    let order_idx = position(&columns.order_column).ok_or_else(|| {
        CellError::data_format(
            0,
            format!("missing expected column '{}'", columns.order_column),
        )
    })?;

    let source = match position(&columns.value_column) {
        Some(idx) => Source::Scaled(idx),
        None => match columns.raw_column.as_deref().and_then(position) {
            Some(idx) => Source::Raw(idx),
            None => {
                return Err(CellError::data_format(
                    0,
                    format!("missing expected column '{}'", columns.value_column),
                ))
            }
        },
    };
    let value_idx = match source {
        Source::Scaled(idx) | Source::Raw(idx) => idx,
    };

    let mut entries = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| CellError::data_format(row, e.to_string()))?;
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let order = parse_order(record.get(order_idx).unwrap_or(""), row)?;
        let field = record.get(value_idx).unwrap_or("");
        if field.is_empty() {
            debug!(row, cell = order, "Skipping value row without a value");
            continue;
        }
        let value: f64 = field.parse().map_err(|_| {
            CellError::data_format(row, format!("'{}' is not a number", field))
        })?;
        entries.push((order, value));
    }

    if let Source::Raw(_) = source {
        min_max_scale(&mut entries)?;
    }

    let table: ValueTable = entries.into_iter().collect();
    info!(
        entries = table.len(),
        scaled = matches!(source, Source::Raw(_)),
        "Loaded value table"
    );
    Ok(table)
}

/// Load a value table from a CSV file.
pub fn load_value_table_file(path: impl AsRef<Path>, columns: &ValueColumns) -> CellResult<ValueTable> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| CellError::Io(format!("{}: {}", path.display(), e)))?;
    load_value_table(file, columns)
}

fn parse_order(field: &str, row: usize) -> CellResult<usize> {
    let invalid = || CellError::data_format(row, format!("'{}' is not a cell identifier", field));
    if let Ok(id) = field.parse::<usize>() {
        return if id >= 1 { Ok(id) } else { Err(invalid()) };
    }
    match field.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v >= 1.0 => Ok(v as usize),
        _ => Err(invalid()),
    }
}

fn min_max_scale(entries: &mut [(usize, f64)]) -> CellResult<()> {
    let (min, max) = entries
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, v)| {
            (lo.min(v), hi.max(v))
        });
    if entries.is_empty() {
        return Ok(());
    }
    let span = max - min;
    if span <= 0.0 {
        return Err(CellError::data_format(
            0,
            format!("raw value column is constant ({}), cannot scale", min),
        ));
    }
    for (_, v) in entries.iter_mut() {
        *v = (*v - min) / span;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_whitespace_is_ignored() {
        let csv = " order,scaled predicted cyto\n1,0.25\n2,0.75\n";
        let table = load_value_table(csv.as_bytes(), &ValueColumns::default()).unwrap();
        assert_eq!(table.get(1), Some(0.25));
        assert_eq!(table.get(2), Some(0.75));
    }

    #[test]
    fn test_raw_column_is_min_max_scaled() {
        let csv = "order,predicted cyto\n1,10\n2,20\n3,30\n";
        let table = load_value_table(csv.as_bytes(), &ValueColumns::default()).unwrap();
        assert_eq!(table.get(1), Some(0.0));
        assert_eq!(table.get(2), Some(0.5));
        assert_eq!(table.get(3), Some(1.0));
    }

    #[test]
    fn test_constant_raw_column_is_rejected() {
        let csv = "order,predicted cyto\n1,4\n2,4\n";
        let err = load_value_table(csv.as_bytes(), &ValueColumns::default()).unwrap_err();
        assert_eq!(err.kind(), "DataFormatError");
    }

    #[test]
    fn test_order_must_be_positive_integer() {
        let csv = "order,scaled predicted cyto\n0,0.5\n";
        assert!(load_value_table(csv.as_bytes(), &ValueColumns::default()).is_err());
        let csv = "order,scaled predicted cyto\n2.0,0.5\n";
        let table = load_value_table(csv.as_bytes(), &ValueColumns::default()).unwrap();
        assert!(table.contains(2));
    }

    #[test]
    fn test_missing_columns() {
        let csv = "id,value\n1,0.5\n";
        let err = load_value_table(csv.as_bytes(), &ValueColumns::default()).unwrap_err();
        assert!(err.to_string().contains("order"));
    }
}
