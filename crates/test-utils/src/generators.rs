//! Generators for coordinate inputs.
//!
//! These build the two input layouts from plain point lists so tests can
//! state cells as geometry rather than as CSV text.

/// Axis-aligned square outline starting at `(x0, y0)`, clockwise in
/// image space, without a closing point.
pub fn square(x0: i32, y0: i32, side: i32) -> Vec<(i32, i32)> {
    vec![
        (x0, y0),
        (x0 + side, y0),
        (x0 + side, y0 + side),
        (x0, y0 + side),
    ]
}

/// One text record: `x,y,x,y,...`.
///
/// # Example
///
/// ```
/// use test_utils::text_record;
///
/// assert_eq!(text_record(&[(1, 2), (3, 4)]), "1,2,3,4");
/// ```
pub fn text_record(points: &[(i32, i32)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{},{}", x, y))
        .collect::<Vec<_>>()
        .join(",")
}

/// A text source, one record per line.
pub fn text_records(cells: &[Vec<(i32, i32)>]) -> String {
    let mut out = String::new();
    for cell in cells {
        out.push_str(&text_record(cell));
        out.push('\n');
    }
    out
}

/// A tabular CSV source with `X1,Y1,...` headers.
///
/// Each cell's column pair lists its points, then a `(0, 0)` terminator,
/// then zeros to the common row count. An empty point list yields an
/// absent cell.
pub fn tabular_csv(cells: &[Vec<(i32, i32)>]) -> String {
    let rows = cells.iter().map(|c| c.len() + 1).max().unwrap_or(1);
    tabular_csv_raw(cells, rows)
}

/// Like [`tabular_csv`] but without terminators: every column pair is
/// padded with zeros to exactly `rows` rows, and points beyond `rows`
/// are dropped.
pub fn tabular_csv_raw(cells: &[Vec<(i32, i32)>], rows: usize) -> String {
    let mut out = String::new();
    let headers: Vec<String> = (1..=cells.len())
        .map(|k| format!("X{k},Y{k}"))
        .collect();
    out.push_str(&headers.join(","));
    out.push('\n');

    for row in 0..rows {
        let fields: Vec<String> = cells
            .iter()
            .map(|cell| {
                let (x, y) = cell.get(row).copied().unwrap_or((0, 0));
                format!("{},{}", x, y)
            })
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// A value-table CSV with the default column names.
pub fn value_table_csv(entries: &[(usize, f64)]) -> String {
    let mut out = String::from("order,scaled predicted cyto\n");
    for (id, value) in entries {
        out.push_str(&format!("{},{}\n", id, value));
    }
    out
}

/// A straight run of `len` points along x, starting at `(x0, y)`.
pub fn long_cell(x0: i32, y: i32, len: usize) -> Vec<(i32, i32)> {
    (0..len).map(|i| (x0 + i as i32, y)).collect()
}
