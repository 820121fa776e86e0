//! Scaled scalar values keyed by cell identifier.

use std::collections::HashMap;

use crate::error::{CellError, CellResult};

/// Mapping from cell identifier to a scaled value.
///
/// Built once, read-only afterwards. Not every cell needs an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueTable {
    values: HashMap<usize, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value of `id`. A later insert wins.
    pub fn insert(&mut self, id: usize, value: f64) {
        self.values.insert(id, value);
    }

    pub fn get(&self, id: usize) -> Option<f64> {
        self.values.get(&id).copied()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.values.contains_key(&id)
    }

    /// Value of `id`, or `MissingValue` when the table has no entry.
    pub fn lookup(&self, id: usize) -> CellResult<f64> {
        self.get(id).ok_or(CellError::MissingValue(id))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(usize, f64)> for ValueTable {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        let mut table = ValueTable::new();
        for (id, value) in iter {
            table.insert(id, value);
        }
        table
    }
}
