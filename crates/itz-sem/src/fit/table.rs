//! Null-free numeric table handed to the estimator.

use std::collections::BTreeMap;

/// Column-major table of finite values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericTable {
    columns: BTreeMap<String, Vec<f64>>,
    /// Row index in the source dataset for each table row.
    source_rows: Vec<usize>,
}

impl NumericTable {
    pub(crate) fn new(source_rows: Vec<usize>) -> Self {
        Self {
            columns: BTreeMap::new(),
            source_rows,
        }
    }

    pub(crate) fn insert(&mut self, name: String, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.source_rows.len());
        self.columns.insert(name, values);
    }

    pub fn n_rows(&self) -> usize {
        self.source_rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Column names in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn source_rows(&self) -> &[usize] {
        &self.source_rows
    }

    /// Row-major copy, columns in `column_names` order.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n_rows())
            .map(|i| self.columns.values().map(|c| c[i]).collect())
            .collect()
    }
}
