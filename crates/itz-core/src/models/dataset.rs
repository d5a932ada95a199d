//! Column-oriented numeric dataset with nullable cells.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::DataError;

/// A cleaned, indexed table of numeric columns (one row per tract or parcel).
///
/// Non-finite values are stored as nulls. Every column holds exactly
/// `n_rows` cells, including after deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    n_rows: usize,
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl Dataset {
    /// An empty dataset whose columns must all have `n_rows` cells.
    pub fn new(n_rows: usize) -> Self {
        Self {
            n_rows,
            columns: BTreeMap::new(),
        }
    }

    /// Build from named columns. The first column fixes the row count.
    pub fn from_columns<I, S>(columns: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = (S, Vec<Option<f64>>)>,
        S: Into<String>,
    {
        let mut iter = columns.into_iter().peekable();
        let n_rows = iter.peek().map(|(_, v)| v.len()).unwrap_or(0);
        let mut ds = Self::new(n_rows);
        for (name, values) in iter {
            ds.insert_column(name, values)?;
        }
        Ok(ds)
    }

    /// Insert or replace a nullable column.
    pub fn insert_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<(), DataError> {
        let name = name.into();
        if values.len() != self.n_rows {
            return Err(DataError::LengthMismatch {
                column: name,
                expected: self.n_rows,
                actual: values.len(),
            });
        }
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect();
        self.columns.insert(name, values);
        Ok(())
    }

    /// Insert or replace a column of plain values; NaN becomes null.
    pub fn insert_values(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<(), DataError> {
        self.insert_column(name, values.into_iter().map(Some).collect())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Result<&[Option<f64>], DataError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| DataError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Indices of rows where every listed column is non-null.
    pub fn complete_rows(&self, names: &[&str]) -> Result<Vec<usize>, DataError> {
        let cols = names
            .iter()
            .map(|n| self.column(n))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((0..self.n_rows)
            .filter(|&i| cols.iter().all(|c| c.get(i).is_some_and(Option::is_some)))
            .collect())
    }
}

#[derive(Deserialize)]
struct RawDataset {
    n_rows: usize,
    #[serde(default)]
    columns: BTreeMap<String, Vec<Option<f64>>>,
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawDataset::deserialize(deserializer)?;
        let mut ds = Self::new(raw.n_rows);
        for (name, values) in raw.columns {
            ds.insert_column(name, values).map_err(serde::de::Error::custom)?;
        }
        Ok(ds)
    }
}
