//! Column-oriented storage for a parsed radar log.

use std::collections::HashMap;

use thiserror::Error;

/// Errors raised when a table does not hold what an operation needs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Mapping from header name to one `f64` per time step.
///
/// All columns share the same length. Header order follows the source file,
/// columns added later are appended after it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnTable {
    headers: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
    rows: usize,
}

impl ColumnTable {
    /// Creates an empty table with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from `(header, values)` pairs.
    ///
    /// Fails with `InvalidInput` on a repeated header or when the columns
    /// differ in length.
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (header, values) in columns {
            let header = header.into();
            if table.contains(&header) {
                return Err(TableError::InvalidInput(format!(
                    "duplicate column '{}'",
                    header
                )));
            }
            table.insert(header, values)?;
        }
        Ok(table)
    }

    /// Number of time steps (rows).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if the table has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Header names in table order.
    pub fn headers(&self) -> impl Iterator<Item = &str> + '_ {
        self.headers.iter().map(String::as_str)
    }

    pub fn contains(&self, header: &str) -> bool {
        self.columns.contains_key(header)
    }

    pub fn get(&self, header: &str) -> Option<&[f64]> {
        self.columns.get(header).map(Vec::as_slice)
    }

    /// Like [`get`](Self::get) but fails with `MissingColumn`.
    pub fn column(&self, header: &str) -> Result<&[f64]> {
        self.get(header)
            .ok_or_else(|| TableError::MissingColumn(header.to_string()))
    }

    /// Adds a column, or replaces the values of an existing one in place.
    ///
    /// The first column fixes the row count; every later column must match
    /// it or the call fails with `InvalidInput` and the table is unchanged.
    pub fn insert(&mut self, header: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let header = header.into();

        if !self.headers.is_empty() && values.len() != self.rows {
            return Err(TableError::InvalidInput(format!(
                "column '{}' has {} values, table has {} rows",
                header,
                values.len(),
                self.rows
            )));
        }

        if self.headers.is_empty() {
            self.rows = values.len();
        }
        if !self.columns.contains_key(&header) {
            self.headers.push(header.clone());
        }
        self.columns.insert(header, values);
        Ok(())
    }

    /// Iterates `(header, values)` in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
        self.headers
            .iter()
            .map(move |h| (h.as_str(), self.columns[h].as_slice()))
    }
}
