//! ColumnStore implementation
//!
//! BTreeMap of column name to `Vec<Value>`, with sorted insertion on the
//! index column.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, StoreError};
use crate::value::{self, Value};

use super::view::{ILoc, Loc};

/// A row keyed by column name
pub type Record = BTreeMap<String, Value>;

/// In-memory column store sorted by its index column
///
/// ## Invariants
/// - every column holds the same number of values
/// - the index column is non-decreasing; equal index values keep
///   insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStore {
    /// Column name → values, iterated in lexicographic name order
    pub(super) columns: BTreeMap<String, Vec<Value>>,

    /// Name of the column that defines row order
    pub(super) index_name: String,
}

impl ColumnStore {
    /// Create an empty store with the given columns
    ///
    /// Fails if `index_name` is not among `column_names` or a name repeats.
    pub fn new<I, S>(column_names: I, index_name: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index_name = index_name.into();
        let mut columns = BTreeMap::new();
        for name in column_names {
            let name = name.into();
            if columns.insert(name.clone(), Vec::new()).is_some() {
                return Err(StoreError::DuplicateColumn(name));
            }
        }

        if !columns.contains_key(&index_name) {
            return Err(StoreError::Config(format!(
                "index column '{}' is not among the declared columns",
                index_name
            )));
        }

        Ok(Self {
            columns,
            index_name,
        })
    }

    /// Create a store and insert `rows`, each ordered like `column_names`
    pub fn from_rows<S, R>(column_names: &[S], index_name: &str, rows: R) -> Result<Self>
    where
        S: AsRef<str>,
        R: IntoIterator<Item = Vec<Value>>,
    {
        let mut store = Self::new(column_names.iter().map(|s| s.as_ref()), index_name)?;
        store.add_rows(rows, column_names)?;
        Ok(store)
    }

    /// Create a store and insert `records`
    pub fn from_records<S, R>(column_names: &[S], index_name: &str, records: R) -> Result<Self>
    where
        S: AsRef<str>,
        R: IntoIterator<Item = Record>,
    {
        let mut store = Self::new(column_names.iter().map(|s| s.as_ref()), index_name)?;
        store.add_records(records)?;
        Ok(store)
    }

    /// Create a store and insert optional `rows`, then optional `records`
    ///
    /// Rows are ordered like `column_names`. Both sources may be given; all
    /// rows go in before any record, so rows win ties on the index.
    pub fn with_data<S: AsRef<str>>(
        column_names: &[S],
        index_name: &str,
        rows: Option<Vec<Vec<Value>>>,
        records: Option<Vec<Record>>,
    ) -> Result<Self> {
        let mut store = Self::new(column_names.iter().map(|s| s.as_ref()), index_name)?;
        if let Some(rows) = rows {
            store.add_rows(rows, column_names)?;
        }
        if let Some(records) = records {
            store.add_records(records)?;
        }
        Ok(store)
    }

    /// Build a store from raw parts without checking invariants
    pub(crate) fn from_parts(index_name: String, columns: BTreeMap<String, Vec<Value>>) -> Self {
        Self {
            columns,
            index_name,
        }
    }

    pub(crate) fn raw_columns(&self) -> &BTreeMap<String, Vec<Value>> {
        &self.columns
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Insert one row, keeping the index column sorted
    ///
    /// `key_order` names the column of each value in `row` and must list
    /// every column exactly once. The row goes after any existing rows with
    /// an equal index value. Nothing is modified when validation fails.
    pub fn add_row<K: AsRef<str>>(&mut self, row: Vec<Value>, key_order: &[K]) -> Result<()> {
        let index_slot = self.check_key_order(key_order, row.len())?;
        let position = self.upper_bound(&row[index_slot]);

        tracing::trace!(position, rows = self.len(), "inserting row");

        for (key, value) in key_order.iter().zip(row) {
            if let Some(column) = self.columns.get_mut(key.as_ref()) {
                column.insert(position, value);
            }
        }
        Ok(())
    }

    /// Insert rows left to right
    ///
    /// Stops at the first invalid row; earlier rows stay inserted.
    pub fn add_rows<K, R>(&mut self, rows: R, key_order: &[K]) -> Result<()>
    where
        K: AsRef<str>,
        R: IntoIterator<Item = Vec<Value>>,
    {
        for row in rows {
            self.add_row(row, key_order)?;
        }
        Ok(())
    }

    /// Insert one record, using its own keys as the column order
    pub fn add_record(&mut self, record: Record) -> Result<()> {
        let (keys, row): (Vec<String>, Vec<Value>) = record.into_iter().unzip();
        self.add_row(row, &keys)
    }

    /// Insert records left to right
    pub fn add_records<R: IntoIterator<Item = Record>>(&mut self, records: R) -> Result<()> {
        for record in records {
            self.add_record(record)?;
        }
        Ok(())
    }

    /// Validate a key order against the column set
    ///
    /// Returns the slot of the index column within `key_order`.
    fn check_key_order<K: AsRef<str>>(&self, key_order: &[K], row_len: usize) -> Result<usize> {
        if row_len != key_order.len() {
            return Err(StoreError::Alignment(format!(
                "row has {} values but {} keys",
                row_len,
                key_order.len()
            )));
        }

        let mut seen = BTreeSet::new();
        let mut index_slot = None;
        for (slot, key) in key_order.iter().enumerate() {
            let key = key.as_ref();
            if !self.columns.contains_key(key) {
                return Err(StoreError::ColumnNotFound(key.to_string()));
            }
            if !seen.insert(key) {
                return Err(StoreError::Alignment(format!(
                    "column '{}' appears more than once in row keys",
                    key
                )));
            }
            if key == self.index_name {
                index_slot = Some(slot);
            }
        }

        if seen.len() != self.columns.len() {
            let missing: Vec<&str> = self
                .columns
                .keys()
                .map(String::as_str)
                .filter(|name| !seen.contains(name))
                .collect();
            return Err(StoreError::Alignment(format!(
                "row is missing columns: {}",
                missing.join(", ")
            )));
        }

        index_slot.ok_or_else(|| StoreError::ColumnNotFound(self.index_name.clone()))
    }

    // =========================================================================
    // Binary Search
    // =========================================================================

    /// First position whose index value is `>= value`
    pub(crate) fn lower_bound(&self, value: &Value) -> usize {
        self.index().partition_point(|v| v < value)
    }

    /// First position whose index value is `> value`
    pub(crate) fn upper_bound(&self, value: &Value) -> usize {
        self.index().partition_point(|v| v <= value)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The index column's values
    pub fn index(&self) -> &[Value] {
        self.columns
            .get(&self.index_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Name of the index column
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column names in lexicographic order
    pub fn column_names(&self, include_index: bool) -> Vec<String> {
        self.columns
            .keys()
            .filter(|name| include_index || **name != self.index_name)
            .cloned()
            .collect()
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Values of the named column
    pub fn column(&self, name: &str) -> Result<&[Value]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| StoreError::ColumnNotFound(name.to_string()))
    }

    /// Rename a column; the index name follows if it is the one renamed
    pub fn rename_column(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if old_name == new_name {
            return Err(StoreError::DuplicateColumn(new_name.to_string()));
        }
        if self.columns.contains_key(new_name) {
            return Err(StoreError::DuplicateColumn(new_name.to_string()));
        }
        let values = self
            .columns
            .remove(old_name)
            .ok_or_else(|| StoreError::ColumnNotFound(old_name.to_string()))?;

        self.columns.insert(new_name.to_string(), values);
        if self.index_name == old_name {
            self.index_name = new_name.to_string();
        }

        tracing::debug!(old_name, new_name, "renamed column");
        Ok(())
    }

    /// Value-based accessor
    pub fn loc(&self) -> Loc<'_> {
        Loc::new(self)
    }

    /// Position-based accessor
    pub fn iloc(&self) -> ILoc<'_> {
        ILoc::new(self)
    }

    /// Iterate rows as one-row stores
    pub fn iter(&self) -> impl Iterator<Item = ColumnStore> + '_ {
        (0..self.len()).map(move |i| self.slice_positions(i, i + 1))
    }

    /// Copy rows `[start, stop)` of every column into a new store
    ///
    /// Bounds are clamped; `stop <= start` yields an empty store.
    pub(crate) fn slice_positions(&self, start: usize, stop: usize) -> ColumnStore {
        let stop = stop.min(self.len());
        let start = start.min(stop);
        Self {
            columns: self
                .columns
                .iter()
                .map(|(name, values)| (name.clone(), values[start..stop].to_vec()))
                .collect(),
            index_name: self.index_name.clone(),
        }
    }

    /// Check both store invariants
    pub fn validate(&self) -> Result<()> {
        if !self.columns.contains_key(&self.index_name) {
            return Err(StoreError::Config(format!(
                "index column '{}' is missing",
                self.index_name
            )));
        }

        let rows = self.len();
        for (name, values) in &self.columns {
            if values.len() != rows {
                return Err(StoreError::Alignment(format!(
                    "column '{}' has {} values, index has {}",
                    name,
                    values.len(),
                    rows
                )));
            }
        }

        if let Some(pos) = self.index().windows(2).position(|w| w[0] > w[1]) {
            return Err(StoreError::Alignment(format!(
                "index column '{}' decreases at position {}",
                self.index_name,
                pos + 1
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Row-major values with their column names, both in sorted name order
    pub fn to_rows(&self) -> (Vec<Vec<Value>>, Vec<String>) {
        let names = self.column_names(true);
        let rows: Vec<Vec<Value>> = (0..self.len())
            .map(|i| self.columns.values().map(|values| values[i].clone()).collect())
            .collect();
        (rows, names)
    }

    /// One record per row
    pub fn to_records(&self) -> Vec<Record> {
        (0..self.len())
            .map(|i| {
                self.columns
                    .iter()
                    .map(|(name, values)| (name.clone(), values[i].clone()))
                    .collect()
            })
            .collect()
    }

    // =========================================================================
    // Index Representation
    // =========================================================================

    /// Replace timestamps with seconds since the Unix epoch
    ///
    /// Converts `column`, or the index column when `None`. Null cells are
    /// kept. The mapping is monotonic, so the index stays sorted.
    pub fn datetime_to_seconds(&mut self, column: Option<&str>) -> Result<()> {
        self.convert_column(column, "timestamp", |cell| match cell {
            Value::Timestamp(ts) => Some(Value::Float(value::datetime_to_seconds(ts))),
            _ => None,
        })
    }

    /// Replace seconds since the Unix epoch with timestamps
    ///
    /// Inverse of [`ColumnStore::datetime_to_seconds`]; accepts `Int` and
    /// `Float` cells.
    pub fn seconds_to_datetime(&mut self, column: Option<&str>) -> Result<()> {
        self.convert_column(column, "epoch seconds", |cell| {
            cell.as_f64()
                .and_then(value::seconds_to_datetime)
                .map(Value::Timestamp)
        })
    }

    /// Map every non-null cell of a column, all or nothing
    fn convert_column<F>(&mut self, column: Option<&str>, expected: &'static str, f: F) -> Result<()>
    where
        F: Fn(&Value) -> Option<Value>,
    {
        let name = column.unwrap_or(&self.index_name).to_string();
        let values = self
            .columns
            .get_mut(&name)
            .ok_or_else(|| StoreError::ColumnNotFound(name.clone()))?;

        let converted = values
            .iter()
            .map(|cell| match cell {
                Value::Null => Ok(Value::Null),
                other => f(other).ok_or_else(|| StoreError::TypeMismatch {
                    column: name.clone(),
                    expected,
                    found: other.kind_name(),
                }),
            })
            .collect::<Result<Vec<_>>>()?;

        *values = converted;
        tracing::debug!(column = %name, to = expected, "converted column");
        Ok(())
    }
}
