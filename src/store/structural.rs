//! Structural operations
//!
//! Row-wise `merge` and column-wise `expand` of two stores. Both validate
//! everything before touching the receiver, so a failed call leaves it as
//! it was.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StoreError};

use super::ColumnStore;

/// How `expand` aligns the incoming store with the receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpandMode {
    /// Equal row counts and identical index values position by position
    #[default]
    Strict,
}

impl FromStr for ExpandMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(ExpandMode::Strict),
            other => Err(StoreError::Config(format!("unknown expand mode '{}'", other))),
        }
    }
}

impl fmt::Display for ExpandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandMode::Strict => f.write_str("strict"),
        }
    }
}

/// Where a merged row comes from
#[derive(Debug, Clone, Copy)]
enum Source {
    Ours,
    Theirs(usize),
}

impl ColumnStore {
    /// Insert every row of `other` as if by repeated [`ColumnStore::add_row`]
    ///
    /// `other` must have exactly the same columns, otherwise this is an
    /// alignment error. Rows of `other` land after existing rows with an
    /// equal index value and keep their own relative order among ties.
    pub fn merge(&mut self, other: &ColumnStore) -> Result<()> {
        for name in other.columns.keys() {
            if !self.columns.contains_key(name) {
                return Err(StoreError::Alignment(format!(
                    "merged store has extra column '{}'",
                    name
                )));
            }
        }
        if let Some(name) = self.columns.keys().find(|n| !other.columns.contains_key(*n)) {
            return Err(StoreError::Alignment(format!(
                "merged store lacks column '{}'",
                name
            )));
        }

        // Keyed by our index column, which need not be the other store's index
        let theirs = other.column(&self.index_name)?;
        let mut order: Vec<usize> = (0..theirs.len()).collect();
        order.sort_by(|&a, &b| theirs[a].cmp(&theirs[b]));

        let ours = self.index();
        let mut plan = Vec::with_capacity(ours.len() + order.len());
        let (mut i, mut j) = (0, 0);
        while i < ours.len() && j < order.len() {
            if ours[i] <= theirs[order[j]] {
                plan.push(Source::Ours);
                i += 1;
            } else {
                plan.push(Source::Theirs(order[j]));
                j += 1;
            }
        }
        plan.extend(std::iter::repeat(Source::Ours).take(ours.len() - i));
        plan.extend(order[j..].iter().map(|&k| Source::Theirs(k)));

        for (name, column) in self.columns.iter_mut() {
            let incoming = other.column(name)?;
            let mut existing = std::mem::take(column).into_iter();
            *column = plan
                .iter()
                .filter_map(|source| match source {
                    Source::Ours => existing.next(),
                    Source::Theirs(k) => Some(incoming[*k].clone()),
                })
                .collect();
        }

        tracing::debug!(
            merged = other.len(),
            rows = self.len(),
            "merged store"
        );
        Ok(())
    }

    /// Attach the non-index columns of `other` as new columns
    ///
    /// In [`ExpandMode::Strict`] both stores must have the same row count
    /// and the same index values at every position, and none of `other`'s
    /// non-index columns may already exist here.
    pub fn expand(&mut self, other: &ColumnStore, mode: ExpandMode) -> Result<()> {
        match mode {
            ExpandMode::Strict => {
                if self.len() != other.len() {
                    return Err(StoreError::Alignment(format!(
                        "row counts differ: {} vs {}",
                        self.len(),
                        other.len()
                    )));
                }

                if let Some(pos) = self
                    .index()
                    .iter()
                    .zip(other.index())
                    .position(|(a, b)| a != b)
                {
                    return Err(StoreError::Alignment(format!(
                        "index values differ at position {}: {} vs {}",
                        pos,
                        self.index()[pos],
                        other.index()[pos]
                    )));
                }

                let incoming = other.column_names(false);
                if let Some(name) = incoming.iter().find(|n| self.columns.contains_key(*n)) {
                    return Err(StoreError::Config(format!(
                        "column '{}' already exists",
                        name
                    )));
                }

                for name in incoming {
                    let values = other.column(&name)?.to_vec();
                    self.columns.insert(name, values);
                }
            }
        }

        tracing::debug!(%mode, columns = ?self.column_names(true), "expanded store");
        Ok(())
    }
}
