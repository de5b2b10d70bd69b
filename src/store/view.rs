//! Lookup accessors
//!
//! `Loc` and `ILoc` borrow a store and return new, independent stores.
//! They never mutate the store they wrap.

use std::ops::{Bound, RangeBounds, RangeFrom, RangeFull, RangeTo};

use crate::error::{Result, StoreError};
use crate::value::Value;

use super::ColumnStore;

// =============================================================================
// Positional Access
// =============================================================================

/// Position-based accessor
#[derive(Debug, Clone, Copy)]
pub struct ILoc<'a> {
    store: &'a ColumnStore,
}

impl<'a> ILoc<'a> {
    pub(crate) fn new(store: &'a ColumnStore) -> Self {
        Self { store }
    }

    /// Single row at `position`; negative positions count from the end
    pub fn get(&self, position: isize) -> Result<ColumnStore> {
        let len = self.store.len();
        let resolved = if position < 0 {
            position + len as isize
        } else {
            position
        };

        if resolved < 0 || resolved as usize >= len {
            return Err(StoreError::IndexOutOfBounds {
                index: position,
                len,
            });
        }

        let at = resolved as usize;
        Ok(self.store.slice_positions(at, at + 1))
    }

    /// Rows `[start, stop)` with slice semantics
    ///
    /// `None` means the start or end of the store, negative bounds count from
    /// the end, and out-of-range bounds clamp instead of failing.
    pub fn range(&self, start: Option<isize>, stop: Option<isize>) -> ColumnStore {
        let len = self.store.len();
        let start = start.map_or(0, |s| clamp_position(s, len));
        let stop = stop.map_or(len, |s| clamp_position(s, len));
        self.store.slice_positions(start, stop)
    }

    /// Same as [`ILoc::range`], taking Rust range syntax (`..`, `2..5`, `-8..`)
    pub fn slice<R: PositionRange>(&self, range: R) -> ColumnStore {
        let (start, stop) = range.position_bounds();
        self.range(start, stop)
    }
}

/// Resolve a possibly negative slice bound into `0..=len`
fn clamp_position(position: isize, len: usize) -> usize {
    if position < 0 {
        let back = position.unsigned_abs();
        len.saturating_sub(back)
    } else {
        (position as usize).min(len)
    }
}

/// Ranges accepted by [`ILoc::slice`]
pub trait PositionRange {
    fn position_bounds(&self) -> (Option<isize>, Option<isize>);
}

impl PositionRange for RangeFull {
    fn position_bounds(&self) -> (Option<isize>, Option<isize>) {
        (None, None)
    }
}

impl PositionRange for std::ops::Range<isize> {
    fn position_bounds(&self) -> (Option<isize>, Option<isize>) {
        (Some(self.start), Some(self.end))
    }
}

impl PositionRange for RangeFrom<isize> {
    fn position_bounds(&self) -> (Option<isize>, Option<isize>) {
        (Some(self.start), None)
    }
}

impl PositionRange for RangeTo<isize> {
    fn position_bounds(&self) -> (Option<isize>, Option<isize>) {
        (None, Some(self.end))
    }
}

impl PositionRange for (Option<isize>, Option<isize>) {
    fn position_bounds(&self) -> (Option<isize>, Option<isize>) {
        *self
    }
}

// =============================================================================
// Value Access
// =============================================================================

/// Value-based accessor over the index column
#[derive(Debug, Clone, Copy)]
pub struct Loc<'a> {
    store: &'a ColumnStore,
}

impl<'a> Loc<'a> {
    pub(crate) fn new(store: &'a ColumnStore) -> Self {
        Self { store }
    }

    /// Row at the leftmost position whose index is `>= value`
    ///
    /// Returns an empty store when every index value is smaller.
    pub fn get(&self, value: &Value) -> ColumnStore {
        let position = self.store.lower_bound(value) as isize;
        self.store.iloc().range(Some(position), Some(position + 1))
    }

    /// Rows whose index lies in `[start, stop)`
    ///
    /// `None` leaves that side unbounded.
    pub fn range(&self, start: Option<&Value>, stop: Option<&Value>) -> ColumnStore {
        let start = start.map(|v| self.store.lower_bound(v) as isize);
        let stop = stop.map(|v| self.store.lower_bound(v) as isize);
        self.store.iloc().range(start, stop)
    }

    /// Rows whose index lies in `range`, honouring inclusive and exclusive ends
    pub fn slice<R: RangeBounds<Value>>(&self, range: R) -> ColumnStore {
        let start = match range.start_bound() {
            Bound::Included(v) => Some(self.store.lower_bound(v)),
            Bound::Excluded(v) => Some(self.store.upper_bound(v)),
            Bound::Unbounded => None,
        };
        let stop = match range.end_bound() {
            Bound::Included(v) => Some(self.store.upper_bound(v)),
            Bound::Excluded(v) => Some(self.store.lower_bound(v)),
            Bound::Unbounded => None,
        };
        self.store
            .iloc()
            .range(start.map(|p| p as isize), stop.map(|p| p as isize))
    }
}
