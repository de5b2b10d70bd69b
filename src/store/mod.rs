//! Store Module
//!
//! Column-oriented table kept sorted by one designated index column.
//!
//! ## Responsibilities
//! - Own one value sequence per column, all of equal length
//! - Keep the index column non-decreasing on every insertion
//! - Translate value and position lookups into new, independent stores
//! - Combine stores row-wise (`merge`) and column-wise (`expand`)
//!
//! ## Layout
//! ```text
//!            index
//!              │
//!   ┌──────────▼──┬─────────────┬─────────────┐
//!   │    time     │    open     │    close    │
//!   ├─────────────┼─────────────┼─────────────┤
//!   │     1       │    10.0     │    10.5     │
//!   │     2       │    10.5     │    11.0     │  sorted by `time`,
//!   │     2       │    11.0     │    10.8     │  ties kept in insertion order
//!   │     5       │    10.8     │    11.2     │
//!   └─────────────┴─────────────┴─────────────┘
//!        Vec<Value>    Vec<Value>    Vec<Value>
//! ```
//!
//! Reads go through two borrowed accessors:
//! - [`Loc`] binary searches index values, then hands positions to [`ILoc`]
//! - [`ILoc`] slices every column in lockstep

mod table;
mod structural;
mod view;

pub use table::{ColumnStore, Record};
pub use structural::ExpandMode;
pub use view::{ILoc, Loc, PositionRange};
