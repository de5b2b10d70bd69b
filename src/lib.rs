//! # tscolumns
//!
//! An in-memory, column-oriented table keyed by one sorted index column
//! (typically a timestamp), with:
//! - Sorted, tie-stable row insertion
//! - Value lookups (`loc`) by binary search over the index
//! - Positional slicing (`iloc`) with negative and clamped bounds
//! - Row-wise `merge` and column-wise `expand` of aligned stores
//! - Timestamp ↔ epoch-seconds conversion of the index
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │        Callers (indicators, loaders, tscolumns-cli)          │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │ add_row / merge / expand         │ loc / iloc
//!            ▼                                  ▼
//!   ┌─────────────────┐   positions    ┌─────────────────┐
//!   │   ColumnStore   │◄───────────────│   Loc (values)  │
//!   │ (sorted index)  │                └────────┬────────┘
//!   └────────┬────────┘                         │
//!            │                          ┌───────▼─────────┐
//!            │◄─────────────────────────│ ILoc (positions)│
//!            │        slices            └─────────────────┘
//!      ┌─────┴──────┐
//!      ▼            ▼
//! ┌─────────┐ ┌──────────┐
//! │ render  │ │ snapshot │
//! └─────────┘ └──────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod value;
pub mod store;
pub mod render;
pub mod snapshot;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, Result, StoreError};
pub use config::Config;
pub use store::{ColumnStore, ExpandMode, ILoc, Loc, PositionRange, Record};
pub use value::Value;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tscolumns
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
