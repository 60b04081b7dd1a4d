//! tabdelta Core - keyed tabular diff
//!
//! This crate compares two in-memory tables aligned on one or more key
//! columns, including:
//! - Dataset and key tuple models with a total key order
//! - Key indexing with duplicate detection
//! - Column reconciliation (common, removed, added)
//! - Cell normalization, comparison and change highlighting
//! - Deterministic result assembly, digests and Markdown summaries
//!
//! Loading spreadsheets and writing report files are left to callers; the
//! engine only sees [`Dataset`] values.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod options;

pub use tabdelta_core_types as core_types;

// Re-export commonly used types
pub use diff::{diff, diff_with_options, render_summary, result_digest, DiffCell, DiffResult};
pub use errors::{ExError, ExErrorKind, Result, TabDeltaError};
pub use model::{CellValue, Dataset, KeySpec, KeyTuple, Row, Side};
pub use options::{ColumnOrder, DiffOptions};
