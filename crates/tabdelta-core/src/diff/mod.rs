//! Keyed table diff engine.
//!
//! Aligns two datasets on a key specification and produces a structured,
//! deterministic diff: removed rows, added rows, cell-level changes at
//! common keys, and the values of dropped or introduced columns.
//!
//! ## Entry point
//!
//! ```
//! use tabdelta_core::diff::{diff, human_summary::render_summary};
//! use tabdelta_core::model::{Dataset, KeySpec, Row};
//!
//! let old = Dataset::new(["id", "name"], vec![Row::new().with("id", 2i64).with("name", "Bob")]).unwrap();
//! let new = Dataset::new(["id", "name"], vec![Row::new().with("id", 2i64).with("name", "Bobby")]).unwrap();
//!
//! let result = diff(&old, &new, &KeySpec::single("id")).unwrap();
//! assert_eq!(result.changed_rows.rows[0].cells[0].render(), "Bob ---> Bobby");
//! let summary = render_summary(&result);
//! # assert!(summary.contains("**Bob ---> Bobby**"));
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: every key list is sorted by key tuple; identical
//!   inputs produce byte-identical serialized output.
//! - **Totality**: per-cell comparison never fails. Only structural
//!   problems (missing key column, duplicate key) abort a diff.
//! - **Purity**: inputs are borrowed immutably; each call builds a fresh
//!   result.

pub mod cell;
pub mod columns;
pub mod digest;
pub mod engine;
pub mod highlight;
pub mod human_summary;
pub mod index;
pub mod model;
pub mod normalize;

pub use cell::{diff_cell, DiffCell, CHANGE_MARKER};
pub use columns::{reconcile_columns, ColumnDelta};
pub use digest::result_digest;
pub use engine::{diff, diff_with_options};
pub use highlight::{highlight_mask, is_highlighted};
pub use human_summary::render_summary;
pub use index::{KeyDelta, KeyIndex};
pub use model::{DiffResult, DiffWarning, Table, TableRef, TableRow};
pub use normalize::normalize;
