//! Diff options.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration. Unknown fields are rejected.

use crate::errors::{Result, TabDeltaError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ordering applied to reconciled column sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnOrder {
    /// Sort column names lexically
    #[default]
    Lexical,
    /// Keep dataset order: old order for common/removed, new order for added
    Original,
}

impl FromStr for ColumnOrder {
    type Err = TabDeltaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lexical" => Ok(ColumnOrder::Lexical),
            "original" => Ok(ColumnOrder::Original),
            other => Err(TabDeltaError::InvalidConfig {
                reason: format!(
                    "unknown column order '{}' (expected 'lexical' or 'original')",
                    other
                ),
            }),
        }
    }
}

/// Tunables for [`crate::diff::diff_with_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffOptions {
    /// Ordering of common, removed and added columns
    pub column_order: ColumnOrder,
    /// Keep only rows with at least one changed cell in `changed_rows`
    pub changed_rows_only: bool,
}

impl DiffOptions {
    /// Parse options from a TOML document.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the document is not valid TOML or names an
    /// unknown field or value.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_column_order(mut self, order: ColumnOrder) -> Self {
        self.column_order = order;
        self
    }

    pub fn with_changed_rows_only(mut self, changed_rows_only: bool) -> Self {
        self.changed_rows_only = changed_rows_only;
        self
    }
}
