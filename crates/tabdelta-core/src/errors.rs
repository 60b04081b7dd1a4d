use crate::model::Side;
use tabdelta_core_types::RequestId;
use thiserror::Error;

/// Result type alias using TabDeltaError
pub type Result<T> = std::result::Result<T, TabDeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers, tests and the CLI
/// can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural
    /// A requested key column is absent from one or both datasets
    MissingKeyColumn,
    /// A key tuple occurs more than once within a single dataset
    DuplicateKey,
    /// The key specification itself is malformed (empty, repeated columns)
    InvalidKeySpec,
    /// A dataset violates its own shape rules (duplicate or undeclared columns)
    InvalidDataset,

    // Non-fatal
    /// Common keys or common columns are empty (non-fatal: surfaced as a warning, never returned as Err)
    EmptyIntersection,

    // Configuration
    InvalidConfig,

    // Integration
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MissingKeyColumn => "ERR_MISSING_KEY_COLUMN",
            ExErrorKind::DuplicateKey => "ERR_DUPLICATE_KEY",
            ExErrorKind::InvalidKeySpec => "ERR_INVALID_KEY_SPEC",
            ExErrorKind::InvalidDataset => "ERR_INVALID_DATASET",
            ExErrorKind::EmptyIntersection => "ERR_EMPTY_INTERSECTION",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, column, dataset side, key tuple) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    column: Option<String>,
    side: Option<Side>,
    key: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            column: None,
            side: None,
            key: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add column context
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Add dataset side context
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Add rendered key tuple context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the column context, if any
    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// Get the dataset side, if any
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    /// Get the rendered key tuple, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(column) = &self.column {
            write!(f, " (column: {})", column)?;
        }
        if let Some(side) = self.side {
            write!(f, " (side: {})", side)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for tabdelta operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TabDeltaError {
    /// Key column is not a column of the dataset
    #[error("Key column '{column}' is missing from the {side} dataset")]
    MissingKeyColumn { column: String, side: Side },

    /// Two rows of one dataset share the same key tuple
    #[error("Duplicate key {key} in the {side} dataset (rows {first_row} and {second_row})")]
    DuplicateKey {
        key: String,
        side: Side,
        first_row: usize,
        second_row: usize,
    },

    /// Key specification is malformed
    #[error("Invalid key specification: {reason}")]
    InvalidKeySpec { reason: String },

    /// Column declared twice in a dataset
    #[error("Duplicate column '{column}' in dataset")]
    DuplicateColumn { column: String },

    /// Row carries a cell for a column the dataset does not declare
    #[error("Row {row} has a value for undeclared column '{column}'")]
    UndeclaredColumn { column: String, row: usize },

    /// Options could not be parsed or hold an unknown value
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// JSON encoding failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<TabDeltaError> for ExError {
    fn from(err: TabDeltaError) -> Self {
        match err {
            TabDeltaError::MissingKeyColumn { column, side } => {
                ExError::new(ExErrorKind::MissingKeyColumn)
                    .with_column(column)
                    .with_side(side)
                    .with_message("Key column is missing")
            }

            TabDeltaError::DuplicateKey {
                key,
                side,
                first_row,
                second_row,
            } => ExError::new(ExErrorKind::DuplicateKey)
                .with_side(side)
                .with_key(key)
                .with_message(format!(
                    "Key is not unique (rows {} and {})",
                    first_row, second_row
                )),

            TabDeltaError::InvalidKeySpec { reason } => {
                ExError::new(ExErrorKind::InvalidKeySpec).with_message(reason)
            }

            TabDeltaError::DuplicateColumn { column } => {
                ExError::new(ExErrorKind::InvalidDataset)
                    .with_column(column)
                    .with_message("Column declared more than once")
            }

            TabDeltaError::UndeclaredColumn { column, row } => {
                ExError::new(ExErrorKind::InvalidDataset)
                    .with_column(column)
                    .with_message(format!("Row {} has a value for an undeclared column", row))
            }

            TabDeltaError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            TabDeltaError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to TabDeltaError
impl From<serde_json::Error> for TabDeltaError {
    fn from(err: serde_json::Error) -> Self {
        TabDeltaError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from toml::de::Error to TabDeltaError
impl From<toml::de::Error> for TabDeltaError {
    fn from(err: toml::de::Error) -> Self {
        TabDeltaError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
