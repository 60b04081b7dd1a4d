//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical across every log line the
//! diff pipeline emits.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Dataset identifiers
pub const FIELD_SIDE: &str = "side";
pub const FIELD_KEY_COLUMNS: &str = "key_columns";

// Collection sizes
pub const FIELD_OLD_ROWS: &str = "old_rows";
pub const FIELD_NEW_ROWS: &str = "new_rows";
pub const FIELD_REMOVED_ROWS: &str = "removed_rows";
pub const FIELD_ADDED_ROWS: &str = "added_rows";
pub const FIELD_CHANGED_CELLS: &str = "changed_cells";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }
}
