//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Engine-specific field keys
pub const FIELD_LAYER_INDEX: &str = "layer_index";
pub const FIELD_FIELD_KEY: &str = "field_key";
pub const FIELD_RESOURCE_TYPE: &str = "resource_type";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_PARSE_FALLBACK: &str = "parse_fallback";
pub const EVENT_CONTEXT_BUILT: &str = "context_built";
