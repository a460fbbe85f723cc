//! ChangeView Core - Change summarization and presentation engine
//!
//! This crate reconciles heterogeneous "before/after" change payloads from
//! an approval workflow into one canonical, deduplicated, human-readable
//! description. It provides:
//! - Field-label resolution across naming conventions (camelCase,
//!   snake_case, dotted paths, bracketed indices)
//! - Contextual value formatting through injectable locale dictionaries
//! - Snapshot normalization into a canonical before/after/changes/items tree
//! - Order-preserving, deduplicating summary aggregation across raw layers
//! - Menu-specific diff extraction with snapshot pruning to avoid double
//!   display
//! - Budget-bounded snapshot flattening for one-line previews
//!
//! The engine is synchronous, pure, and stateless: every function takes
//! already-resident data and returns a new value with no I/O and no shared
//! mutable state. Repeated calls with identical input are idempotent.

pub mod batch;
pub mod context;
pub mod errors;
pub mod label;
pub mod layer;
pub mod logging_facility;
pub mod menu;
pub mod request;
pub mod snapshot;
pub mod summary;
pub mod value;
pub mod vocabulary;

// Re-export commonly used types
pub use changeview_core_types::{ChangeRequest, DisplayNames};
pub use context::{build_change_display_context, ChangeDisplayContext};
pub use errors::{CvError, CvErrorKind, Result};
pub use menu::{MenuChangeEntry, VisibilityRule};
pub use request::{describe_change_request, parse_change_request, request_layers, ChangeMode};
pub use snapshot::model::{ChangeEntry, ItemDiff, Snapshot, SummaryEntry};
pub use value::{format_value, FormatContext};
pub use vocabulary::Vocabulary;
