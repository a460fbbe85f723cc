//! Canonical snapshot tree: normalization and bounded flattening.
//!
//! A [`Snapshot`](model::Snapshot) is the one static shape the rest of the
//! engine deals with: raw diff fragments of any accepted shape are
//! normalized early, and everything downstream (pruning, flattening,
//! rendering) operates on the canonical tree.
//!
//! ## Entry points
//!
//! ```ignore
//! use changeview_core::snapshot::normalize::from_raw;
//! use changeview_core::snapshot::flatten::collect_changes;
//!
//! let snapshot = from_raw(&raw_diff);
//! let top = collect_changes(&snapshot.unwrap(), 3, &vocab);
//! ```
//!
//! ## Guarantees
//!
//! - **No empty results**: a snapshot with nothing to show collapses to
//!   `None` instead of an empty node.
//! - **Bounded traversal**: flattening walks an explicit work queue and
//!   stops exactly at the caller's budget, so malformed deeply-nested
//!   input cannot run away.

pub mod flatten;
pub mod model;
pub mod normalize;

pub use flatten::collect_changes;
pub use model::{ChangeEntry, ItemDiff, Snapshot, SummaryEntry};
pub use normalize::from_raw;
