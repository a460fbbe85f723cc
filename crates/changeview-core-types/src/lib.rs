//! Core types shared across ChangeView facilities
//!
//! This crate provides foundational types used by the summarization engine
//! and its callers:
//!
//! - **Boundary record**: the `ChangeRequest` row as delivered by the
//!   approval-workflow REST collaborator
//! - **Display context**: caller-supplied role/user display-name lookups
//! - **Schema constants**: canonical field keys and event names for
//!   structured logging

pub mod context;
pub mod request;
pub mod schema;

pub use context::DisplayNames;
pub use request::ChangeRequest;
