//! Structured logging facility for ChangeView
//!
//! The engine logs only at the edges: defensive-parse fallbacks emit
//! `debug` events so that silently-swallowed malformed payloads stay
//! observable. This module provides the single initialization point.
//!
//! # Usage
//!
//! ```rust
//! use changeview_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// No-op registry for tests
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Call once at application startup; later calls are no-ops. The env
/// filter honours `RUST_LOG`, defaulting to `changeview=debug` in
/// development and `changeview=info` in production.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        match profile {
            Profile::Development => {
                tracing_subscriber::fmt()
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new("changeview=debug")),
                    )
                    .init();
            }
            Profile::Production => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(
                        EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| EnvFilter::new("changeview=info")),
                    )
                    .init();
            }
            Profile::Test => {
                // Engine tests assert on return values, not on log output
                tracing_subscriber::registry().init();
            }
        }
    });
}
