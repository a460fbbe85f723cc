//! Error facility for the change-request boundary.
//!
//! The engine proper never fails: unparsable input is treated as absent and
//! unknown fields degrade to raw fallbacks (see [`crate::layer`]). Errors
//! exist only one level out, where a caller hands us a record that is
//! supposed to be a well-formed `ChangeRequest` row.

use thiserror::Error;

/// Result type alias using CvError
pub type Result<T> = std::result::Result<T, CvError>;

/// Error taxonomy for change-request boundary operations
///
/// Each variant maps to a stable error code via [`CvError::code`], usable
/// for programmatic handling, testing, and external API responses.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CvError {
    /// The outer change-request record is not a JSON object
    #[error("change request root must be a JSON object in operation '{op}'")]
    InvalidRequest {
        /// Operation that rejected the record
        op: String,
    },

    /// The outer record failed to deserialize into `ChangeRequest`
    #[error("failed to deserialize change request in operation '{op}': {message}")]
    Serialization {
        /// Operation that attempted the deserialization
        op: String,
        /// Underlying serde error, flattened to text
        message: String,
    },

    /// Internal invariant failure (should not occur)
    #[error("internal error in operation '{op}': {message}")]
    Internal {
        /// Operation in which the invariant broke
        op: String,
        /// Description of the broken invariant
        message: String,
    },
}

/// Stable error kind classification, one per [`CvError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CvErrorKind {
    InvalidRequest,
    Serialization,
    Internal,
}

impl CvErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            CvErrorKind::InvalidRequest => "ERR_INVALID_REQUEST",
            CvErrorKind::Serialization => "ERR_SERIALIZATION",
            CvErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

impl CvError {
    /// Get the error kind
    pub fn kind(&self) -> CvErrorKind {
        match self {
            CvError::InvalidRequest { .. } => CvErrorKind::InvalidRequest,
            CvError::Serialization { .. } => CvErrorKind::Serialization,
            CvError::Internal { .. } => CvErrorKind::Internal,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Get the operation context
    pub fn op(&self) -> &str {
        match self {
            CvError::InvalidRequest { op }
            | CvError::Serialization { op, .. }
            | CvError::Internal { op, .. } => op,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(CvErrorKind::InvalidRequest.code(), "ERR_INVALID_REQUEST");
        assert_eq!(CvErrorKind::Serialization.code(), "ERR_SERIALIZATION");
        assert_eq!(CvErrorKind::Internal.code(), "ERR_INTERNAL");
    }

    #[test]
    fn test_display_includes_op_and_message() {
        let err = CvError::Serialization {
            op: "parse_change_request".into(),
            message: "expected value at line 1".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("parse_change_request"));
        assert!(rendered.contains("expected value"));
    }

    #[test]
    fn test_kind_matches_variant() {
        let err = CvError::InvalidRequest {
            op: "parse_change_request".into(),
        };
        assert_eq!(err.kind(), CvErrorKind::InvalidRequest);
        assert_eq!(err.code(), "ERR_INVALID_REQUEST");
        assert_eq!(err.op(), "parse_change_request");
    }
}
