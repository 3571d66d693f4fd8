//! Error types for the pathforge library.
//!
//! This module provides the error hierarchy for all path building,
//! sanitization and storage-delegating operations, using `thiserror` for
//! ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a pathforge error.
///
/// # Examples
///
/// ```
/// use pathforge::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("uploads/images".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathforge library.
///
/// This enum encompasses all failure conditions that can occur while
/// building, validating or delegating paths. All failures are raised at the
/// call that detects them; nothing is retried or collected.
#[derive(Debug, Error)]
pub enum Error {
    /// A directory segment was appended after a file segment.
    ///
    /// Files must be the last segment in a path; once a file has been added
    /// the builder refuses every further directory-appending operation.
    #[error(
        "cannot add directory segments after a file has been added; \
         files must be the last segment in a path"
    )]
    HierarchyViolation,

    /// A traversal sequence was detected during validation.
    #[error("unsafe path detected: {path}")]
    UnsafePath {
        /// The offending joined path.
        path: String,
    },

    /// A path was required to exist on a storage disk but does not.
    #[error("path does not exist: {path} on disk: {disk}")]
    PathNotFound {
        /// The path that was checked.
        path: String,
        /// The disk identifier the check ran against.
        disk: String,
    },

    /// A path was required not to exist on a storage disk but does.
    #[error("path already exists: {path} on disk: {disk}")]
    PathAlreadyExists {
        /// The path that was checked.
        path: String,
        /// The disk identifier the check ran against.
        disk: String,
    },

    /// A sanitization strategy reference could not be resolved.
    #[error("invalid sanitization strategy '{name}': {reason}")]
    InvalidStrategy {
        /// The symbolic key that failed to resolve.
        name: String,
        /// Whether the key was unknown or named a non-conforming entry.
        reason: StrategyErrorReason,
    },

    /// An argument failed validation.
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument {
        /// The argument that failed validation.
        argument: String,
        /// A description of the validation failure.
        reason: String,
    },

    /// A storage disk identifier did not resolve to a registered disk.
    #[error("unknown storage disk: {name}")]
    UnknownDisk {
        /// The identifier that failed to resolve.
        name: String,
    },

    /// A URL was requested from a disk that is not cloud-capable.
    #[error("disk '{disk}' does not support public URLs")]
    UrlUnsupported {
        /// The disk identifier.
        disk: String,
    },

    /// An I/O error occurred in a storage collaborator.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason why a sanitization strategy reference failed to resolve.
///
/// Both reasons surface as the same [`Error::InvalidStrategy`] kind; they
/// differ only in message so callers can still match on the kind alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyErrorReason {
    /// The key names neither a built-in strategy nor a registered entry.
    NotFound,
    /// The key resolved to an entry that does not satisfy the
    /// sanitization contract.
    MissingContract,
}

impl std::fmt::Display for StrategyErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found or missing apply()"),
            Self::MissingContract => {
                write!(f, "does not satisfy the sanitization strategy contract")
            }
        }
    }
}

impl Error {
    /// Check if this error indicates a path does not exist on a disk.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::Error;
    ///
    /// let err = Error::PathNotFound {
    ///     path: "uploads/missing.pdf".to_string(),
    ///     disk: "local".to_string(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if this error is a hierarchy violation.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathforge::Error;
    ///
    /// assert!(Error::HierarchyViolation.is_hierarchy_violation());
    /// ```
    #[must_use]
    pub fn is_hierarchy_violation(&self) -> bool {
        matches!(self, Self::HierarchyViolation)
    }
}
