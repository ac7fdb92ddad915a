//! # Storage Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the storage context                   │
//! │       │                                                                 │
//! │       ├── StoreError::Core carries CoreError through unchanged, so     │
//! │       │   callers still see the exact business rejection                │
//! │       ▼                                                                 │
//! │  Presentation layer displays the user-facing message                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is retried: a storage failure (disk gone, quota exceeded,
//! corrupt payload) propagates directly to the caller as a fatal error for
//! that operation.

use thiserror::Error;

use biztrack_core::CoreError;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying storage failed.
    ///
    /// ## When This Occurs
    /// - Data directory cannot be created
    /// - Collection file cannot be read or written
    /// - Disk full / permissions
    #[error("Storage failure: {0}")]
    Io(#[from] std::io::Error),

    /// A collection payload could not be encoded or decoded.
    ///
    /// ## When This Occurs
    /// - Corrupt or hand-edited collection file
    /// - Schema drift between versions
    #[error("Corrupt collection payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A business rule refused the operation (wraps CoreError).
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_passes_through_verbatim() {
        let err: StoreError = CoreError::InvalidCredential.into();
        assert_eq!(err.to_string(), "Incorrect password.");
    }
}
