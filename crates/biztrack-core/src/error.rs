//! # Error Types
//!
//! Domain-specific error types for biztrack-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  biztrack-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  biztrack-store errors (separate crate)                                │
//! │  └── StoreError       - Persistence failures (wraps CoreError)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (email, business name, status)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message; registration and
//!    login rejections are surfaced verbatim, with no retry logic and no
//!    wrong-password/wrong-role distinction hiding

use thiserror::Error;

use crate::types::{AccountStatus, StaffRole};

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations. Every fallible operation either returns its
/// result or fails synchronously with exactly one of these; there is no
/// partial-success state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Registration: the email is already taken (case-insensitive).
    #[error("Email already registered. Please log in: {0}")]
    DuplicateEmail(String),

    /// Registration: an owner already exists for this business name.
    #[error("The business name \"{0}\" is already registered. Join it instead.")]
    BusinessNameTaken(String),

    /// Registration: joining a business that has no owner yet.
    #[error("Business \"{0}\" not found. Register it as a new business first.")]
    BusinessNotFound(String),

    /// Login: no account with that email.
    #[error("Account not found. Please register first.")]
    AccountNotFound(String),

    /// Login: the account belongs to a different business.
    #[error("This email does not belong to \"{business}\". Check your business name.")]
    BusinessMismatch { business: String },

    /// Login: wrong secret.
    #[error("Incorrect password.")]
    InvalidCredential,

    /// Login: the account is registered under a different role.
    #[error("Invalid role selected. This account is registered as {actual}.")]
    RoleMismatch { actual: StaffRole },

    /// The approval state machine refuses this transition.
    ///
    /// ## When This Occurs
    /// - APPROVED → PENDING (never reachable)
    /// - Any transition out of REJECTED (terminal)
    #[error("Cannot change account status from {from:?} to {to:?}")]
    InvalidStatusChange {
        from: AccountStatus,
        to: AccountStatus,
    },

    /// The acting account has not been approved by the business owner.
    ///
    /// Non-approved accounts may only log in, log out, and re-check their
    /// status; every other operation is refused with this error.
    #[error("Account is {status:?}; waiting for owner approval")]
    NotApproved { status: AccountStatus },

    /// The acting account's role does not permit this operation.
    #[error("{role} accounts cannot {action}")]
    PermissionDenied { action: String, role: StaffRole },

    /// A write targeted a record partitioned under another business.
    #[error("Record belongs to another business: {business}")]
    ForeignBusiness { business: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a PermissionDenied error for a given action.
    pub fn permission_denied(action: impl Into<String>, role: StaffRole) -> Self {
        CoreError::PermissionDenied {
            action: action.into(),
            role,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The presentation layer performs the required-field and number-parsing
/// checks; the core only validates what it owns (amounts, quantities,
/// normalized identifiers).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_messages_are_user_facing() {
        let err = CoreError::BusinessMismatch {
            business: "Lusaka Central Mart".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "This email does not belong to \"Lusaka Central Mart\". Check your business name."
        );

        let err = CoreError::RoleMismatch {
            actual: StaffRole::SalesPerson,
        };
        assert_eq!(
            err.to_string(),
            "Invalid role selected. This account is registered as SALES PERSON."
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_status_change_message() {
        let err = CoreError::InvalidStatusChange {
            from: AccountStatus::Approved,
            to: AccountStatus::Pending,
        };
        assert_eq!(
            err.to_string(),
            "Cannot change account status from Approved to Pending"
        );
    }
}
