//! # Validation Module
//!
//! Input normalization and validation utilities for BizTrack.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (out of scope here)                             │
//! │  ├── Required-field checks, number parsing                             │
//! │  └── Confirmation prompts before destructive operations                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (component boundary)                             │
//! │  ├── Identifier normalization (lowercase + trim)                       │
//! │  └── amount > 0, quantity > 0 — and nothing else                       │
//! │                                                                         │
//! │  The sell-below-buy price check is ADVISORY: the presentation layer    │
//! │  warns, the catalog logs, and the write always proceeds.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Normalization
// =============================================================================

/// Normalizes an email for comparison and uniqueness checks.
///
/// ## Example
/// ```rust
/// use biztrack_core::validation::normalize_email;
///
/// assert_eq!(normalize_email(" Owner@LusakaMart.com "), "owner@lusakamart.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Normalizes a business name for comparison.
///
/// Records keep the display spelling; comparisons use this form (see
/// [`crate::types::BusinessKey`], which wraps it).
pub fn normalize_business_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a transaction amount.
///
/// ## Rules
/// - Must be positive (> 0); a zero or negative ledger entry is meaningless
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a sale quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Advisory Checks
// =============================================================================

/// Whether a product is priced to sell below cost.
///
/// Advisory only: the presentation layer shows a warning and the catalog
/// logs one, but the write is never blocked.
#[inline]
pub fn sells_below_cost(buy_price: Money, sell_price: Money) -> bool {
    sell_price < buy_price
}

// =============================================================================
// Unit Tests
// =============================================================================
