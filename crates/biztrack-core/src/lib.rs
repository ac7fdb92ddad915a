//! # biztrack-core: Pure Business Logic for BizTrack
//!
//! This crate is the **heart** of BizTrack. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BizTrack Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (out of scope)                     │   │
//! │  │    Auth screen ──► Dashboard ──► Stock ──► Reports ──► Staff   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 biztrack-store (repositories)                   │   │
//! │  │    identity, catalog, ledger, session state, seeding           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ biztrack-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  session  │  │  report   │  │   │
//! │  │   │  Account  │  │   Money   │  │ Session   │  │ windows,  │  │   │
//! │  │   │  Product  │  │  ngwee    │  │ checks    │  │ profit    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Account, Product, Transaction, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`session`] - The explicit authorization context and capability checks
//! - [`error`] - Domain error types
//! - [`validation`] - Normalization and input validation
//! - [`report`] - Pure reporting arithmetic (windows, profit, rankings)
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in ngwee (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Explicit Sessions**: No ambient current-user global; authorization is a
//!    capability check on a [`session::Session`] value passed to every call

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use biztrack_core::Money` instead of
// `use biztrack_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::Session;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat margin assumed for sales with no product linkage, in basis points
/// (2000 = 20%).
///
/// Used only when profit cannot be derived from a product's buy/sell prices.
/// An approximation for reporting, not an accounting fact.
pub const FALLBACK_MARGIN_BPS: u32 = 2000;

/// Trailing window for the popularity ranking, in days.
pub const TOP_SELLERS_WINDOW_DAYS: i64 = 30;

/// How many entries the popularity ranking retains.
pub const TOP_SELLERS_LIMIT: usize = 3;
