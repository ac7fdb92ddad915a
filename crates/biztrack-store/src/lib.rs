//! # biztrack-store: Persistence Layer for BizTrack
//!
//! This crate provides storage access for the BizTrack system: named JSON
//! key-value collections behind a trait seam, with repositories enforcing
//! the business rules from biztrack-core at every call.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        BizTrack Data Flow                               │
//! │                                                                         │
//! │  Presentation layer (record sale, approve staff, ...)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  biztrack-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │ SessionState │  │   │
//! │  │   │  (store.rs)   │    │ identity.rs   │    │ (session.rs) │  │   │
//! │  │   │               │    │ catalog.rs    │    │              │  │   │
//! │  │   │ KvStore seam  │◄───│ ledger.rs     │    │ sign_in/out  │  │   │
//! │  │   │ JSON payloads │    │               │    │ restore      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          <data_dir>/accounts.json  products.json                │   │
//! │  │          transactions.json  session.json                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The key-value gateway and the `Database` handle
//! - [`error`] - Storage error types
//! - [`repository`] - Repository implementations (identity, catalog, ledger)
//! - [`session`] - Process session state and its persisted projection
//! - [`seed`] - Idempotent demo data
//!
//! ## Usage
//!
//! ```rust
//! use biztrack_core::StaffRole;
//! use biztrack_store::{seed, Database, SessionState};
//!
//! # fn main() -> Result<(), biztrack_store::StoreError> {
//! let db = Database::in_memory(); // Database::open("./data")? in production
//! seed::seed_demo_data(&db)?;
//!
//! let account = db.identity().login(
//!     seed::DEMO_BUSINESS,
//!     seed::DEMO_OWNER_EMAIL,
//!     "password123",
//!     StaffRole::Owner,
//! )?;
//!
//! let sessions = SessionState::new();
//! let session = sessions.sign_in(&db, &account)?;
//!
//! let products = db.catalog().list(&session)?;
//! assert_eq!(products.len(), 3);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use session::SessionState;
pub use store::{Collection, Database, JsonFileStore, KvStore, MemoryStore};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::identity::{IdentityRepository, Registration};
pub use repository::ledger::{LedgerRepository, TransactionDraft};
