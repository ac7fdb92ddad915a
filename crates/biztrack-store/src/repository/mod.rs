//! # Repository Module
//!
//! Repository implementations for BizTrack.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts storage access behind a clean API.   │
//! │                                                                         │
//! │  Presentation layer                                                    │
//! │       │                                                                 │
//! │       │  db.ledger().record(&session, draft)                           │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  LedgerRepository                                                      │
//! │  ├── record(&self, session, draft)                                     │
//! │  ├── delete(&self, session, id)                                        │
//! │  └── list(&self, session)                                              │
//! │       │                                                                 │
//! │       │  whole-collection JSON read/write                              │
//! │       ▼                                                                 │
//! │  Persistence Gateway (KvStore)                                         │
//! │                                                                         │
//! │  Every operation takes the acting Session: approval, role, and         │
//! │  business-partition checks happen HERE, not in the caller.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`identity::IdentityRepository`] - Registration, login, approval workflow
//! - [`catalog::CatalogRepository`] - Product CRUD scoped to a business
//! - [`ledger::LedgerRepository`] - Transactions and the stock side effect

pub mod catalog;
pub mod identity;
pub mod ledger;
