//! # Persistence Gateway
//!
//! Key-value storage of named JSON collections, behind a trait seam.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Persistence Gateway                               │
//! │                                                                         │
//! │  Repository (identity / catalog / ledger)                              │
//! │       │                                                                 │
//! │       │  db.read_rows::<Product>(Collection::Products)                 │
//! │       ▼                                                                 │
//! │  Database ── typed encode/decode ──► KvStore (trait)                   │
//! │                                        │                                │
//! │                      ┌─────────────────┴───────────────┐               │
//! │                      ▼                                 ▼               │
//! │               JsonFileStore                      MemoryStore           │
//! │          one file per collection              HashMap (tests)          │
//! │          <data_dir>/products.json                                      │
//! │                                                                         │
//! │  The store holds raw JSON strings only. Filtering, partitioning and    │
//! │  every business rule live in the repositories above.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The key-value store is process-wide mutable state owned exclusively by
//! this gateway; repositories never cache collection copies across calls.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::StoreResult;
use crate::repository::catalog::CatalogRepository;
use crate::repository::identity::IdentityRepository;
use crate::repository::ledger::LedgerRepository;

// =============================================================================
// Collections
// =============================================================================

/// The named collections the system persists.
///
/// Each is an ordered sequence except `Session`, which holds at most one
/// credential-stripped account projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Global account records (filtered by business at read time).
    Accounts,
    /// Catalog entries, partitioned by business name.
    Products,
    /// Ledger entries, partitioned by business name, most-recent-first.
    Transactions,
    /// The current session projection, if any.
    Session,
}

impl Collection {
    /// Stable storage name of the collection.
    pub const fn name(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Products => "products",
            Collection::Transactions => "transactions",
            Collection::Session => "session",
        }
    }
}

// =============================================================================
// KvStore Trait
// =============================================================================

/// Raw get/set of a collection's JSON payload.
///
/// The storage technology is an external collaborator: the gateway only
/// needs these two operations, so swapping disk for anything else is a
/// one-struct change.
pub trait KvStore: Send + Sync + fmt::Debug {
    /// Returns the collection's payload, or `None` if it was never written.
    fn load(&self, collection: Collection) -> StoreResult<Option<String>>;

    /// Replaces the collection's payload.
    fn save(&self, collection: Collection, payload: &str) -> StoreResult<()>;
}

// =============================================================================
// JSON File Store
// =============================================================================

/// Production backend: one JSON file per collection under a data directory.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (and creates if missing) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened JSON file store");
        Ok(JsonFileStore { dir })
    }

    fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.name()))
    }
}

impl KvStore for JsonFileStore {
    fn load(&self, collection: Collection) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(collection)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, collection: Collection, payload: &str) -> StoreResult<()> {
        debug!(collection = collection.name(), bytes = payload.len(), "Saving collection");
        std::fs::write(self.path_for(collection), payload)?;
        Ok(())
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// Test backend: collections held in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<Collection, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KvStore for MemoryStore {
    fn load(&self, collection: Collection) -> StoreResult<Option<String>> {
        let entries = self.entries.lock().expect("store mutex poisoned");
        Ok(entries.get(&collection).cloned())
    }

    fn save(&self, collection: Collection, payload: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock().expect("store mutex poisoned");
        entries.insert(collection, payload.to_string());
        Ok(())
    }
}

// =============================================================================
// Database Handle
// =============================================================================

/// The handle repositories operate through.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::open("./data")?;
/// let account = db.identity().login("Lusaka Central Mart", email, secret, role)?;
/// let products = db.catalog().list(&session)?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    store: Arc<dyn KvStore>,
}

impl Database {
    /// Opens a file-backed database at the given data directory.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        Ok(Database {
            store: Arc::new(JsonFileStore::open(dir)?),
        })
    }

    /// Creates an isolated in-memory database (for tests and demos).
    pub fn in_memory() -> Self {
        Database {
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Wraps a custom storage backend.
    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        Database { store }
    }

    /// Identity & access repository.
    pub fn identity(&self) -> IdentityRepository {
        IdentityRepository::new(self.clone())
    }

    /// Catalog repository.
    pub fn catalog(&self) -> CatalogRepository {
        CatalogRepository::new(self.clone())
    }

    /// Ledger repository.
    pub fn ledger(&self) -> LedgerRepository {
        LedgerRepository::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Typed collection access (crate-internal)
    // -------------------------------------------------------------------------

    /// Reads a sequence collection; an unwritten collection is empty.
    pub(crate) fn read_rows<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> StoreResult<Vec<T>> {
        match self.store.load(collection)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces a sequence collection.
    pub(crate) fn write_rows<T: Serialize>(
        &self,
        collection: Collection,
        rows: &[T],
    ) -> StoreResult<()> {
        let payload = serde_json::to_string(rows)?;
        self.store.save(collection, &payload)
    }

    /// Reads a single-record collection (the session projection).
    pub(crate) fn read_record<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> StoreResult<Option<T>> {
        match self.store.load(collection)? {
            Some(payload) => Ok(serde_json::from_str(&payload)?),
            None => Ok(None),
        }
    }

    /// Replaces a single-record collection; `None` stores an explicit null.
    pub(crate) fn write_record<T: Serialize>(
        &self,
        collection: Collection,
        record: Option<&T>,
    ) -> StoreResult<()> {
        let payload = serde_json::to_string(&record)?;
        self.store.save(collection, &payload)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let db = Database::in_memory();

        let rows: Vec<String> = db.read_rows(Collection::Products).unwrap();
        assert!(rows.is_empty());

        db.write_rows(Collection::Products, &["a".to_string(), "b".to_string()])
            .unwrap();
        let rows: Vec<String> = db.read_rows(Collection::Products).unwrap();
        assert_eq!(rows, vec!["a", "b"]);
    }

    #[test]
    fn test_record_null_round_trip() {
        let db = Database::in_memory();

        assert!(db
            .read_record::<String>(Collection::Session)
            .unwrap()
            .is_none());

        db.write_record(Collection::Session, Some(&"jane".to_string()))
            .unwrap();
        assert_eq!(
            db.read_record::<String>(Collection::Session).unwrap(),
            Some("jane".to_string())
        );

        db.write_record::<String>(Collection::Session, None).unwrap();
        assert!(db
            .read_record::<String>(Collection::Session)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let dir = std::env::temp_dir()
            .join("biztrack-store-test")
            .join(uuid::Uuid::new_v4().to_string());
        let store = JsonFileStore::open(&dir).unwrap();

        assert!(store.load(Collection::Accounts).unwrap().is_none());
        store.save(Collection::Accounts, "[]").unwrap();
        assert_eq!(store.load(Collection::Accounts).unwrap().as_deref(), Some("[]"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Accounts.name(), "accounts");
        assert_eq!(Collection::Products.name(), "products");
        assert_eq!(Collection::Transactions.name(), "transactions");
        assert_eq!(Collection::Session.name(), "session");
    }
}
