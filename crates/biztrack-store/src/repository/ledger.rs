//! # Ledger Repository
//!
//! Transaction recording, deletion, and the sale→stock-decrement side effect.
//!
//! ## The Stock Decrement Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 record(SALE, item_id, quantity)                         │
//! │                                                                         │
//! │  1. validate amount > 0, quantity > 0   (before ANY write)             │
//! │  2. prepend the transaction             (most-recent-first)            │
//! │  3. find the referenced product in the session's business              │
//! │       ├── found    → stock_count -= quantity                           │
//! │       └── missing  → warn! and skip — the sale already happened,       │
//! │                      losing the stock adjustment beats rejecting       │
//! │                      the recorded revenue                              │
//! │                                                                         │
//! │  delete(id) NEVER reverses the decrement: removing a historical        │
//! │  record corrects the ledger, not physical inventory movement.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::store::{Collection, Database};
use biztrack_core::validation::{validate_amount, validate_quantity};
use biztrack_core::{
    new_entity_id, CoreError, Money, PaymentMethod, Product, Session, StaffRole, Transaction,
    TransactionKind,
};

// =============================================================================
// Transaction Draft
// =============================================================================

/// What the presentation layer supplies when recording a transaction.
///
/// Id, timestamp, business, and recorder are stamped here from the session;
/// the draft cannot spoof them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub kind: TransactionKind,
    pub amount_ngwee: i64,
    /// Items sold; absent means 1.
    pub quantity: Option<i64>,
    pub method: PaymentMethod,
    /// Catalog reference, for linked sales.
    pub item_id: Option<String>,
    /// Name snapshot; filled from the catalog when the reference resolves.
    pub item_name: Option<String>,
    pub note: Option<String>,
}

// =============================================================================
// Ledger Repository
// =============================================================================

/// Repository for transaction operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: Database,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(db: Database) -> Self {
        LedgerRepository { db }
    }

    /// Records a transaction for the session's business.
    ///
    /// The entry is prepended, so reads are guaranteed most-recent-first.
    /// A SALE referencing a catalog product decrements its stock by the
    /// quantity within this same logical operation; a dangling reference
    /// skips the decrement silently (logged) and the write still succeeds.
    pub fn record(&self, session: &Session, draft: TransactionDraft) -> StoreResult<Transaction> {
        session.require_approved()?;
        validate_amount(Money::from_ngwee(draft.amount_ngwee)).map_err(CoreError::from)?;
        if let Some(qty) = draft.quantity {
            validate_quantity(qty).map_err(CoreError::from)?;
        }

        let mut products: Vec<Product> = self.db.read_rows(Collection::Products)?;
        let business_key = session.business_key();

        // Resolve the catalog reference up front: it freezes the name
        // snapshot and locates the row for the stock decrement.
        let linked_index = match (&draft.kind, &draft.item_id) {
            (TransactionKind::Sale, Some(item_id)) => products
                .iter()
                .position(|p| &p.id == item_id && p.business_key() == business_key),
            _ => None,
        };

        let item_name = draft
            .item_name
            .or_else(|| linked_index.map(|i| products[i].name.clone()));

        let transaction = Transaction {
            id: new_entity_id(),
            business_name: session.business_name().to_string(),
            kind: draft.kind,
            amount_ngwee: draft.amount_ngwee,
            quantity: draft.quantity,
            method: draft.method,
            item_id: draft.item_id,
            item_name,
            timestamp: Utc::now(),
            note: draft.note,
            recorded_by: session.account_id().to_string(),
        };

        debug!(
            id = %transaction.id,
            kind = ?transaction.kind,
            amount = %transaction.amount(),
            "Recording transaction"
        );

        let mut transactions: Vec<Transaction> = self.db.read_rows(Collection::Transactions)?;
        transactions.insert(0, transaction.clone());
        self.db.write_rows(Collection::Transactions, &transactions)?;

        match linked_index {
            Some(index) => {
                products[index].stock_count -= transaction.quantity();
                self.db.write_rows(Collection::Products, &products)?;
            }
            None => {
                if transaction.kind == TransactionKind::Sale {
                    if let Some(item_id) = &transaction.item_id {
                        // The product was deleted since the sale started;
                        // keep the revenue, lose the adjustment.
                        warn!(item_id = %item_id, "Sale references a missing product; skipping stock decrement");
                    }
                }
            }
        }

        Ok(transaction)
    }

    /// Deletes a transaction by id.
    ///
    /// OWNER only. Unconditional and irreversible once invoked (the
    /// presentation layer owns the confirmation prompt). Stock is never
    /// adjusted back.
    pub fn delete(&self, session: &Session, id: &str) -> StoreResult<()> {
        session.require_approved()?;
        session.require_role("delete transactions", &[StaffRole::Owner])?;

        debug!(id = %id, "Deleting transaction");

        let business_key = session.business_key();
        let mut transactions: Vec<Transaction> = self.db.read_rows(Collection::Transactions)?;
        transactions.retain(|t| t.id != id || t.business_key() != business_key);
        self.db.write_rows(Collection::Transactions, &transactions)?;

        Ok(())
    }

    /// Lists the session's business ledger, most-recent-first.
    pub fn list(&self, session: &Session) -> StoreResult<Vec<Transaction>> {
        session.require_approved()?;

        let transactions: Vec<Transaction> = self.db.read_rows(Collection::Transactions)?;
        let business_key = session.business_key();

        Ok(transactions
            .into_iter()
            .filter(|t| t.business_key() == business_key)
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
