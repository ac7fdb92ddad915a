//! # Domain Types
//!
//! Core domain types used throughout BizTrack.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Account      │   │    Product      │   │  Transaction    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  business_name  │   │  business_name  │   │  business_name  │       │
//! │  │  role / status  │   │  stock_count    │   │  kind / amount  │       │
//! │  │  credential     │   │  prices (ngwee) │   │  item snapshot  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  BusinessKey    │   │ AccountStatus   │   │ SessionAccount  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  normalized     │   │  Pending        │   │  Account minus  │       │
//! │  │  partition key  │   │  Approved       │   │  the credential │       │
//! │  └─────────────────┘   │  Rejected       │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Partitioning
//! Product and Transaction carry the owning business name. There is no
//! referential integrity beyond this string, so every read filters by the
//! session's [`BusinessKey`] and every write is checked against it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Business Key
// =============================================================================

/// The normalized (lowercase, trimmed) business name: the logical partition
/// key for every Product and Transaction read or write.
///
/// Records keep the display spelling of the business name; all comparisons go
/// through this type so "Lusaka Central Mart" and " lusaka central mart "
/// land in the same partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BusinessKey(String);

impl BusinessKey {
    /// Builds the key from any spelling of the business name.
    pub fn new(name: &str) -> Self {
        BusinessKey(crate::validation::normalize_business_name(name))
    }

    /// Returns the normalized key string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Checks whether a record's stored business name belongs to this key.
    pub fn matches(&self, business_name: &str) -> bool {
        BusinessKey::new(business_name) == *self
    }
}

impl std::fmt::Display for BusinessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Staff Role
// =============================================================================

/// The role an account holds inside its business.
///
/// Serialized as `"OWNER"`, `"MANAGER"`, `"SALES_PERSON"` so the persisted
/// collections stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    /// The single account per business with unrestricted authority.
    Owner,
    /// Can manage the catalog and record transactions.
    Manager,
    /// Can record transactions only.
    SalesPerson,
}

impl StaffRole {
    /// Whether this role may create, edit, or delete catalog entries.
    #[inline]
    pub const fn can_manage_catalog(&self) -> bool {
        matches!(self, StaffRole::Owner | StaffRole::Manager)
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StaffRole::Owner => "OWNER",
            StaffRole::Manager => "MANAGER",
            StaffRole::SalesPerson => "SALES PERSON",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Account Status
// =============================================================================

/// Approval state of an account.
///
/// ## State Machine
/// ```text
/// PENDING ──(approve)──► APPROVED ──(revoke)──► REJECTED
///    │                                             ▲
///    └──────────────────(deny)─────────────────────┘
///
/// No transition leaves REJECTED or re-enters PENDING.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Waiting for the business owner's approval.
    Pending,
    /// Full access to the business.
    Approved,
    /// Access denied or revoked. Terminal.
    Rejected,
}

impl AccountStatus {
    /// Whether the status machine permits moving to `next`.
    ///
    /// Approval and denial act on pending accounts; revocation acts on
    /// approved ones. Everything else (notably APPROVED → PENDING and any
    /// transition out of REJECTED) is refused.
    pub const fn can_transition(self, next: AccountStatus) -> bool {
        matches!(
            (self, next),
            (AccountStatus::Pending, AccountStatus::Approved)
                | (AccountStatus::Pending, AccountStatus::Rejected)
                | (AccountStatus::Approved, AccountStatus::Rejected)
        )
    }
}

// =============================================================================
// Subscription Tier
// =============================================================================

/// Billing tier of an account. Informational only in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionTier {
    Free,
    Paid,
}

// =============================================================================
// Account
// =============================================================================

/// An identity record.
///
/// ## Invariants
/// - `email` is unique across the whole system (compared lowercase, trimmed)
/// - Exactly one `Owner` account per business name at any time; the first
///   registrant of a business name becomes its permanent owner
/// - Accounts are never hard-deleted; rejection is terminal-soft
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to staff.
    pub full_name: String,

    /// Contact number.
    pub phone_number: String,

    /// Login email. Unique system-wide.
    pub email: String,

    /// Plain login secret. Hashing is an explicit non-goal; this field must
    /// never reach the persisted session projection (see [`SessionAccount`]).
    pub credential: String,

    /// Owning business name (display spelling).
    pub business_name: String,

    /// Role inside the business.
    pub role: StaffRole,

    /// Billing tier.
    pub tier: SubscriptionTier,

    /// Approval state.
    pub status: AccountStatus,
}

impl Account {
    /// Partition key for this account's business.
    #[inline]
    pub fn business_key(&self) -> BusinessKey {
        BusinessKey::new(&self.business_name)
    }
}

// =============================================================================
// Session Account
// =============================================================================

/// The credential-stripped projection of an [`Account`].
///
/// A separate struct rather than an optional field: the type system enforces
/// that whatever reaches the persisted `session` collection cannot carry the
/// secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionAccount {
    pub id: String,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub business_name: String,
    pub role: StaffRole,
    pub tier: SubscriptionTier,
    pub status: AccountStatus,
}

impl From<&Account> for SessionAccount {
    fn from(account: &Account) -> Self {
        SessionAccount {
            id: account.id.clone(),
            full_name: account.full_name.clone(),
            phone_number: account.phone_number.clone(),
            email: account.email.clone(),
            business_name: account.business_name.clone(),
            role: account.role,
            tier: account.tier,
            status: account.status,
        }
    }
}

impl SessionAccount {
    /// Partition key for this session's business.
    #[inline]
    pub fn business_key(&self) -> BusinessKey {
        BusinessKey::new(&self.business_name)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
///
/// `stock_count` is the authoritative inventory figure; it is decremented
/// only as a side effect of recording a SALE transaction that references this
/// product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning business name (display spelling).
    pub business_name: String,

    /// Display name shown in the catalog and on transaction snapshots.
    pub name: String,

    /// Cost per unit in ngwee.
    pub buy_price_ngwee: i64,

    /// Selling price per unit in ngwee.
    pub sell_price_ngwee: i64,

    /// Units currently on the shelf.
    pub stock_count: i64,

    /// Restock threshold; at or below this the product is "low stock".
    pub min_stock: i64,
}

impl Product {
    /// Returns the cost price as Money.
    #[inline]
    pub fn buy_price(&self) -> Money {
        Money::from_ngwee(self.buy_price_ngwee)
    }

    /// Returns the selling price as Money.
    #[inline]
    pub fn sell_price(&self) -> Money {
        Money::from_ngwee(self.sell_price_ngwee)
    }

    /// Margin earned per unit sold (sell − buy).
    #[inline]
    pub fn unit_margin(&self) -> Money {
        self.sell_price() - self.buy_price()
    }

    /// Whether the shelf count has reached the restock threshold.
    #[inline]
    pub const fn is_low_stock(&self) -> bool {
        self.stock_count <= self.min_stock
    }

    /// Partition key for this product's business.
    #[inline]
    pub fn business_key(&self) -> BusinessKey {
        BusinessKey::new(&self.business_name)
    }
}

// =============================================================================
// Transaction Kind
// =============================================================================

/// Whether a ledger entry records money in or money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Sale,
    Expense,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a transaction was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Physical cash.
    Cash,
    /// MTN mobile money.
    MtnMomo,
    /// Airtel mobile money.
    AirtelMoney,
}

// =============================================================================
// Transaction
// =============================================================================

/// A ledger entry.
///
/// Immutable once created except for deletion. Uses the snapshot pattern for
/// the referenced product: `item_name` is frozen at record time, so consumers
/// fall back to it when the product reference dangles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning business name (display spelling).
    pub business_name: String,

    /// Sale or expense.
    pub kind: TransactionKind,

    /// Monetary amount in ngwee. Always > 0.
    pub amount_ngwee: i64,

    /// Number of items sold; absent means 1.
    pub quantity: Option<i64>,

    /// Settlement method.
    pub method: PaymentMethod,

    /// Referenced product, if the sale was linked to a catalog entry.
    pub item_id: Option<String>,

    /// Product name at record time (frozen).
    pub item_name: Option<String>,

    /// When the transaction was recorded.
    pub timestamp: DateTime<Utc>,

    /// Optional free-text note.
    pub note: Option<String>,

    /// Id of the account that recorded it.
    pub recorded_by: String,
}

impl Transaction {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_ngwee(self.amount_ngwee)
    }

    /// Quantity with the default applied.
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity.unwrap_or(1)
    }

    /// Partition key for this transaction's business.
    #[inline]
    pub fn business_key(&self) -> BusinessKey {
        BusinessKey::new(&self.business_name)
    }
}

// =============================================================================
// Id Generation
// =============================================================================

/// Generates a fresh entity id (UUID v4) for accounts, products, and
/// transactions.
///
/// ## Why UUID v4?
/// Globally unique without coordination, so ids stay valid if the data ever
/// moves off a single device.
pub fn new_entity_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
