//! # Catalog Repository
//!
//! Product CRUD scoped to a business.
//!
//! ## Upsert Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Upsert = Full Replace                                │
//! │                                                                         │
//! │  upsert(product)                                                       │
//! │       │                                                                 │
//! │       ├── id unseen   → insert at the end of the catalog               │
//! │       └── id known    → replace the WHOLE record                       │
//! │                                                                         │
//! │  There is no partial-field merge. Editing means: load the full         │
//! │  record, mutate locally, submit the whole thing. This is what keeps    │
//! │  a forgotten field from silently reverting to a default.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Deleting a product does NOT cascade to transactions that reference it;
//! historical rows keep their name/amount snapshot and the reporting side
//! falls back to it.

use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::store::{Collection, Database};
use biztrack_core::validation::sells_below_cost;
use biztrack_core::{Product, Session, StaffRole};

/// Roles allowed to create, edit, or delete catalog entries.
const CATALOG_MANAGERS: &[StaffRole] = &[StaffRole::Owner, StaffRole::Manager];

/// Repository for product operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    db: Database,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(db: Database) -> Self {
        CatalogRepository { db }
    }

    /// Lists the session's business catalog, in stored order.
    pub fn list(&self, session: &Session) -> StoreResult<Vec<Product>> {
        session.require_approved()?;

        let products: Vec<Product> = self.db.read_rows(Collection::Products)?;
        let business_key = session.business_key();

        Ok(products
            .into_iter()
            .filter(|p| p.business_key() == business_key)
            .collect())
    }

    /// Reads a single product of the session's business.
    pub fn get(&self, session: &Session, id: &str) -> StoreResult<Option<Product>> {
        session.require_approved()?;

        let products: Vec<Product> = self.db.read_rows(Collection::Products)?;
        let business_key = session.business_key();

        Ok(products
            .into_iter()
            .find(|p| p.id == id && p.business_key() == business_key))
    }

    /// Inserts or fully replaces a product.
    ///
    /// OWNER/MANAGER only. Callers supply the complete record including
    /// unchanged fields. A sell price below the buy price is advisory: it is
    /// logged here and warned about in the presentation layer, but the write
    /// always proceeds.
    pub fn upsert(&self, session: &Session, product: Product) -> StoreResult<Product> {
        session.require_approved()?;
        session.require_role("manage the catalog", CATALOG_MANAGERS)?;
        session.require_same_business(&product.business_name)?;

        if sells_below_cost(product.buy_price(), product.sell_price()) {
            warn!(
                product = %product.name,
                buy = %product.buy_price(),
                sell = %product.sell_price(),
                "Product priced to sell below cost"
            );
        }

        debug!(id = %product.id, name = %product.name, "Upserting product");

        let business_key = session.business_key();
        let mut products: Vec<Product> = self.db.read_rows(Collection::Products)?;
        match products
            .iter_mut()
            .find(|p| p.id == product.id && p.business_key() == business_key)
        {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }
        self.db.write_rows(Collection::Products, &products)?;

        Ok(product)
    }

    /// Deletes a product by id.
    ///
    /// OWNER/MANAGER only. Unconditional: an unknown id is a no-op, and
    /// transactions referencing the product are left untouched (they keep
    /// their snapshot).
    pub fn remove(&self, session: &Session, id: &str) -> StoreResult<()> {
        session.require_approved()?;
        session.require_role("manage the catalog", CATALOG_MANAGERS)?;

        debug!(id = %id, "Removing product");

        let business_key = session.business_key();
        let mut products: Vec<Product> = self.db.read_rows(Collection::Products)?;
        products.retain(|p| p.id != id || p.business_key() != business_key);
        self.db.write_rows(Collection::Products, &products)?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::repository::identity::Registration;
    use biztrack_core::{new_entity_id, CoreError, SessionAccount, SubscriptionTier};

    const BUSINESS: &str = "Lusaka Central Mart";

    fn open_shop(db: &Database) -> Session {
        let owner = db
            .identity()
            .register(
                Registration {
                    full_name: "Jane Doe".to_string(),
                    phone_number: "0970000000".to_string(),
                    email: "jane@mart.com".to_string(),
                    credential: "secret".to_string(),
                    business_name: BUSINESS.to_string(),
                    role: StaffRole::Owner,
                    tier: SubscriptionTier::Paid,
                },
                false,
            )
            .unwrap();
        Session::new(SessionAccount::from(&owner))
    }

    fn product(name: &str, buy: i64, sell: i64, stock: i64) -> Product {
        Product {
            id: new_entity_id(),
            business_name: BUSINESS.to_string(),
            name: name.to_string(),
            buy_price_ngwee: buy * 100,
            sell_price_ngwee: sell * 100,
            stock_count: stock,
            min_stock: 5,
        }
    }

    #[test]
    fn test_upsert_inserts_then_replaces() {
        let db = Database::in_memory();
        let session = open_shop(&db);

        let mut oil = product("Cooking Oil 2L", 65, 85, 20);
        db.catalog().upsert(&session, oil.clone()).unwrap();
        assert_eq!(db.catalog().list(&session).unwrap().len(), 1);

        // Full replace: the whole record is what was submitted.
        oil.sell_price_ngwee = 9000;
        oil.stock_count = 18;
        db.catalog().upsert(&session, oil.clone()).unwrap();

        let listed = db.catalog().list(&session).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].sell_price_ngwee, 9000);
        assert_eq!(listed[0].stock_count, 18);
    }

    #[test]
    fn test_list_is_partitioned_by_business() {
        let db = Database::in_memory();
        let session = open_shop(&db);
        db.catalog()
            .upsert(&session, product("Cooking Oil 2L", 65, 85, 20))
            .unwrap();

        let outsider = db
            .identity()
            .register(
                Registration {
                    full_name: "Kit We".to_string(),
                    phone_number: "0970000009".to_string(),
                    email: "owner@kitwe.com".to_string(),
                    credential: "secret".to_string(),
                    business_name: "Kitwe Corner Shop".to_string(),
                    role: StaffRole::Owner,
                    tier: SubscriptionTier::Free,
                },
                false,
            )
            .unwrap();
        let other_session = Session::new(SessionAccount::from(&outsider));

        assert!(db.catalog().list(&other_session).unwrap().is_empty());
    }

    #[test]
    fn test_cross_business_write_is_rejected() {
        let db = Database::in_memory();
        let session = open_shop(&db);

        let mut foreign = product("Smuggled Goods", 10, 20, 5);
        foreign.business_name = "Kitwe Corner Shop".to_string();

        let err = db.catalog().upsert(&session, foreign).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::ForeignBusiness { .. })));
    }

    #[test]
    fn test_sales_person_cannot_manage_catalog() {
        let db = Database::in_memory();
        let owner_session = open_shop(&db);
        let staff = db
            .identity()
            .register(
                Registration {
                    full_name: "Sam Sales".to_string(),
                    phone_number: "0970000002".to_string(),
                    email: "sam@mart.com".to_string(),
                    credential: "secret".to_string(),
                    business_name: BUSINESS.to_string(),
                    role: StaffRole::SalesPerson,
                    tier: SubscriptionTier::Free,
                },
                true,
            )
            .unwrap();
        let staff = db
            .identity()
            .set_status(&owner_session, &staff.id, biztrack_core::AccountStatus::Approved)
            .unwrap();
        let staff_session = Session::new(SessionAccount::from(&staff));

        let err = db
            .catalog()
            .upsert(&staff_session, product("Bread", 10, 14, 30))
            .unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::PermissionDenied { .. })));

        // Reading the catalog is still allowed; selling needs the prices.
        assert!(db.catalog().list(&staff_session).is_ok());
    }

    #[test]
    fn test_remove_is_unconditional_and_scoped() {
        let db = Database::in_memory();
        let session = open_shop(&db);
        let oil = product("Cooking Oil 2L", 65, 85, 20);
        db.catalog().upsert(&session, oil.clone()).unwrap();

        // Unknown ids are a silent no-op.
        db.catalog().remove(&session, "not-there").unwrap();
        assert_eq!(db.catalog().list(&session).unwrap().len(), 1);

        db.catalog().remove(&session, &oil.id).unwrap();
        assert!(db.catalog().list(&session).unwrap().is_empty());
    }

    #[test]
    fn test_sell_below_cost_still_writes() {
        let db = Database::in_memory();
        let session = open_shop(&db);

        // Advisory only: the warning is logged, the write succeeds.
        let loss_leader = product("Clearance Meal 10kg", 180, 150, 5);
        db.catalog().upsert(&session, loss_leader).unwrap();
        assert_eq!(db.catalog().list(&session).unwrap().len(), 1);
    }

    #[test]
    fn test_pending_session_is_refused() {
        let db = Database::in_memory();
        open_shop(&db);
        let pending = db
            .identity()
            .register(
                Registration {
                    full_name: "Pat Pending".to_string(),
                    phone_number: "0970000003".to_string(),
                    email: "pat@mart.com".to_string(),
                    credential: "secret".to_string(),
                    business_name: BUSINESS.to_string(),
                    role: StaffRole::Manager,
                    tier: SubscriptionTier::Free,
                },
                true,
            )
            .unwrap();
        let pending_session = Session::new(SessionAccount::from(&pending));

        let err = db.catalog().list(&pending_session).unwrap_err();
        assert!(matches!(err, StoreError::Core(CoreError::NotApproved { .. })));
    }
}
