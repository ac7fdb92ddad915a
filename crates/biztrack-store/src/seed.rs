//! # Demo Data Seeding
//!
//! First-run bootstrap: a demo owner account and a small demo catalog so a
//! fresh install has something to show.
//!
//! ## Idempotence
//! Each collection is seeded only while it is empty; seeding an already
//! populated store is a no-op per collection, so this can run on every
//! startup.

use tracing::info;

use crate::error::StoreResult;
use crate::store::{Collection, Database};
use biztrack_core::{
    Account, AccountStatus, Product, StaffRole, SubscriptionTier,
};

/// Business name of the seeded demo tenant.
pub const DEMO_BUSINESS: &str = "Lusaka Central Mart";

/// Login email of the seeded demo owner.
pub const DEMO_OWNER_EMAIL: &str = "owner@lusakamart.com";

/// Seeds the demo owner and catalog into empty collections.
///
/// ## Behavior
/// - `accounts` empty → exactly one approved, paid-tier OWNER
/// - `products` empty → a small demo catalog for the demo business
/// - non-empty collections are left untouched
pub fn seed_demo_data(db: &Database) -> StoreResult<()> {
    let accounts: Vec<Account> = db.read_rows(Collection::Accounts)?;
    if accounts.is_empty() {
        info!(business = DEMO_BUSINESS, "Seeding demo owner account");
        let demo_owner = Account {
            id: "owner-123".to_string(),
            full_name: "Jane Doe".to_string(),
            phone_number: "0970000000".to_string(),
            email: DEMO_OWNER_EMAIL.to_string(),
            credential: "password123".to_string(),
            business_name: DEMO_BUSINESS.to_string(),
            role: StaffRole::Owner,
            tier: SubscriptionTier::Paid,
            status: AccountStatus::Approved,
        };
        db.write_rows(Collection::Accounts, &[demo_owner])?;
    }

    let products: Vec<Product> = db.read_rows(Collection::Products)?;
    if products.is_empty() {
        info!(business = DEMO_BUSINESS, "Seeding demo catalog");
        let demo_products = vec![
            Product {
                id: "1".to_string(),
                business_name: DEMO_BUSINESS.to_string(),
                name: "Mosi Lager 375ml".to_string(),
                buy_price_ngwee: 1500,
                sell_price_ngwee: 2000,
                stock_count: 48,
                min_stock: 12,
            },
            Product {
                id: "2".to_string(),
                business_name: DEMO_BUSINESS.to_string(),
                name: "Mealile Mealie Meal 10kg".to_string(),
                buy_price_ngwee: 18000,
                sell_price_ngwee: 21000,
                stock_count: 5,
                min_stock: 10,
            },
            Product {
                id: "3".to_string(),
                business_name: DEMO_BUSINESS.to_string(),
                name: "Cooking Oil 2L".to_string(),
                buy_price_ngwee: 6500,
                sell_price_ngwee: 8500,
                stock_count: 20,
                min_stock: 5,
            },
        ];
        db.write_rows(Collection::Products, &demo_products)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
