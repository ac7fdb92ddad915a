//! # Reporting Module
//!
//! Pure read-side aggregation over ledger and catalog snapshots.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Reporting Pipeline                                │
//! │                                                                         │
//! │  ledger.list() ───► &[Transaction] ──┬──► revenue / expenses            │
//! │                                      ├──► net_profit                    │
//! │  catalog.list() ──► &[Product] ──────┤       │                          │
//! │                                      │       └── per-line margin, or    │
//! │                                      │           20% fallback when the  │
//! │                                      │           product link is gone   │
//! │                                      ├──► method_breakdown              │
//! │                                      ├──► top_sellers (30-day, top 3)   │
//! │                                      ├──► low_stock                     │
//! │                                      └──► inventory_value               │
//! │                                                                         │
//! │  NO MUTATION • NO PERSISTENCE • `now` IS AN ARGUMENT                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Time windows are computed from the `now` argument at call time, never
//! cached; callers pass `Utc::now()`.

use chrono::{DateTime, Datelike, Days, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{PaymentMethod, Product, Transaction, TransactionKind};
use crate::{FALLBACK_MARGIN_BPS, TOP_SELLERS_LIMIT, TOP_SELLERS_WINDOW_DAYS};

// =============================================================================
// Time Windows
// =============================================================================

/// A calendar window anchored at the caller's `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeWindow {
    /// The calendar day containing `now`.
    Today,
    /// The calendar week containing `now`, starting Sunday.
    ThisWeek,
    /// The calendar month containing `now`.
    ThisMonth,
    /// Everything.
    AllTime,
}

impl TimeWindow {
    /// Whether `timestamp` falls inside this window relative to `now`.
    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            TimeWindow::Today => timestamp.date_naive() == now.date_naive(),
            TimeWindow::ThisWeek => {
                let days_from_sunday = now.weekday().num_days_from_sunday() as u64;
                let week_start = now.date_naive() - Days::new(days_from_sunday);
                let week_end = week_start + Days::new(7);
                let date = timestamp.date_naive();
                date >= week_start && date < week_end
            }
            TimeWindow::ThisMonth => {
                timestamp.year() == now.year() && timestamp.month() == now.month()
            }
            TimeWindow::AllTime => true,
        }
    }
}

// =============================================================================
// Revenue and Expenses
// =============================================================================

/// Sum of SALE amounts inside the window.
pub fn revenue(transactions: &[Transaction], window: TimeWindow, now: DateTime<Utc>) -> Money {
    sum_of_kind(transactions, TransactionKind::Sale, window, now)
}

/// Sum of EXPENSE amounts inside the window.
pub fn expenses(transactions: &[Transaction], window: TimeWindow, now: DateTime<Utc>) -> Money {
    sum_of_kind(transactions, TransactionKind::Expense, window, now)
}

fn sum_of_kind(
    transactions: &[Transaction],
    kind: TransactionKind,
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == kind && window.contains(t.timestamp, now))
        .map(Transaction::amount)
        .sum()
}

// =============================================================================
// Profit Estimation
// =============================================================================

/// Profit contribution of a single sale line.
///
/// If the transaction references a product that still exists, the
/// contribution is (sell − buy) × quantity. Otherwise — no link, or the
/// product was deleted — it falls back to a flat 20% of the amount. The
/// fallback is an approximation for reporting, not an accounting fact.
///
/// Expense lines contribute nothing.
pub fn sale_profit(transaction: &Transaction, products: &[Product]) -> Money {
    if transaction.kind != TransactionKind::Sale {
        return Money::zero();
    }

    let linked = transaction
        .item_id
        .as_deref()
        .and_then(|id| products.iter().find(|p| p.id == id));

    match linked {
        Some(product) => product.unit_margin().multiply_quantity(transaction.quantity()),
        None => transaction.amount().apply_margin_bps(FALLBACK_MARGIN_BPS),
    }
}

/// Net profit for the window: per-line sale profit minus expenses.
pub fn net_profit(
    transactions: &[Transaction],
    products: &[Product],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Money {
    let earned: Money = transactions
        .iter()
        .filter(|t| window.contains(t.timestamp, now))
        .map(|t| sale_profit(t, products))
        .sum();

    earned - expenses(transactions, window, now)
}

// =============================================================================
// Payment Method Breakdown
// =============================================================================

/// SALE totals per payment method for a window. Used by the dashboard's
/// reconciliation cards (cash box vs mobile-money balances).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodBreakdown {
    pub cash: Money,
    pub mtn_momo: Money,
    pub airtel_money: Money,
}

impl MethodBreakdown {
    /// The total recorded against one method.
    pub fn amount(&self, method: PaymentMethod) -> Money {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::MtnMomo => self.mtn_momo,
            PaymentMethod::AirtelMoney => self.airtel_money,
        }
    }
}

/// Sums SALE amounts per payment method inside the window.
pub fn method_breakdown(
    transactions: &[Transaction],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> MethodBreakdown {
    let mut breakdown = MethodBreakdown::default();

    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Sale && window.contains(t.timestamp, now))
    {
        match t.method {
            PaymentMethod::Cash => breakdown.cash += t.amount(),
            PaymentMethod::MtnMomo => breakdown.mtn_momo += t.amount(),
            PaymentMethod::AirtelMoney => breakdown.airtel_money += t.amount(),
        }
    }

    breakdown
}

// =============================================================================
// Stock Views
// =============================================================================

/// Products at or below their restock threshold, in catalog order.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

/// Total shelf value at cost: Σ buy price × stock count.
pub fn inventory_value(products: &[Product]) -> Money {
    products
        .iter()
        .map(|p| p.buy_price().multiply_quantity(p.stock_count))
        .sum()
}

// =============================================================================
// Popularity Ranking
// =============================================================================

/// One entry of the popularity ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSales {
    pub name: String,
    pub count: u32,
}

/// Top sellers over the trailing 30 days.
///
/// Counts SALE transactions per distinct item name, descending by count,
/// ties broken by first-encountered order in the input (the ledger is
/// most-recent-first, so ties favor the more recently sold item). The top
/// three are retained.
pub fn top_sellers(transactions: &[Transaction], now: DateTime<Utc>) -> Vec<ItemSales> {
    let cutoff = now - Duration::days(TOP_SELLERS_WINDOW_DAYS);

    // Vec instead of a map: preserves first-encounter order for tie-breaks,
    // and the distinct-name count is small.
    let mut counts: Vec<ItemSales> = Vec::new();

    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Sale && t.timestamp > cutoff)
    {
        let Some(name) = t.item_name.as_deref() else {
            continue;
        };

        match counts.iter_mut().find(|c| c.name == name) {
            Some(entry) => entry.count += 1,
            None => counts.push(ItemSales {
                name: name.to_string(),
                count: 1,
            }),
        }
    }

    // Stable sort keeps first-encountered order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_SELLERS_LIMIT);
    counts
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const BUSINESS: &str = "Lusaka Central Mart";

    fn tx(
        kind: TransactionKind,
        amount_kwacha: i64,
        timestamp: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            business_name: BUSINESS.to_string(),
            kind,
            amount_ngwee: amount_kwacha * 100,
            quantity: None,
            method: PaymentMethod::Cash,
            item_id: None,
            item_name: None,
            timestamp,
            note: None,
            recorded_by: "a-1".to_string(),
        }
    }

    fn product(id: &str, buy_kwacha: i64, sell_kwacha: i64, stock: i64, min: i64) -> Product {
        Product {
            id: id.to_string(),
            business_name: BUSINESS.to_string(),
            name: format!("Product {}", id),
            buy_price_ngwee: buy_kwacha * 100,
            sell_price_ngwee: sell_kwacha * 100,
            stock_count: stock,
            min_stock: min,
        }
    }

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_today_window() {
        let now = noon(2024, 3, 15);
        assert!(TimeWindow::Today.contains(noon(2024, 3, 15), now));
        assert!(!TimeWindow::Today.contains(noon(2024, 3, 14), now));
    }

    #[test]
    fn test_week_window_starts_sunday() {
        // 2024-03-15 is a Friday; the week runs Sun 2024-03-10 .. Sat 2024-03-16.
        let now = noon(2024, 3, 15);
        assert!(TimeWindow::ThisWeek.contains(noon(2024, 3, 10), now));
        assert!(TimeWindow::ThisWeek.contains(noon(2024, 3, 16), now));
        assert!(!TimeWindow::ThisWeek.contains(noon(2024, 3, 9), now));
        assert!(!TimeWindow::ThisWeek.contains(noon(2024, 3, 17), now));
    }

    #[test]
    fn test_month_and_all_time_windows() {
        let now = noon(2024, 3, 15);
        assert!(TimeWindow::ThisMonth.contains(noon(2024, 3, 1), now));
        assert!(!TimeWindow::ThisMonth.contains(noon(2024, 2, 29), now));
        assert!(TimeWindow::AllTime.contains(noon(1999, 1, 1), now));
    }

    #[test]
    fn test_unlinked_day_of_figures() {
        // SALE K100 + SALE K50 + EXPENSE K30, none linked to a product:
        // revenue 150, expenses 30, net profit = 150 × 20% − 30 = 0.
        let now = noon(2024, 3, 15);
        let txs = vec![
            tx(TransactionKind::Sale, 100, now),
            tx(TransactionKind::Sale, 50, now),
            tx(TransactionKind::Expense, 30, now),
        ];

        assert_eq!(revenue(&txs, TimeWindow::Today, now), Money::from_kwacha(150));
        assert_eq!(expenses(&txs, TimeWindow::Today, now), Money::from_kwacha(30));
        assert_eq!(net_profit(&txs, &[], TimeWindow::Today, now), Money::zero());
    }

    #[test]
    fn test_linked_sale_uses_product_margin() {
        let now = noon(2024, 3, 15);
        let products = vec![product("p-1", 15, 20, 48, 12)];

        let mut sale = tx(TransactionKind::Sale, 60, now);
        sale.item_id = Some("p-1".to_string());
        sale.item_name = Some("Mosi Lager 375ml".to_string());
        sale.quantity = Some(3);

        // (20 − 15) × 3 = K15, not 20% of K60.
        assert_eq!(sale_profit(&sale, &products), Money::from_kwacha(15));
    }

    #[test]
    fn test_dangling_reference_falls_back() {
        let now = noon(2024, 3, 15);
        let mut sale = tx(TransactionKind::Sale, 100, now);
        sale.item_id = Some("deleted-product".to_string());
        sale.item_name = Some("Gone".to_string());

        assert_eq!(sale_profit(&sale, &[]), Money::from_kwacha(20));
    }

    #[test]
    fn test_expense_contributes_no_profit() {
        let now = noon(2024, 3, 15);
        let expense = tx(TransactionKind::Expense, 30, now);
        assert_eq!(sale_profit(&expense, &[]), Money::zero());
    }

    #[test]
    fn test_method_breakdown_counts_sales_only() {
        let now = noon(2024, 3, 15);
        let mut momo_sale = tx(TransactionKind::Sale, 40, now);
        momo_sale.method = PaymentMethod::MtnMomo;
        let mut airtel_expense = tx(TransactionKind::Expense, 25, now);
        airtel_expense.method = PaymentMethod::AirtelMoney;
        let txs = vec![
            tx(TransactionKind::Sale, 100, now),
            momo_sale,
            airtel_expense,
        ];

        let breakdown = method_breakdown(&txs, TimeWindow::Today, now);
        assert_eq!(breakdown.cash, Money::from_kwacha(100));
        assert_eq!(breakdown.mtn_momo, Money::from_kwacha(40));
        // The Airtel row is an expense, not a sale.
        assert_eq!(breakdown.airtel_money, Money::zero());
        assert_eq!(
            breakdown.amount(PaymentMethod::MtnMomo),
            Money::from_kwacha(40)
        );
    }

    #[test]
    fn test_low_stock_in_catalog_order() {
        let products = vec![
            product("p-1", 15, 20, 48, 12),
            product("p-2", 180, 210, 5, 10),
            product("p-3", 65, 85, 5, 5),
        ];

        let low: Vec<&str> = low_stock(&products).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(low, vec!["p-2", "p-3"]);
    }

    #[test]
    fn test_inventory_value_at_cost() {
        let products = vec![product("p-1", 15, 20, 10, 5), product("p-2", 100, 150, 2, 1)];
        // 15×10 + 100×2 = K350, valued at buy price not sell price.
        assert_eq!(inventory_value(&products), Money::from_kwacha(350));
    }

    #[test]
    fn test_top_sellers_ranking() {
        let now = noon(2024, 3, 15);
        let mut txs = Vec::new();
        for _ in 0..5 {
            let mut sale = tx(TransactionKind::Sale, 10, now);
            sale.item_name = Some("Bread".to_string());
            txs.push(sale);
        }
        for _ in 0..3 {
            let mut sale = tx(TransactionKind::Sale, 15, now);
            sale.item_name = Some("Milk".to_string());
            txs.push(sale);
        }
        // Outside the 30-day window; must not count.
        let mut stale = tx(TransactionKind::Sale, 10, now - Duration::days(31));
        stale.item_name = Some("Bread".to_string());
        txs.push(stale);

        let top = top_sellers(&txs, now);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], ItemSales { name: "Bread".to_string(), count: 5 });
        assert_eq!(top[1], ItemSales { name: "Milk".to_string(), count: 3 });
    }

    #[test]
    fn test_top_sellers_keeps_three_ties_first_encountered() {
        let now = noon(2024, 3, 15);
        let mut txs = Vec::new();
        for name in ["Bread", "Milk", "Sugar", "Salt"] {
            let mut sale = tx(TransactionKind::Sale, 10, now);
            sale.item_name = Some(name.to_string());
            txs.push(sale);
        }

        let top = top_sellers(&txs, now);
        assert_eq!(top.len(), 3);
        let names: Vec<&str> = top.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bread", "Milk", "Sugar"]);
    }
}
