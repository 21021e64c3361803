//! Catalog, cart and transaction records served by the upstream API.
//!
//! Field names follow the upstream wire format (camelCase, except the
//! nested relation arrays on transactions, which the upstream emits in
//! snake_case). Nested relations are optional because list endpoints embed
//! them while mutation replies usually do not.

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

/// A bookable activity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub category_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub price: i64,
    #[serde(default)]
    pub price_discount: Option<i64>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_reviews: i64,
    #[serde(default)]
    pub facilities: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub location_maps: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Activity {
    /// Price a buyer actually pays: the discounted price when one is set.
    #[must_use]
    pub fn effective_price(&self) -> i64 {
        self.price_discount.filter(|d| *d > 0).unwrap_or(self.price)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub terms_condition: String,
    pub promo_code: String,
    pub promo_discount_price: i64,
    pub minimum_claim_price: i64,
}

// =============================================================================
// CART
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub activity_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub activity: Option<Activity>,
}

/// Sum of `quantity * effective_price` for items whose activity is embedded.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> i64 {
    items
        .iter()
        .filter_map(|item| item.activity.as_ref().map(|a| a.effective_price() * i64::from(item.quantity)))
        .sum()
}

// =============================================================================
// PAYMENT & TRANSACTIONS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub virtual_account_number: Option<String>,
    #[serde(default)]
    pub virtual_account_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Lifecycle of a booking. Admins move `pending` to `success` or `failed`;
/// buyers may cancel while `pending`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub payment_method_id: Option<String>,
    pub invoice_id: String,
    pub status: TransactionStatus,
    pub total_amount: i64,
    #[serde(default)]
    pub proof_payment_url: Option<String>,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub expired_date: Option<String>,
    #[serde(default, rename = "transaction_items")]
    pub transaction_items: Vec<TransactionItem>,
    #[serde(default, rename = "payment_method")]
    pub payment_method: Option<PaymentMethod>,
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// Back-office headline counts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub users: usize,
    pub banners: usize,
    pub categories: usize,
    pub activities: usize,
    pub promos: usize,
    pub transactions: usize,
    pub pending_transactions: usize,
    pub success_transactions: usize,
    pub revenue: i64,
}

impl DashboardStats {
    /// Fold the transaction list into the status counters and revenue.
    pub fn tally_transactions(&mut self, transactions: &[Transaction]) {
        self.transactions = transactions.len();
        self.pending_transactions = transactions.iter().filter(|t| t.status == TransactionStatus::Pending).count();
        self.success_transactions = transactions.iter().filter(|t| t.status == TransactionStatus::Success).count();
        self.revenue = transactions
            .iter()
            .filter(|t| t.status == TransactionStatus::Success)
            .map(|t| t.total_amount)
            .sum();
    }
}
